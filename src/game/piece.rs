use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Number of distinct pieces in the catalog.
pub const PIECE_COUNT: usize = 16;

/// One of the four binary traits every piece carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Size,
    Fill,
    Color,
    Shape,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::Size,
        Attribute::Fill,
        Attribute::Color,
        Attribute::Shape,
    ];

    fn mask(self) -> u8 {
        match self {
            Attribute::Size => 0b0001,
            Attribute::Fill => 0b0010,
            Attribute::Color => 0b0100,
            Attribute::Shape => 0b1000,
        }
    }

    /// Glyphs used when rendering, as (set, unset).
    fn glyphs(self) -> (char, char) {
        match self {
            Attribute::Size => ('T', 's'),
            Attribute::Fill => ('H', 'f'),
            Attribute::Color => ('D', 'l'),
            Attribute::Shape => ('R', 'q'),
        }
    }
}

/// A game piece, identified by an id in `[0, 16)`.
///
/// Bit 0 is size (tall), bit 1 fill (hollow), bit 2 color (dark) and bit 3
/// shape (round). Two pieces are the same piece iff their ids match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Create a piece from its id, or `None` when out of range.
    pub fn new(id: u8) -> Option<Piece> {
        if (id as usize) < PIECE_COUNT {
            Some(Piece(id))
        } else {
            None
        }
    }

    /// Create a piece from an id known to be valid.
    ///
    /// Panics when `id >= 16`; an out-of-range id is a caller bug, not an
    /// illegal move.
    pub fn from_index(id: usize) -> Piece {
        assert!(id < PIECE_COUNT, "piece id {} out of range", id);
        Piece(id as u8)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether the piece carries the set value of `attribute`.
    pub fn has(self, attribute: Attribute) -> bool {
        self.0 & attribute.mask() != 0
    }

    /// Iterate over the whole catalog in id order.
    pub fn all() -> impl Iterator<Item = Piece> {
        (0..PIECE_COUNT as u8).map(Piece)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in Attribute::ALL {
            let (set, unset) = attribute.glyphs();
            let glyph = if self.has(attribute) { set } else { unset };
            write!(f, "{}", glyph)?;
        }
        Ok(())
    }
}

impl FromStr for Piece {
    type Err = ParseError;

    /// Accepts a decimal id (`"13"`) or the rendered glyph form (`"TfDR"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Piece::new(id).ok_or_else(|| ParseError::Piece(s.to_string()));
        }
        Piece::all()
            .find(|p| p.to_string() == s)
            .ok_or_else(|| ParseError::Piece(s.to_string()))
    }
}

/// True iff the four pieces share at least one attribute value: all set or
/// all unset for some attribute.
pub fn shares_attribute(pieces: &[Piece; 4]) -> bool {
    let mut all_set = 0b1111u8;
    let mut all_unset = 0b1111u8;
    for piece in pieces {
        all_set &= piece.0;
        all_unset &= !piece.0;
    }
    (all_set | all_unset) & 0b1111 != 0
}

/// A set of pieces stored as a 16-bit mask. Iterates in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceSet(u16);

impl PieceSet {
    pub fn empty() -> Self {
        PieceSet(0)
    }

    pub fn full() -> Self {
        PieceSet(u16::MAX)
    }

    pub fn contains(self, piece: Piece) -> bool {
        self.0 & (1 << piece.0) != 0
    }

    pub fn insert(&mut self, piece: Piece) {
        self.0 |= 1 << piece.0;
    }

    /// Remove `piece`; returns whether it was present.
    pub fn remove(&mut self, piece: Piece) -> bool {
        let present = self.contains(piece);
        self.0 &= !(1 << piece.0);
        present
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> PieceSetIter {
        PieceSetIter(self.0)
    }
}

impl IntoIterator for PieceSet {
    type Item = Piece;
    type IntoIter = PieceSetIter;

    fn into_iter(self) -> PieceSetIter {
        self.iter()
    }
}

impl FromIterator<Piece> for PieceSet {
    fn from_iter<I: IntoIterator<Item = Piece>>(iter: I) -> Self {
        let mut set = PieceSet::empty();
        for piece in iter {
            set.insert(piece);
        }
        set
    }
}

/// Iterator over the members of a [`PieceSet`].
#[derive(Debug, Clone)]
pub struct PieceSetIter(u16);

impl Iterator for PieceSetIter {
    type Item = Piece;

    fn next(&mut self) -> Option<Piece> {
        if self.0 == 0 {
            return None;
        }
        let id = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Piece(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}
