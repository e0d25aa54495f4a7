use std::fmt;
use std::str::FromStr;

use super::piece::{shares_attribute, Piece, PieceSet};
use super::state::MoveError;
use crate::error::ParseError;

pub const SIZE: usize = 4;
pub const CELL_COUNT: usize = SIZE * SIZE;
pub const LINE_COUNT: usize = 10;

/// A board coordinate, stored as a flat index `row * 4 + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell(u8);

impl Cell {
    pub fn new(row: usize, col: usize) -> Option<Cell> {
        if row < SIZE && col < SIZE {
            Some(Cell((row * SIZE + col) as u8))
        } else {
            None
        }
    }

    /// Panics when `index >= 16`.
    pub fn from_index(index: usize) -> Cell {
        assert!(index < CELL_COUNT, "cell index {} out of range", index);
        Cell(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / SIZE
    }

    pub fn col(self) -> usize {
        self.index() % SIZE
    }

    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELL_COUNT as u8).map(Cell)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.col())
    }
}

impl FromStr for Cell {
    type Err = ParseError;

    /// Accepts `"row,col"` (parentheses optional) or a flat index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Cell(s.to_string());
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        match trimmed.split_once(',') {
            Some((row, col)) => {
                let row = row.trim().parse::<usize>().map_err(|_| err())?;
                let col = col.trim().parse::<usize>().map_err(|_| err())?;
                Cell::new(row, col).ok_or_else(err)
            }
            None => {
                let index = trimmed.parse::<usize>().map_err(|_| err())?;
                if index < CELL_COUNT {
                    Ok(Cell(index as u8))
                } else {
                    Err(err())
                }
            }
        }
    }
}

/// The 10 winning lines: rows, columns, then the two diagonals.
pub const LINES: [[u8; SIZE]; LINE_COUNT] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [12, 13, 14, 15],
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [3, 6, 9, 12],
];

/// Line ids through one cell. Every cell lies on a row and a column, and at
/// most one diagonal.
#[derive(Debug, Clone, Copy)]
struct CellLines {
    ids: [u8; 3],
    len: u8,
}

static LINES_THROUGH: [CellLines; CELL_COUNT] = build_line_index();

const fn build_line_index() -> [CellLines; CELL_COUNT] {
    let mut index = [CellLines { ids: [0; 3], len: 0 }; CELL_COUNT];
    let mut line = 0;
    while line < LINE_COUNT {
        let mut k = 0;
        while k < SIZE {
            let cell = LINES[line][k] as usize;
            let n = index[cell].len as usize;
            index[cell].ids[n] = line as u8;
            index[cell].len += 1;
            k += 1;
        }
        line += 1;
    }
    index
}

/// Ids of the lines containing `cell`.
pub fn lines_through(cell: Cell) -> &'static [u8] {
    let entry = &LINES_THROUGH[cell.index()];
    &entry.ids[..entry.len as usize]
}

/// 4×4 grid of optional pieces plus the set of pieces not yet placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; CELL_COUNT],
    free: PieceSet,
}

impl Board {
    /// Create a new empty board with every piece free.
    pub fn new() -> Self {
        Board {
            cells: [None; CELL_COUNT],
            free: PieceSet::full(),
        }
    }

    pub fn get(&self, cell: Cell) -> Option<Piece> {
        self.cells[cell.index()]
    }

    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Put `piece` on `cell`. Fails without touching the board when the cell
    /// is taken or the piece was already placed.
    pub fn place(&mut self, cell: Cell, piece: Piece) -> Result<(), MoveError> {
        if !self.is_empty_at(cell) {
            return Err(MoveError::CellOccupied(cell));
        }
        if !self.free.contains(piece) {
            return Err(MoveError::PieceNotFree(piece));
        }
        self.cells[cell.index()] = Some(piece);
        self.free.remove(piece);
        Ok(())
    }

    /// Empty cells in ascending index order.
    pub fn free_spots(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(move |&cell| self.is_empty_at(cell))
    }

    /// Pieces not yet placed.
    pub fn free_pieces(&self) -> PieceSet {
        self.free
    }

    pub fn placed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Contents of line `id` (see [`LINES`]).
    pub fn line(&self, id: usize) -> [Option<Piece>; SIZE] {
        LINES[id].map(|i| self.cells[i as usize])
    }

    /// A line wins when all four cells are filled and the pieces share an
    /// attribute value.
    pub fn is_winning_line(&self, id: usize) -> bool {
        match self.line(id) {
            [Some(a), Some(b), Some(c), Some(d)] => shares_attribute(&[a, b, c, d]),
            _ => false,
        }
    }

    /// First winning line through `cell`, if any.
    pub fn winning_line_through(&self, cell: Cell) -> Option<usize> {
        lines_through(cell)
            .iter()
            .map(|&id| id as usize)
            .find(|&id| self.is_winning_line(id))
    }

    /// Whole-board evaluation, independent of move order.
    pub fn has_winning_line(&self) -> bool {
        (0..LINE_COUNT).any(|id| self.is_winning_line(id))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            let mut line = String::new();
            for col in 0..SIZE {
                match self.cells[row * SIZE + col] {
                    Some(piece) => line.push_str(&format!("{} ", piece)),
                    None => line.push_str(".    "),
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
