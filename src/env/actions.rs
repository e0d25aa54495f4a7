use crate::game::{Board, Cell, Piece, PieceSet, PieceSetIter};

use super::Action;

/// Lazy enumeration of legal `(cell, piece)` pairs: every empty cell combined
/// with every free piece other than the held one. When a single free piece
/// remains (the held one) each cell is paired with `None` instead, since
/// nothing is left to hand over.
#[derive(Debug, Clone)]
pub struct LegalActions {
    spots: u16,
    pieces: PieceSet,
    forced: bool,
    current: Option<(Cell, PieceSetIter)>,
}

impl LegalActions {
    pub fn new(board: &Board, held: Option<Piece>) -> Self {
        let spots = board
            .free_spots()
            .fold(0u16, |mask, cell| mask | (1 << cell.index()));
        let free = board.free_pieces();
        let mut pieces = free;
        if let Some(held) = held {
            pieces.remove(held);
        }
        LegalActions {
            spots,
            pieces,
            forced: free.len() == 1,
            current: None,
        }
    }

    /// An enumeration with no actions, used once an episode is over.
    pub fn none() -> Self {
        LegalActions {
            spots: 0,
            pieces: PieceSet::empty(),
            forced: false,
            current: None,
        }
    }

    fn next_spot(&mut self) -> Option<Cell> {
        if self.spots == 0 {
            return None;
        }
        let index = self.spots.trailing_zeros() as usize;
        self.spots &= self.spots - 1;
        Some(Cell::from_index(index))
    }
}

impl Iterator for LegalActions {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        loop {
            if let Some((cell, pieces)) = &mut self.current {
                if let Some(piece) = pieces.next() {
                    return Some(Action::new(*cell, Some(piece)));
                }
                self.current = None;
            }

            let cell = self.next_spot()?;
            if self.forced {
                return Some(Action::new(cell, None));
            }
            self.current = Some((cell, self.pieces.iter()));
        }
    }
}
