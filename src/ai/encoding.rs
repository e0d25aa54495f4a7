//! Flat integer encodings for learners that need fixed-size inputs.
//!
//! Observation: 17 values, the held piece followed by the 16 cells in
//! row-major order; `0` means empty/none and `id + 1` a piece.
//! Action: `[cell index, piece id]` with [`NO_PIECE`] standing for the
//! forced last move.

use crate::env::{Action, Observation};
use crate::game::{Cell, Piece, CELL_COUNT, PIECE_COUNT};

pub const OBSERVATION_LEN: usize = 1 + CELL_COUNT;

/// Piece component of an encoded action when nothing is handed over.
pub const NO_PIECE: u8 = PIECE_COUNT as u8;

fn encode_piece(piece: Option<Piece>) -> i8 {
    piece.map_or(0, |p| p.id() as i8 + 1)
}

pub fn encode_observation(observation: &Observation) -> [i8; OBSERVATION_LEN] {
    let mut data = [0i8; OBSERVATION_LEN];
    data[0] = encode_piece(observation.piece);
    for cell in Cell::all() {
        data[1 + cell.index()] = encode_piece(observation.board.get(cell));
    }
    data
}

pub fn encode_action(action: &Action) -> [u8; 2] {
    [
        action.cell.index() as u8,
        action.piece.map_or(NO_PIECE, Piece::id),
    ]
}

/// Decode `[cell, piece]`; `None` when either component is out of range.
pub fn decode_action(encoded: [u8; 2]) -> Option<Action> {
    let [cell, piece] = encoded;
    if cell as usize >= CELL_COUNT {
        return None;
    }
    let piece = if piece == NO_PIECE {
        None
    } else {
        Some(Piece::new(piece)?)
    };
    Some(Action::new(Cell::from_index(cell as usize), piece))
}

/// Per-component masks of what appears in at least one legal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMask {
    pub cells: [bool; CELL_COUNT],
    /// Indexed by piece id, with the last slot for [`NO_PIECE`].
    pub pieces: [bool; PIECE_COUNT + 1],
}

pub fn action_mask(observation: &Observation) -> ActionMask {
    let mut mask = ActionMask {
        cells: [false; CELL_COUNT],
        pieces: [false; PIECE_COUNT + 1],
    };
    for action in observation.legal_actions() {
        let [cell, piece] = encode_action(&action);
        mask.cells[cell as usize] = true;
        mask.pieces[piece as usize] = true;
    }
    mask
}
