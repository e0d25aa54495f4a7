//! Core Quarto rules: the piece catalog, the board with its fixed line table,
//! and the game state machine that validates and applies moves.

mod board;
mod piece;
mod state;

pub use board::{lines_through, Board, Cell, CELL_COUNT, LINES, LINE_COUNT, SIZE};
pub use piece::{shares_attribute, Attribute, Piece, PieceSet, PieceSetIter, PIECE_COUNT};
pub use state::{GameOutcome, GameState, MoveError, Phase};
