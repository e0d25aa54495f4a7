use super::{Board, Cell, Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The last placement completed line `line`.
    Win { line: usize },
    /// The board filled up without a winning line.
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingFirstPiece,
    InProgress,
    Won,
    Drawn,
}

/// Reasons a well-formed move is rejected. None of them mutate the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("no piece has been handed over yet")]
    NoPieceHeld,

    #[error("first piece was already chosen")]
    AlreadyStarted,

    #[error("piece {given} is not the held piece {held}")]
    WrongPiece { given: Piece, held: Piece },

    #[error("cell {0} is already occupied")]
    CellOccupied(Cell),

    #[error("piece {0} is not free")]
    PieceNotFree(Piece),

    #[error("a piece must be handed over while pieces remain")]
    MissingHandOver,

    #[error("no piece is left to hand over")]
    UnexpectedHandOver,
}

/// The Quarto engine: board, the piece the mover must place, and the
/// terminal outcome once reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    board: Board,
    held: Option<Piece>,
    turn: u32,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            held: None,
            turn: 0,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece the player to move must place.
    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    /// Number of successful placements so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// A win was completed.
    pub fn game_over(&self) -> bool {
        matches!(self.outcome, Some(GameOutcome::Win { .. }))
    }

    /// The board is full without a win.
    pub fn draw(&self) -> bool {
        matches!(self.outcome, Some(GameOutcome::Draw))
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn phase(&self) -> Phase {
        match (self.outcome, self.held) {
            (Some(GameOutcome::Win { .. }), _) => Phase::Won,
            (Some(GameOutcome::Draw), _) => Phase::Drawn,
            (None, None) => Phase::AwaitingFirstPiece,
            (None, Some(_)) => Phase::InProgress,
        }
    }

    /// Opening move: hand over the first piece without placing anything.
    pub fn choose_first(&mut self, piece: Piece) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.held.is_some() {
            return Err(MoveError::AlreadyStarted);
        }
        if !self.board.free_pieces().contains(piece) {
            return Err(MoveError::PieceNotFree(piece));
        }
        self.held = Some(piece);
        Ok(())
    }

    /// Place the held `piece` on `cell` and hand `hand_over` to the opponent.
    ///
    /// `hand_over` must be `None` exactly when `piece` is the last free piece.
    /// On error nothing changes.
    pub fn play(
        &mut self,
        piece: Piece,
        cell: Cell,
        hand_over: Option<Piece>,
    ) -> Result<(), MoveError> {
        self.check_play(piece, cell, hand_over)?;

        self.board.place(cell, piece)?;

        if let Some(line) = self.board.winning_line_through(cell) {
            self.outcome = Some(GameOutcome::Win { line });
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.held = hand_over;
        self.turn += 1;
        Ok(())
    }

    fn check_play(
        &self,
        piece: Piece,
        cell: Cell,
        hand_over: Option<Piece>,
    ) -> Result<(), MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let held = self.held.ok_or(MoveError::NoPieceHeld)?;
        if piece != held {
            return Err(MoveError::WrongPiece { given: piece, held });
        }
        if !self.board.is_empty_at(cell) {
            return Err(MoveError::CellOccupied(cell));
        }

        let free = self.board.free_pieces();
        // The held piece is still counted as free until it lands.
        let last_piece = free.len() == 1;
        match hand_over {
            None if last_piece => Ok(()),
            None => Err(MoveError::MissingHandOver),
            Some(_) if last_piece => Err(MoveError::UnexpectedHandOver),
            Some(next) if next == piece || !free.contains(next) => {
                Err(MoveError::PieceNotFree(next))
            }
            Some(_) => Ok(()),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
