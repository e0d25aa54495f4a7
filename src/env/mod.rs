//! Single-agent view of a two-player Quarto game: the turn environment that
//! wraps one engine, the reward classification, and the relay that plays the
//! opponent's moves in between controller steps.

mod actions;
mod outcome;
mod relay;
mod turn;

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::game::{Board, Cell, Piece};

pub use actions::LegalActions;
pub use outcome::{Outcome, RewardConfig};
pub use relay::{FirstMover, OpponentRelay, RelayConfig};
pub use turn::TurnEnvironment;

/// A move as submitted by a driver: where to place the held piece and which
/// piece to hand over. `piece` is `None` only on the forced last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub cell: Cell,
    pub piece: Option<Piece>,
}

impl Action {
    pub fn new(cell: Cell, piece: Option<Piece>) -> Self {
        Action { cell, piece }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.piece {
            Some(piece) => write!(f, "{} -> {}", self.cell, piece),
            None => write!(f, "{} -> none", self.cell),
        }
    }
}

impl FromStr for Action {
    type Err = ParseError;

    /// `"<cell> <piece>"`, or just `"<cell>"` for the forced last move.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let cell = parts
            .next()
            .ok_or_else(|| ParseError::Action(s.to_string()))?
            .parse::<Cell>()?;
        let piece = match parts.next() {
            Some("none") | None => None,
            Some(text) => Some(text.parse::<Piece>()?),
        };
        if parts.next().is_some() {
            return Err(ParseError::Action(s.to_string()));
        }
        Ok(Action { cell, piece })
    }
}

/// Board snapshot plus the piece the mover must place. This pair is the full
/// Markov state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub board: Board,
    pub piece: Option<Piece>,
}

impl Observation {
    /// Lazily enumerate the moves available from this position.
    pub fn legal_actions(&self) -> LegalActions {
        LegalActions::new(&self.board, self.piece)
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match self.piece {
            Some(piece) => write!(f, "Next: {}", piece)?,
            None => write!(f, "Next: -")?,
        }
        let free: Vec<String> = self
            .board
            .free_pieces()
            .iter()
            .map(|p| p.to_string())
            .collect();
        writeln!(f, ", Free: {}", free.join(" "))
    }
}

/// Who prevailed, from the controller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The controller won, or the opponent forfeited with an invalid move.
    Agent,
    /// The opponent won, or the controller disqualified itself.
    Env,
    Draw,
}

impl Winner {
    pub fn name(self) -> &'static str {
        match self {
            Winner::Agent => "Agent",
            Winner::Env => "Env",
            Winner::Draw => "Draw",
        }
    }
}

/// Per-step diagnostics returned with every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Number of `step` calls in the episode, this one included.
    pub turn: u32,
    pub invalid: bool,
    pub win: bool,
    pub draw: bool,
    /// The step was ignored because the episode had already ended.
    pub noop: bool,
    /// Only set by [`OpponentRelay`].
    pub winner: Option<Winner>,
}

/// Result of one `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parse() {
        let action: Action = "1,2 TfDR".parse().unwrap();
        assert_eq!(action.cell, Cell::new(1, 2).unwrap());
        assert_eq!(action.piece, Some(Piece::from_index(0b1101)));

        let last: Action = "15".parse().unwrap();
        assert_eq!(last.piece, None);
        assert_eq!("3,3 none".parse::<Action>().unwrap().piece, None);
    }

    #[test]
    fn test_action_parse_rejects_garbage() {
        assert!("".parse::<Action>().is_err());
        assert!("1,2 3 4".parse::<Action>().is_err());
        assert!("1,2 99".parse::<Action>().is_err());
    }

    #[test]
    fn test_observation_display_has_footer() {
        let obs = Observation {
            board: Board::new(),
            piece: Some(Piece::from_index(0)),
        };
        let text = obs.to_string();
        assert!(text.contains("Next: sflq, Free: sflq Tflq"));
    }

    #[test]
    fn test_winner_names() {
        assert_eq!(Winner::Agent.name(), "Agent");
        assert_eq!(Winner::Env.name(), "Env");
        assert_eq!(Winner::Draw.name(), "Draw");
    }
}
