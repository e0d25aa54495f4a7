use serde::{Deserialize, Serialize};

use crate::env::{Action, Observation};
use crate::game::Board;

use super::{GreedyPlayer, RandomPlayer};

/// Anything that can pick a move from an observation: random, scripted,
/// heuristic, a human at a terminal or a learned policy.
///
/// A player only reads the observation it is given; it never touches the
/// engine.
pub trait Player {
    /// Return the player's display name.
    fn name(&self) -> &str;

    /// Called at the start of every episode with the fresh board.
    fn reset(&mut self, _board: &Board) {}

    /// Choose the next action for the position in `observation`.
    fn select_action(&mut self, observation: &Observation) -> Action;

    /// Reseed any internal randomness.
    fn seed(&mut self, _seed: u64) {}
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn reset(&mut self, board: &Board) {
        (**self).reset(board)
    }

    fn select_action(&mut self, observation: &Observation) -> Action {
        (**self).select_action(observation)
    }

    fn seed(&mut self, seed: u64) {
        (**self).seed(seed)
    }
}

/// Built-in automated players selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Random,
    Greedy,
}

/// Construct a boxed player of the given kind, seeded when `seed` is set.
pub fn build_player(kind: PlayerKind, seed: Option<u64>) -> Box<dyn Player> {
    let mut player: Box<dyn Player> = match kind {
        PlayerKind::Random => Box::new(RandomPlayer::new()),
        PlayerKind::Greedy => Box::new(GreedyPlayer::new()),
    };
    if let Some(seed) = seed {
        player.seed(seed);
    }
    player
}
