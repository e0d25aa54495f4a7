use serde::{Deserialize, Serialize};

use super::{StepInfo, Winner};

/// Reward magnitudes for the outcomes of a single move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    pub win: f32,
    pub draw: f32,
    pub invalid: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        RewardConfig {
            win: 100.0,
            draw: 20.0,
            invalid: -200.0,
        }
    }
}

/// Classification of what a single move did to the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win,
    Draw,
    Invalid,
}

impl Outcome {
    pub fn from_info(info: &StepInfo) -> Self {
        if info.invalid {
            Outcome::Invalid
        } else if info.win {
            Outcome::Win
        } else if info.draw {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Reward earned by the player who made the move.
    pub fn reward(self, rewards: &RewardConfig) -> f32 {
        match self {
            Outcome::Ongoing => 0.0,
            Outcome::Win => rewards.win,
            Outcome::Draw => rewards.draw,
            Outcome::Invalid => rewards.invalid,
        }
    }

    /// Sign applied to the opponent's step reward to obtain the controller's
    /// reward. An opponent forfeit scores nothing, a draw is shared and an
    /// opponent win is the controller's loss.
    pub fn opponent_polarity(self) -> f32 {
        match self {
            Outcome::Invalid => 0.0,
            Outcome::Win => -1.0,
            Outcome::Draw | Outcome::Ongoing => 1.0,
        }
    }

    /// The controller's reward for an opponent move that earned
    /// `opponent_reward`. A forfeit is exactly `+0.0`.
    pub fn controller_reward(self, opponent_reward: f32) -> f32 {
        match self {
            Outcome::Invalid => 0.0,
            _ => self.opponent_polarity() * opponent_reward,
        }
    }

    /// Winner tag when the controller's own move ended the episode.
    pub fn winner_for_own_move(self) -> Option<Winner> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Invalid => Some(Winner::Env),
            Outcome::Win | Outcome::Draw => Some(Winner::Agent),
        }
    }

    /// Winner tag when the opponent's move ended the episode.
    pub fn winner_for_opponent_move(self) -> Option<Winner> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Invalid => Some(Winner::Agent),
            Outcome::Draw => Some(Winner::Draw),
            Outcome::Win => Some(Winner::Env),
        }
    }
}
