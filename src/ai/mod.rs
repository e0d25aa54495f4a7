//! Players that can drive either side of an episode, plus the flat encodings
//! of observations and actions used by external learners.

pub mod encoding;
mod greedy;
mod human;
mod player;
mod random;
mod scripted;

pub use greedy::GreedyPlayer;
pub use human::HumanPlayer;
pub use player::{build_player, Player, PlayerKind};
pub use random::RandomPlayer;
pub use scripted::ScriptedPlayer;
