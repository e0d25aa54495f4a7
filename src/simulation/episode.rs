use crate::ai::Player;
use crate::env::{OpponentRelay, Winner};

/// Result of a single relay episode, from the controller's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    pub winner: Option<Winner>,
    /// Sum of the rewards the controller received.
    pub reward: f32,
    /// Inner environment steps, both players included.
    pub length: u32,
    /// Some move in the episode was rejected.
    pub invalid: bool,
    pub opponent_first: bool,
}

/// Play one episode: `controller` against the relay's opponent.
///
/// Stops after `max_steps` controller steps even if the game is unfinished,
/// in which case `winner` is `None`.
pub fn play_episode<P, C>(
    relay: &mut OpponentRelay<P>,
    controller: &mut C,
    max_steps: usize,
) -> EpisodeResult
where
    P: Player,
    C: Player + ?Sized,
{
    let mut observation = relay.reset();
    controller.reset(&observation.board);

    let mut reward = 0.0;
    let mut winner = None;
    let mut invalid = false;
    let mut steps = 0;

    if let Some(opening) = relay.opening_result() {
        // The opponent forfeited before the controller moved.
        reward += opening.reward;
        winner = opening.info.winner;
        invalid = true;
    }

    while !relay.done() && steps < max_steps {
        let action = controller.select_action(&observation);
        let result = relay.step(action);
        reward += result.reward;
        invalid |= result.info.invalid;
        if result.done {
            winner = result.info.winner;
            // The relay reports an opponent forfeit only through the winner tag.
            invalid |= winner == Some(Winner::Agent) && !result.info.win && !result.info.draw;
        }
        observation = result.observation;
        steps += 1;
    }

    if steps == max_steps && !relay.done() {
        log::warn!("episode cut off after {} steps", max_steps);
    }

    EpisodeResult {
        winner,
        reward,
        length: relay.env().turns(),
        invalid,
        opponent_first: relay.opponent_first(),
    }
}

/// Derive a deterministic seed for a given episode index.
pub fn episode_seed(base_seed: u64, episode_index: usize) -> u64 {
    // FNV-1a-inspired mixing for deterministic, well-distributed seeds
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = episode_index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}
