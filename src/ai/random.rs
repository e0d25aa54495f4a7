use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Action, Observation};

use super::player::Player;

/// A player that selects uniformly at random from legal actions.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        RandomPlayer {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn select_action(&mut self, observation: &Observation) -> Action {
        let actions: Vec<Action> = observation.legal_actions().collect();
        assert!(!actions.is_empty(), "No legal actions available");
        let idx = self.rng.random_range(0..actions.len());
        actions[idx]
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TurnEnvironment;

    #[test]
    fn test_random_player_selects_legal_action() {
        let mut player = RandomPlayer::new();
        let mut env = TurnEnvironment::default();
        let obs = env.reset();
        let legal: Vec<Action> = obs.legal_actions().collect();

        for _ in 0..100 {
            let action = player.select_action(&obs);
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn test_random_players_finish_a_game_without_invalid_moves() {
        let mut first = RandomPlayer::with_seed(1);
        let mut second = RandomPlayer::with_seed(2);
        let mut env = TurnEnvironment::default();
        let mut obs = env.reset();

        let mut turn = 0;
        while !env.done() {
            let action = if turn % 2 == 0 {
                first.select_action(&obs)
            } else {
                second.select_action(&obs)
            };
            let result = env.step(action);
            assert!(!result.info.invalid);
            obs = result.observation;
            turn += 1;
        }

        assert!(env.game().game_over() || env.game().draw());
    }

    #[test]
    fn test_seeded_players_repeat() {
        let obs = TurnEnvironment::default().reset();
        let mut a = RandomPlayer::with_seed(42);
        let mut b = RandomPlayer::new();
        b.seed(42);
        for _ in 0..10 {
            assert_eq!(a.select_action(&obs), b.select_action(&obs));
        }
    }

    #[test]
    fn test_random_player_name() {
        let player = RandomPlayer::new();
        assert_eq!(player.name(), "Random");
    }
}
