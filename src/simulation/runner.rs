use serde::{Deserialize, Serialize};

use crate::ai::{build_player, PlayerKind};
use crate::env::{OpponentRelay, RelayConfig, RewardConfig, TurnEnvironment};

use super::episode::{episode_seed, play_episode};
use super::metrics::{EpisodeMetrics, SimulationReport};

/// Batch simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub episodes: usize,
    pub log_interval: usize,
    /// Controller steps after which an unfinished episode is abandoned.
    pub max_steps: usize,
    /// Built-in player driving the controller side.
    pub controller: PlayerKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            episodes: 1000,
            log_interval: 100,
            max_steps: 64,
            controller: PlayerKind::Greedy,
        }
    }
}

/// Plays many relay episodes between two built-in players and aggregates the
/// results from the controller's side.
pub struct Simulator {
    config: SimulationConfig,
    rewards: RewardConfig,
    relay: RelayConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig, rewards: RewardConfig, relay: RelayConfig) -> Self {
        Simulator {
            config,
            rewards,
            relay,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run all episodes. With a seed set in the relay settings every episode
    /// is reseeded from it, so the whole batch is reproducible.
    pub fn run(&self) -> SimulationReport {
        let mut controller = build_player(self.config.controller, None);
        let opponent = build_player(self.relay.opponent, None);
        let mut relay = OpponentRelay::new(
            TurnEnvironment::new(self.rewards),
            opponent,
            self.relay.first_mover,
        );
        let mut metrics = EpisodeMetrics::with_capacity(self.config.log_interval);

        log::info!(
            "Simulating {} episodes: {} (controller) vs {} (opponent), first mover {:?}",
            self.config.episodes,
            controller.name(),
            relay.opponent().name(),
            self.relay.first_mover,
        );

        for episode in 1..=self.config.episodes {
            if let Some(base) = self.relay.seed {
                let seed = episode_seed(base, episode);
                relay.seed(seed);
                controller.seed(seed.rotate_left(32));
            }

            let result = play_episode(&mut relay, &mut controller, self.config.max_steps);
            metrics.record(result);

            if episode % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                log::info!(
                    "Episode {}/{} | win: {:.1}% | loss: {:.1}% | draw: {:.1}% | invalid: {:.1}% | avg_reward: {:.1} | avg_len: {:.1}",
                    episode,
                    self.config.episodes,
                    metrics.win_rate(window) * 100.0,
                    metrics.loss_rate(window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.invalid_rate(window) * 100.0,
                    metrics.average_reward(window),
                    metrics.average_length(window),
                );
            }
        }

        log::info!("Simulation complete. Total episodes: {}", metrics.total_episodes());
        metrics.report()
    }
}
