use std::collections::VecDeque;

use serde::Serialize;

use crate::env::Winner;

use super::episode::EpisodeResult;

/// Rolling window over recent episodes plus lifetime totals.
pub struct EpisodeMetrics {
    recent: VecDeque<EpisodeResult>,
    capacity: usize,
    totals: SimulationReport,
}

/// Lifetime summary of a batch of episodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub invalid: usize,
    pub total_reward: f64,
    pub total_length: u64,
}

impl SimulationReport {
    fn rate(&self, count: usize) -> f32 {
        if self.episodes == 0 {
            return 0.0;
        }
        count as f32 / self.episodes as f32
    }

    pub fn win_rate(&self) -> f32 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f32 {
        self.rate(self.losses)
    }

    pub fn average_reward(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.total_reward / self.episodes as f64
    }

    pub fn average_length(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.total_length as f64 / self.episodes as f64
    }
}

impl EpisodeMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        EpisodeMetrics {
            recent: VecDeque::with_capacity(capacity),
            capacity,
            totals: SimulationReport::default(),
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record(&mut self, result: EpisodeResult) {
        let totals = &mut self.totals;
        totals.episodes += 1;
        match result.winner {
            Some(Winner::Agent) => totals.wins += 1,
            Some(Winner::Env) => totals.losses += 1,
            Some(Winner::Draw) => totals.draws += 1,
            None => totals.unfinished += 1,
        }
        if result.invalid {
            totals.invalid += 1;
        }
        totals.total_reward += result.reward as f64;
        totals.total_length += result.length as u64;

        self.recent.push_back(result);
        if self.recent.len() > self.capacity {
            self.recent.pop_front();
        }
    }

    fn window_rate(&self, last_n: usize, pred: impl Fn(&EpisodeResult) -> bool) -> f32 {
        let n = self.recent.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.recent.iter().rev().take(n).filter(|r| pred(*r)).count();
        hits as f32 / n as f32
    }

    /// Controller win rate in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.window_rate(last_n, |r| r.winner == Some(Winner::Agent))
    }

    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.window_rate(last_n, |r| r.winner == Some(Winner::Env))
    }

    /// Draw rate in the last N episodes.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.window_rate(last_n, |r| r.winner == Some(Winner::Draw))
    }

    pub fn invalid_rate(&self, last_n: usize) -> f32 {
        self.window_rate(last_n, |r| r.invalid)
    }

    /// Average controller reward over the last N episodes.
    pub fn average_reward(&self, last_n: usize) -> f32 {
        let n = self.recent.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self.recent.iter().rev().take(n).map(|r| r.reward).sum();
        sum / n as f32
    }

    /// Average game length over the last N episodes.
    pub fn average_length(&self, last_n: usize) -> f32 {
        let n = self.recent.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: u32 = self.recent.iter().rev().take(n).map(|r| r.length).sum();
        total as f32 / n as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.totals.episodes
    }

    pub fn report(&self) -> SimulationReport {
        self.totals.clone()
    }
}

impl Default for EpisodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}
