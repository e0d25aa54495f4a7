//! Batch play: running relay episodes to completion, rolling metrics over the
//! results, and the headless simulator behind the `simulate` binary.

pub mod episode;
pub mod metrics;
pub mod runner;

pub use episode::{episode_seed, play_episode, EpisodeResult};
pub use metrics::{EpisodeMetrics, SimulationReport};
pub use runner::{SimulationConfig, Simulator};
