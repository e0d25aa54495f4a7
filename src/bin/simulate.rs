use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ml_quarto::ai::PlayerKind;
use ml_quarto::config::AppConfig;
use ml_quarto::env::FirstMover;
use ml_quarto::simulation::Simulator;

/// Run batches of Quarto episodes between built-in players.
#[derive(Parser)]
#[command(name = "simulate", about = "Simulate Quarto games between built-in players")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override the base seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the opponent played by the relay
    #[arg(long, value_enum)]
    opponent: Option<PlayerKind>,

    /// Override the controller
    #[arg(long, value_enum)]
    controller: Option<PlayerKind>,

    /// Override who makes the opening hand-over
    #[arg(long, value_enum)]
    first_mover: Option<FirstMover>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        app_config.simulation.episodes = episodes;
    }
    if cli.seed.is_some() {
        app_config.relay.seed = cli.seed;
    }
    if let Some(opponent) = cli.opponent {
        app_config.relay.opponent = opponent;
    }
    if let Some(controller) = cli.controller {
        app_config.simulation.controller = controller;
    }
    if let Some(first_mover) = cli.first_mover {
        app_config.relay.first_mover = first_mover;
    }
    app_config.validate().context("validating overridden config")?;

    let simulator = Simulator::new(
        app_config.simulation.clone(),
        app_config.rewards,
        app_config.relay.clone(),
    );
    let report = simulator.run();

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{}", json);
    } else {
        println!("-------------------------------------------");
        println!("Episodes:   {}", report.episodes);
        println!("Wins:       {} ({:.1}%)", report.wins, report.win_rate() * 100.0);
        println!("Losses:     {} ({:.1}%)", report.losses, report.loss_rate() * 100.0);
        println!("Draws:      {} ({:.1}%)", report.draws, report.draw_rate() * 100.0);
        println!("Invalid:    {}", report.invalid);
        println!("Unfinished: {}", report.unfinished);
        println!("Avg reward: {:.2}", report.average_reward());
        println!("Avg length: {:.2}", report.average_length());
    }
    Ok(())
}
