use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ml_quarto::ai::{build_player, HumanPlayer, Player, PlayerKind};
use ml_quarto::config::AppConfig;
use ml_quarto::env::{FirstMover, OpponentRelay, TurnEnvironment, Winner};

/// Play Quarto at the terminal against a built-in opponent.
#[derive(Parser)]
#[command(name = "ml_quarto", about = "Play Quarto against a built-in opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the opponent
    #[arg(long, value_enum)]
    opponent: Option<PlayerKind>,

    /// Override who makes the opening hand-over
    #[arg(long, value_enum)]
    first_mover: Option<FirstMover>,

    /// Seed the opponent and the coin flip
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(opponent) = cli.opponent {
        app_config.relay.opponent = opponent;
    }
    if let Some(first_mover) = cli.first_mover {
        app_config.relay.first_mover = first_mover;
    }
    if cli.seed.is_some() {
        app_config.relay.seed = cli.seed;
    }

    let opponent = build_player(app_config.relay.opponent, None);
    let mut relay = OpponentRelay::new(
        TurnEnvironment::new(app_config.rewards),
        opponent,
        app_config.relay.first_mover,
    );
    if let Some(seed) = app_config.relay.seed {
        relay.seed(seed);
    }

    let stdin = io::stdin();
    let mut human = HumanPlayer::new(stdin.lock(), io::stdout());

    println!("Quarto: you vs {}", relay.opponent().name());
    println!("Pieces are written as four letters: T/s tall or short, H/f hollow or filled,");
    println!("D/l dark or light, R/q round or square. Ids 0-15 work too.");

    let mut observation = relay.reset();
    if relay.opponent_first() {
        println!("{} opens the game.", relay.opponent().name());
    }

    let mut last = relay.opening_result();
    let mut total = last.map_or(0.0, |r| r.reward);
    while !relay.done() {
        let action = human.select_action(&observation);
        let result = relay.step(action);
        total += result.reward;
        observation = result.observation;
        last = Some(result);
    }

    println!("\n{}", relay.render());
    let winner = last.and_then(|r| r.info.winner);
    match winner {
        Some(Winner::Agent) => println!("You win!"),
        Some(Winner::Env) => println!("{} wins.", relay.opponent().name()),
        Some(Winner::Draw) => println!("It's a draw."),
        None => println!("Game ended without a result."),
    }
    println!("Total reward: {}", total);
    Ok(())
}
