//! twenty48 - headless autoplay
//!
//! Plays one game with a built-in policy and prints the final grid.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use twenty48_engine::{
    autoplay, AutoplayConfig, Game, GameConfig, GreedyPolicy, Policy, RandomPolicy, TileRng,
};

/// Play a 2048-style game with an automated policy
#[derive(Parser, Debug)]
#[command(name = "twenty48")]
#[command(about = "Headless 2048 autoplay", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML file with `size`, `four_probability`, and `seed`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board side length (overrides the config file)
    #[arg(long)]
    size: Option<usize>,

    /// Spawn seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Move-choosing policy
    #[arg(long, value_enum, default_value = "greedy")]
    policy: PolicyKind,

    /// Stop after this many moves
    #[arg(long, default_value = "100000")]
    max_moves: u32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    Random,
    Greedy,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::new(),
    };
    if let Some(size) = cli.size {
        config = config.with_size(size);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut policy: Box<dyn Policy> = match cli.policy {
        PolicyKind::Random => Box::new(RandomPolicy),
        PolicyKind::Greedy => Box::new(GreedyPolicy),
    };

    let mut game = Game::new(config.clone()).context("starting game")?;
    let mut policy_rng = TileRng::new(config.seed).fork();
    let autoplay_config = AutoplayConfig::new().with_max_moves(cli.max_moves);

    info!(policy = policy.name(), size = config.size, seed = config.seed, "Playing");
    let summary = autoplay(&mut game, policy.as_mut(), &mut policy_rng, &autoplay_config)?;

    print!("{}", game.grid());
    println!(
        "score: {}  moves: {}  max tile: {}  {}",
        summary.score,
        summary.moves,
        summary.max_tile,
        if summary.finished { "game over" } else { "move cap reached" }
    );
    Ok(())
}
