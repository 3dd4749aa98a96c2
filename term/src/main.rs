use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use sweeper_core::Game;

mod config;
mod ui;

use config::{GameArgs, Settings};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Write logs to this file, the terminal is taken by the board
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    game: GameArgs,
}

fn init_logger(path: &Path, level: log::LevelFilter) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Error initializing logger")
}

fn random_seed() -> u64 {
    use rand::Rng;
    rand::rng().random()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logger(path, args.verbose.log_level_filter())?;
    }

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.apply(&args.game);

    let seed = settings.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {}", seed);

    let mut game = Game::with_seed(settings.game, seed).context("invalid game settings")?;
    ui::run(&mut game)
}
