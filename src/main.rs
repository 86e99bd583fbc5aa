mod config;
mod error;
mod game;
mod pickup;
mod snake;
mod term;

use std::{fs::File, process::exit, sync::Mutex};

use clap::Parser;
use tracing::info;

use crate::config::{Cli, GameConfig};
use crate::error::GameError;
use crate::game::GameState;
use crate::term::TermManager;

pub type BoardInt = i32;
pub type Coords = (BoardInt, BoardInt);

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GameError> {
    if let Some(path) = &cli.log_file {
        init_logging(File::create(path)?);
    }

    let config = GameConfig::try_from(&cli)?;
    info!(board_size = config.board_size, tick_ms = config.tick.as_millis() as u64, "starting game");

    let mut term = TermManager::new(config.board_size)?;
    let score = GameState::new(&config).play(&mut term, config.tick)?;
    info!(score, "game finished");
    Ok(())
}

fn init_logging(file: File) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "torus_snake=info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}
