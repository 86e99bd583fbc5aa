use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::BoardInt;
use crate::error::ConfigError;

pub const DEFAULT_BOARD_SIZE: BoardInt = 10;
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Snake on a wrap-around board. Arrow keys or WASD to steer, any other key quits.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Edge length of the square board
    #[arg(short = 'n', long, default_value_t = DEFAULT_BOARD_SIZE, allow_negative_numbers = true)]
    pub size: BoardInt,

    /// Delay between two game steps, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Seed for pickup placement, random if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub board_size: BoardInt,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(board_size: BoardInt, tick: Duration, seed: Option<u64>) -> Result<Self, ConfigError> {
        if board_size <= 0 {
            return Err(ConfigError::BoardSize(board_size));
        }

        if tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        Ok(GameConfig { board_size, tick, seed })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl TryFrom<&Cli> for GameConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        GameConfig::new(cli.size, Duration::from_millis(cli.tick_ms), cli.seed)
    }
}
