use std::io;

use thiserror::Error;

use crate::BoardInt;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("board size must be positive, got {0}")]
    BoardSize(BoardInt),

    #[error("tick interval must be greater than zero")]
    ZeroTick,

    #[error("a {size}x{size} board needs a {needed_width}x{size} terminal, this one is {width}x{height}")]
    BoardTooLarge { size: BoardInt, needed_width: BoardInt, width: u16, height: u16 },
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
