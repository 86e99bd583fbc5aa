use std::{thread::sleep, time::Duration};

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::pickup::Pickup;
use crate::snake::{Direction, Snake};
use crate::{BoardInt, Coords};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

/// Where the game gets the player's commands from. Must not block.
pub trait InputSource {
    fn poll_command(&mut self) -> Result<Option<Command>, GameError>;
}

pub trait Renderer {
    /// Takes over the display. `restore` runs afterwards even if this fails halfway.
    fn setup(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn restore(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn render(&mut self, snake: &[Coords], pickup: Coords, board_size: BoardInt) -> Result<(), GameError>;
    fn report_game_over(&mut self, score: usize) -> Result<(), GameError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickResult {
    Running,
    GameOver { score: usize },
}

pub struct GameState {
    board_size: BoardInt,
    snake: Snake,
    pickup: Pickup,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let center = (config.board_size / 2, config.board_size / 2);
        let snake = Snake::new(center, config.board_size);
        let pickup = Pickup::new(config.board_size, config.seed);
        GameState::with_parts(config.board_size, snake, pickup)
    }

    pub fn with_parts(board_size: BoardInt, snake: Snake, pickup: Pickup) -> Self {
        GameState { board_size, snake, pickup }
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn pickup(&self) -> &Pickup {
        &self.pickup
    }

    /// Plays a single step: read input, move, then draw or end the game.
    pub fn tick<T: InputSource + Renderer>(&mut self, io: &mut T) -> Result<TickResult, GameError> {
        match io.poll_command()? {
            Some(Command::Turn(dir)) => {
                debug!(from = ?self.snake.direction(), to = ?dir, "direction change");
                self.snake.set_direction(dir);
            },
            Some(Command::Quit) => {
                info!("player quit");
                self.snake.kill();
            },
            None => {},
        }

        self.snake.step(&mut self.pickup);
        if self.snake.is_dead() {
            let score = self.snake.count_segments();
            io.report_game_over(score)?;
            return Ok(TickResult::GameOver { score });
        }

        let body: Vec<Coords> = self.snake.segments().collect();
        io.render(&body, self.pickup.pos(), self.board_size)?;
        Ok(TickResult::Running)
    }

    /// Runs until the snake dies or the player quits, returning the final score.
    pub fn run<T: InputSource + Renderer>(&mut self, io: &mut T, tick: Duration) -> Result<usize, GameError> {
        loop {
            match self.tick(io)? {
                TickResult::GameOver { score } => return Ok(score),
                TickResult::Running => sleep(tick),
            }
        }
    }

    /// Sets up the display, plays a full game and always hands the display back.
    pub fn play<T: InputSource + Renderer>(&mut self, io: &mut T, tick: Duration) -> Result<usize, GameError> {
        let res = io.setup().and_then(|_| self.run(io, tick));
        let restored = io.restore();

        let score = res?;
        restored?;
        Ok(score)
    }
}
