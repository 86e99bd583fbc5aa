use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};

use crate::error::{ConfigError, GameError};
use crate::game::{Command, InputSource, Renderer};
use crate::snake::Direction::*;
use crate::{BoardInt, Coords};

const SEGMENT_CELL: &str = "# ";
const PICKUP_CELL: &str = "@ ";
const EMPTY_CELL: &str = "- ";

pub type TermInt = u16;

#[derive(Copy, Clone)]
enum Cell {
    Empty,
    Segment,
    Pickup,
}

/// Owns the terminal: draws the board in a window centered on screen and reads keys.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    origin: (TermInt, TermInt),
    stdout: Stdout,
}

impl TermManager {
    pub fn new(board_size: BoardInt) -> Result<Self, GameError> {
        let (width, height) = terminal::size()?;
        TermManager::with_size(width, height, board_size).map_err(GameError::from)
    }

    /// Fails when a board of `board_size` cells (two columns each) doesn't fit on screen.
    pub fn with_size(width: TermInt, height: TermInt, board_size: BoardInt) -> Result<Self, ConfigError> {
        let needed_width = board_size.saturating_mul(2);
        if needed_width > width as BoardInt || board_size > height as BoardInt {
            return Err(ConfigError::BoardTooLarge { size: board_size, needed_width, width, height });
        }

        let left = width as BoardInt / 2 - board_size;
        let top = height as BoardInt / 2 - board_size / 2;
        let origin = (left as TermInt, top as TermInt);

        Ok(TermManager { width, height, origin, stdout: stdout() })
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent, GameError> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), text: &str) -> Result<(), GameError> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(text))?;
        Ok(())
    }
}

impl InputSource for TermManager {
    fn poll_command(&mut self) -> Result<Option<Command>, GameError> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(command_for_key(&ev)));
            }
        }

        Ok(None)
    }
}

impl Renderer for TermManager {
    fn setup(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), GameError> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn render(&mut self, snake: &[Coords], pickup: Coords, board_size: BoardInt) -> Result<(), GameError> {
        let (left, top) = self.origin;
        for (row, line) in board_rows(snake, pickup, board_size).iter().enumerate() {
            self.print_at((left, top + row as TermInt), line)?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn report_game_over(&mut self, score: usize) -> Result<(), GameError> {
        let message = game_over_message(score);
        let x = (self.width as usize / 2).saturating_sub(message.len() / 2) as TermInt;
        let y = self.height.saturating_sub(1);

        self.print_at((x, y), &message)?;
        self.stdout.flush()?;

        self.read_key_blocking()?;
        Ok(())
    }
}

/// One string per board row, top to bottom. The pickup is drawn over the snake.
pub fn board_rows(snake: &[Coords], pickup: Coords, board_size: BoardInt) -> Vec<String> {
    let n = board_size as usize;
    let mut board = vec![Cell::Empty; n * n];

    for &(x, y) in snake {
        board[y as usize * n + x as usize] = Cell::Segment;
    }
    board[pickup.1 as usize * n + pickup.0 as usize] = Cell::Pickup;

    board
        .chunks(n)
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Empty => EMPTY_CELL,
                    Cell::Segment => SEGMENT_CELL,
                    Cell::Pickup => PICKUP_CELL,
                })
                .collect::<String>()
        })
        .collect()
}

pub fn game_over_message(score: usize) -> String {
    format!("GAME OVER! Your Score: {}", score)
}

/// Arrow keys and WASD steer, anything else means the player wants out.
pub fn command_for_key(ev: &KeyEvent) -> Command {
    if ev.modifiers.contains(KeyModifiers::CONTROL) {
        return Command::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Command::Turn(Up),
        KeyCode::Char('a') | KeyCode::Left => Command::Turn(Left),
        KeyCode::Char('s') | KeyCode::Down => Command::Turn(Down),
        KeyCode::Char('d') | KeyCode::Right => Command::Turn(Right),
        _ => Command::Quit,
    }
}
