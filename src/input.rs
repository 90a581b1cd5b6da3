use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Velocity;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the unit step for this direction. Up is positive y.
    #[must_use]
    pub fn velocity(self) -> Velocity {
        match self {
            Self::Up => Velocity::UP,
            Self::Down => Velocity::DOWN,
            Self::Left => Velocity::LEFT,
            Self::Right => Velocity::RIGHT,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Reset,
    Quit,
}

/// Resolves a direction request against the current velocity.
///
/// An exact reversal keeps `current`; anything else adopts the request.
#[must_use]
pub fn propose(current: Velocity, requested: Direction) -> Velocity {
    let candidate = requested.velocity();
    if candidate.is_reverse_of(current) {
        current
    } else {
        candidate
    }
}

/// Maps a terminal key event to a game input. Unknown keys map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            .then_some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Direction(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
            GameInput::Reset
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Non-blocking keyboard reader for the terminal front end.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Drains pending terminal events and returns the most recent game input.
    ///
    /// `Quit` is sticky within one drain so it cannot be overwritten by a
    /// later key in the same batch.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        let mut latest = None;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            match map_key(key) {
                Some(GameInput::Quit) => return Ok(Some(GameInput::Quit)),
                Some(input) => latest = Some(input),
                None => {}
            }
        }

        Ok(latest)
    }
}
