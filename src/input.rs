use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit step `(dx, dy)` for this heading. Screen coordinates:
    /// `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps one raw key event to a logical input.
///
/// Arrow keys and WASD (either case) resolve to the same four directions.
/// Anything unmapped, and key releases, are a no-op.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Up => GameInput::Direction(Direction::Up),
        KeyCode::Down => GameInput::Direction(Direction::Down),
        KeyCode::Left => GameInput::Direction(Direction::Left),
        KeyCode::Right => GameInput::Direction(Direction::Right),
        KeyCode::Enter => GameInput::Restart,
        KeyCode::Esc => GameInput::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => GameInput::Direction(Direction::Up),
            's' => GameInput::Direction(Direction::Down),
            'a' => GameInput::Direction(Direction::Left),
            'd' => GameInput::Direction(Direction::Right),
            'r' => GameInput::Restart,
            'q' => GameInput::Quit,
            _ => return None,
        },
        _ => return None,
    };

    Some(input)
}

/// Polls the terminal for key events and decodes them.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one terminal event and maps it.
    ///
    /// Returns `Ok(None)` on timeout and for events that carry no game input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{direction_change_is_valid, map_key, Direction, GameInput};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrows_and_letters_map_to_same_directions() {
        let pairs = [
            (KeyCode::Up, KeyCode::Char('w')),
            (KeyCode::Down, KeyCode::Char('S')),
            (KeyCode::Left, KeyCode::Char('a')),
            (KeyCode::Right, KeyCode::Char('D')),
        ];

        for (arrow, letter) in pairs {
            let mapped = map_key(press(arrow));
            assert!(matches!(mapped, Some(GameInput::Direction(_))));
            assert_eq!(mapped, map_key(press(letter)));
        }
    }

    #[test]
    fn control_keys_and_unknown_keys() {
        assert_eq!(map_key(press(KeyCode::Char('r'))), Some(GameInput::Restart));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Restart));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(map_key(release), None);
    }
}
