//! The closed set of keys the shell reacts to.

use crossterm::event::KeyCode;
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// A recognized key press.
///
/// Variant names double as DOM-style key codes (`"ArrowUp"`, `"Enter"`, ...),
/// so `"ArrowUp".parse::<Key>()` works. Any other code is ignored by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow right.
    ArrowRight,
    /// Arrow left.
    ArrowLeft,
    /// Confirm.
    Enter,
    /// Leave the running game.
    Escape,
    /// Game-specific action.
    Space,
}

impl Key {
    /// Maps a crossterm key code to a shell key.
    #[instrument]
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(Self::ArrowUp),
            KeyCode::Down => Some(Self::ArrowDown),
            KeyCode::Right => Some(Self::ArrowRight),
            KeyCode::Left => Some(Self::ArrowLeft),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Esc => Some(Self::Escape),
            KeyCode::Char(' ') => Some(Self::Space),
            _ => None,
        }
    }

    /// Parses a DOM-style key code such as `"ArrowDown"`.
    #[instrument]
    pub fn from_dom_code(code: &str) -> Option<Self> {
        code.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_codes_round_trip_names() {
        assert_eq!(Key::from_dom_code("ArrowUp"), Some(Key::ArrowUp));
        assert_eq!(Key::from_dom_code("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_dom_code("Space"), Some(Key::Space));
        assert_eq!(Key::from_dom_code("KeyQ"), None);
    }

    #[test]
    fn test_unrecognized_key_codes_are_dropped() {
        assert_eq!(Key::from_key_code(KeyCode::Char('x')), None);
        assert_eq!(Key::from_key_code(KeyCode::Tab), None);
        assert_eq!(Key::from_key_code(KeyCode::Char(' ')), Some(Key::Space));
    }
}
