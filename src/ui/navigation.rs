//! Cyclic active-index navigation shared by the menu and the result overlay.

use tracing::instrument;

use crate::keys::Key;

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// Towards index 0, wrapping to the last item.
    Up,
    /// Towards the last item, wrapping to index 0.
    Down,
}

impl NavDirection {
    /// Navigation direction bound to `key`, if any.
    #[instrument]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            _ => None,
        }
    }
}

/// Highlighted position in a list of `count` items, modulo `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveIndex {
    index: usize,
    count: usize,
}

impl ActiveIndex {
    /// Starts at index 0 of `count` items.
    #[instrument]
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    /// Current index.
    pub fn get(self) -> usize {
        self.index
    }

    /// Number of items.
    pub fn count(self) -> usize {
        self.count
    }

    /// Moves one step and returns the new index. An empty list stays at 0.
    #[instrument]
    pub fn step(&mut self, direction: NavDirection) -> usize {
        if self.count == 0 {
            return 0;
        }
        self.index = match direction {
            NavDirection::Up if self.index == 0 => self.count - 1,
            NavDirection::Up => self.index - 1,
            NavDirection::Down => (self.index + 1) % self.count,
        };
        self.index
    }

    /// Back to index 0.
    #[instrument]
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_from_zero_wraps_to_last() {
        let mut active = ActiveIndex::new(3);
        assert_eq!(active.step(NavDirection::Up), 2);
    }

    #[test]
    fn test_down_from_last_wraps_to_zero() {
        let mut active = ActiveIndex::new(3);
        active.step(NavDirection::Down);
        active.step(NavDirection::Down);
        assert_eq!(active.step(NavDirection::Down), 0);
    }

    #[test]
    fn test_empty_list_never_moves() {
        let mut active = ActiveIndex::new(0);
        assert_eq!(active.step(NavDirection::Down), 0);
        assert_eq!(active.step(NavDirection::Up), 0);
    }
}
