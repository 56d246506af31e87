//! Top-level application stage and its transition table.

use std::cell::Cell;
use std::rc::Rc;

use strum::{Display, EnumIter};
use tracing::{debug, info, instrument};

use crate::events::Outcome;

/// Top-level mode of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// Game selection menu.
    #[default]
    Menu,
    /// A game is running.
    Playing,
    /// Result overlay after a won run.
    Win,
    /// Result overlay after a lost run.
    Lose,
}

impl Stage {
    /// True while the result overlay is shown.
    #[instrument]
    pub fn is_result(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

/// Inputs of the stage machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum StageTrigger {
    /// A menu entry was confirmed.
    MenuEntered,
    /// The running game reported a win.
    Won,
    /// The running game reported a loss.
    Lost,
    /// Restart chosen on the result overlay.
    Restart,
    /// Menu chosen on the result overlay.
    BackToMenu,
    /// The player left the running game.
    Exit,
}

impl From<Outcome> for StageTrigger {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Self::Won,
            Outcome::Lose => Self::Lost,
        }
    }
}

/// Finite-state machine over [`Stage`].
///
/// Owned by the [`GameManager`](crate::GameManager), which is the only
/// writer. Everyone else observes it through a [`StageReader`].
#[derive(Debug)]
pub struct StageMachine {
    current: Rc<Cell<Stage>>,
}

impl StageMachine {
    /// Creates a machine in [`Stage::Menu`].
    #[instrument]
    pub fn new() -> Self {
        Self {
            current: Rc::new(Cell::new(Stage::Menu)),
        }
    }

    /// The transition table. `None` means the trigger is not valid in `from`.
    #[instrument]
    pub fn next(from: Stage, trigger: StageTrigger) -> Option<Stage> {
        use Stage::*;
        use StageTrigger::*;

        match (from, trigger) {
            (Menu, MenuEntered) => Some(Playing),
            (Playing, Won) => Some(Win),
            (Playing, Lost) => Some(Lose),
            (Playing, Exit) => Some(Menu),
            (Win | Lose, Restart) => Some(Playing),
            (Win | Lose, BackToMenu) => Some(Menu),
            _ => None,
        }
    }

    /// Current stage.
    #[instrument(skip(self))]
    pub fn current(&self) -> Stage {
        self.current.get()
    }

    /// Read-only view sharing this machine's state.
    #[instrument(skip(self))]
    pub fn reader(&self) -> StageReader {
        StageReader {
            current: Rc::clone(&self.current),
        }
    }

    /// Applies `trigger`, returning the new stage, or `None` if it was ignored.
    #[instrument(skip(self))]
    pub fn apply(&mut self, trigger: StageTrigger) -> Option<Stage> {
        let from = self.current.get();
        match Self::next(from, trigger) {
            Some(to) => {
                info!(%from, %to, %trigger, "Stage transition");
                self.current.set(to);
                Some(to)
            }
            None => {
                debug!(stage = %from, %trigger, "Trigger ignored in current stage");
                None
            }
        }
    }
}

impl Default for StageMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle on the current [`Stage`].
#[derive(Debug, Clone)]
pub struct StageReader {
    current: Rc<Cell<Stage>>,
}

impl StageReader {
    /// Current stage.
    #[instrument(skip(self))]
    pub fn get(&self) -> Stage {
        self.current.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_follows_machine() {
        let mut machine = StageMachine::new();
        let reader = machine.reader();
        assert_eq!(reader.get(), Stage::Menu);

        machine.apply(StageTrigger::MenuEntered);
        assert_eq!(reader.get(), Stage::Playing);
    }

    #[test]
    fn test_result_stages() {
        assert!(Stage::Win.is_result());
        assert!(Stage::Lose.is_result());
        assert!(!Stage::Menu.is_result());
        assert!(!Stage::Playing.is_result());
    }

    #[test]
    fn test_outcome_maps_to_trigger() {
        assert_eq!(StageTrigger::from(Outcome::Win), StageTrigger::Won);
        assert_eq!(StageTrigger::from(Outcome::Lose), StageTrigger::Lost);
    }
}
