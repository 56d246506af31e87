//! Game capability contract and registry entries.

use std::fmt;

use derive_getters::Getters;
use tracing::instrument;

use crate::keys::Key;
use crate::ui::HelperItem;

/// What a pluggable game must offer the shell.
///
/// Games report progress on their own through the mediator:
/// [`Event::ScoreUpdated`](crate::Event::ScoreUpdated) while running and
/// exactly one [`Event::GameOutcome`](crate::Event::GameOutcome) when a run ends.
pub trait GameHandle: fmt::Debug {
    /// Begins a fresh run.
    fn start(&mut self);

    /// Ends the current run. Must be safe to call on a stopped game.
    fn stop(&mut self);

    /// Freezes the run without ending it. Unused by the shell so far.
    fn pause(&mut self) {}

    /// Keys routed to the game while it is running.
    fn handle_key(&mut self, _key: Key) {}

    /// Advances the simulation by one frame.
    fn tick(&mut self) {}

    /// Text rendering of the playfield.
    fn view(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A selectable game with its control hints.
#[derive(Getters)]
pub struct GameEntry {
    name: String,
    #[getter(skip)]
    game: Box<dyn GameHandle>,
    helper: Vec<HelperItem>,
}

impl GameEntry {
    /// Creates a registry entry.
    #[instrument(skip(name, game, helper))]
    pub fn new(name: impl Into<String>, game: Box<dyn GameHandle>, helper: Vec<HelperItem>) -> Self {
        Self {
            name: name.into(),
            game,
            helper,
        }
    }

    /// The game.
    pub fn game(&self) -> &dyn GameHandle {
        self.game.as_ref()
    }

    /// The game, mutably.
    pub fn game_mut(&mut self) -> &mut dyn GameHandle {
        self.game.as_mut()
    }
}

impl fmt::Debug for GameEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEntry")
            .field("name", &self.name)
            .field("helper", &self.helper.len())
            .finish_non_exhaustive()
    }
}
