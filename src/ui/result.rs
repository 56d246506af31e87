//! Win/lose overlay with its restart/menu buttons.

use std::rc::Rc;

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument};

use crate::audio::{SharedAudio, Track};
use crate::error::ShellError;
use crate::events::{Event, Outcome, ResultAction};
use crate::keys::Key;
use crate::mediator::Mediator;
use crate::stage::StageReader;
use crate::surface::{ContainerId, SharedSurface};
use crate::text::filled_zero_text;
use crate::ui::navigation::{ActiveIndex, NavDirection};

/// Headline shown after a won run.
pub const WIN_TEXT: &str = "YOU WIN!";
/// Headline shown after any other outcome.
pub const LOSE_TEXT: &str = "GAME OVER";

/// A button on the result overlay.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ResultButton {
    #[new(into)]
    label: String,
    action: ResultAction,
}

/// Containers and buttons of the result overlay.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ResultBlocks {
    text: ContainerId,
    score: ContainerId,
    buttons_container: ContainerId,
    buttons: Vec<ResultButton>,
}

/// Shows the outcome of a run and turns Enter into [`Event::ResultChosen`].
#[derive(Debug)]
pub struct ResultManager {
    audio: SharedAudio,
    mediator: Rc<Mediator>,
    stage: StageReader,
    surface: SharedSurface,
    blocks: Option<ResultBlocks>,
    active: ActiveIndex,
}

impl ResultManager {
    /// Creates the overlay and registers its tracks.
    #[instrument(skip_all)]
    pub fn new(
        audio: SharedAudio,
        mediator: Rc<Mediator>,
        stage: StageReader,
        surface: SharedSurface,
    ) -> Self {
        audio.borrow_mut().add_music_list(vec![
            Track::new("button", "button.mp3", false),
            Track::new("enter", "enter.mp3", false),
        ]);
        Self {
            audio,
            mediator,
            stage,
            surface,
            blocks: None,
            active: ActiveIndex::default(),
        }
    }

    /// Binds the overlay containers and renders the buttons.
    #[instrument(skip(self))]
    pub fn set_blocks(&mut self, blocks: ResultBlocks) -> Result<(), ShellError> {
        if blocks.buttons.is_empty() {
            return Err(ShellError::configuration("Result overlay needs buttons"));
        }

        {
            let mut surface = self.surface.borrow_mut();
            for container in [&blocks.text, &blocks.score, &blocks.buttons_container] {
                if !surface.contains(container) {
                    return Err(ShellError::configuration(format!(
                        "Result container '{}' not on surface",
                        container
                    )));
                }
            }
            let labels: Vec<String> = blocks.buttons.iter().map(|b| b.label.clone()).collect();
            surface.render_list(&blocks.buttons_container, &labels)?;
            surface.mark_active(&blocks.buttons_container, Some(0))?;
        }

        self.active = ActiveIndex::new(blocks.buttons.len());
        self.blocks = Some(blocks);
        Ok(())
    }

    /// Writes the headline and the final score.
    #[instrument(skip(self))]
    pub fn update_result(&mut self, outcome: Outcome, score: u64) -> Result<(), ShellError> {
        let blocks = self.bound()?;
        let headline = match outcome {
            Outcome::Win => WIN_TEXT,
            Outcome::Lose => LOSE_TEXT,
        };
        let mut surface = self.surface.borrow_mut();
        surface.set_text(blocks.text(), headline)?;
        surface.set_text(blocks.score(), &filled_zero_text(score))?;
        info!(%outcome, score, "Result shown");
        Ok(())
    }

    /// Highlights the first button again.
    #[instrument(skip(self))]
    pub fn reset_selection(&mut self) -> Result<(), ShellError> {
        let container = self.bound()?.buttons_container().clone();
        self.active.reset();
        self.surface.borrow_mut().mark_active(&container, Some(0))
    }

    /// Index of the highlighted button.
    pub fn active_index(&self) -> usize {
        self.active.get()
    }

    /// Handles a key. Only honoured while a result is shown.
    ///
    /// Returns `false` when the key was ignored.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: Key) -> Result<bool, ShellError> {
        if !self.stage.get().is_result() {
            debug!(stage = %self.stage.get(), "Result overlay ignores keys");
            return Ok(false);
        }

        if let Some(direction) = NavDirection::from_key(key) {
            self.change_active(direction)?;
            return Ok(true);
        }

        match key {
            Key::Enter => {
                self.confirm()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    fn change_active(&mut self, direction: NavDirection) -> Result<(), ShellError> {
        let container = self.bound()?.buttons_container().clone();
        let index = self.active.step(direction);
        self.audio.borrow_mut().music_play("button");
        self.surface
            .borrow_mut()
            .mark_active(&container, Some(index))?;
        debug!(index, "Result highlight moved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn confirm(&mut self) -> Result<(), ShellError> {
        let action = *self.bound()?.buttons()[self.active.get()].action();
        self.audio.borrow_mut().music_play("enter");
        info!(%action, "Result button confirmed");
        self.mediator.publish(Event::ResultChosen { action });
        Ok(())
    }

    #[instrument(skip(self))]
    fn bound(&self) -> Result<&ResultBlocks, ShellError> {
        self.blocks
            .as_ref()
            .ok_or_else(|| ShellError::configuration("Result overlay used before its blocks were set"))
    }
}
