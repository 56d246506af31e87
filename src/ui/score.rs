//! Live score display.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, instrument};

use crate::error::ShellError;
use crate::events::{Event, EventKind, ScoreSnapshot};
use crate::mediator::{Mediator, SubscriptionId};
use crate::stage::{Stage, StageReader};
use crate::surface::{ContainerId, SharedSurface};
use crate::text::filled_zero_text;

/// Writes the current and best score of the running game.
#[derive(Debug)]
pub struct ScoreManager {
    surface: SharedSurface,
    stage: StageReader,
    current: Option<ContainerId>,
    max: Option<ContainerId>,
}

impl ScoreManager {
    /// Creates an unbound score manager.
    #[instrument(skip_all)]
    pub fn new(surface: SharedSurface, stage: StageReader) -> Self {
        Self {
            surface,
            stage,
            current: None,
            max: None,
        }
    }

    /// Routes [`Event::ScoreUpdated`] from `mediator` into `this`.
    #[instrument(skip_all)]
    pub fn subscribe(this: &Rc<RefCell<Self>>, mediator: &Mediator) -> SubscriptionId {
        let score = Rc::clone(this);
        mediator.subscribe(EventKind::ScoreUpdated, move |event| {
            if let Event::ScoreUpdated(snapshot) = event {
                score.borrow().update(*snapshot)?;
            }
            Ok(())
        })
    }

    /// Binds the two display containers.
    #[instrument(skip(self))]
    pub fn set_blocks(&mut self, current: ContainerId, max: ContainerId) -> Result<(), ShellError> {
        {
            let surface = self.surface.borrow();
            for container in [&current, &max] {
                if !surface.contains(container) {
                    return Err(ShellError::configuration(format!(
                        "Score container '{}' not on surface",
                        container
                    )));
                }
            }
        }
        self.current = Some(current);
        self.max = Some(max);
        Ok(())
    }

    /// Rewrites both displays. Ignored while the menu is shown.
    ///
    /// Returns `false` when the update was ignored.
    #[instrument(skip(self))]
    pub fn update(&self, snapshot: ScoreSnapshot) -> Result<bool, ShellError> {
        if self.stage.get() == Stage::Menu {
            debug!("Score update ignored in menu");
            return Ok(false);
        }
        self.write(snapshot)?;
        Ok(true)
    }

    /// Writes zeros to the current display, keeping the best one.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), ShellError> {
        let (current, _) = self.bound()?;
        self.surface
            .borrow_mut()
            .set_text(&current, &filled_zero_text(0))
    }

    #[instrument(skip(self))]
    fn write(&self, snapshot: ScoreSnapshot) -> Result<(), ShellError> {
        let (current, max) = self.bound()?;
        let mut surface = self.surface.borrow_mut();
        surface.set_text(&current, &filled_zero_text(snapshot.current))?;
        surface.set_text(&max, &filled_zero_text(snapshot.max))
    }

    #[instrument(skip(self))]
    fn bound(&self) -> Result<(ContainerId, ContainerId), ShellError> {
        match (&self.current, &self.max) {
            (Some(current), Some(max)) => Ok((current.clone(), max.clone())),
            _ => Err(ShellError::configuration(
                "Score used before its containers were set",
            )),
        }
    }
}
