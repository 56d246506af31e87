//! Game selection menu.

use std::rc::Rc;

use tracing::{debug, info, instrument};

use crate::audio::{SharedAudio, Track};
use crate::error::ShellError;
use crate::events::Event;
use crate::keys::Key;
use crate::mediator::Mediator;
use crate::stage::{Stage, StageReader};
use crate::surface::{ContainerId, SharedSurface};
use crate::ui::navigation::{ActiveIndex, NavDirection};

/// Renders the game names and turns Enter into [`Event::MenuEntered`].
#[derive(Debug)]
pub struct MenuManager {
    audio: SharedAudio,
    mediator: Rc<Mediator>,
    stage: StageReader,
    surface: SharedSurface,
    container: Option<ContainerId>,
    items: Vec<String>,
    active: ActiveIndex,
}

impl MenuManager {
    /// Creates the menu and registers its tracks.
    #[instrument(skip_all)]
    pub fn new(
        audio: SharedAudio,
        mediator: Rc<Mediator>,
        stage: StageReader,
        surface: SharedSurface,
    ) -> Self {
        audio.borrow_mut().add_music_list(vec![
            Track::new("menu", "menu.mp3", true).with_volume(0.3),
            Track::new("button", "button.mp3", false),
            Track::new("enter", "enter.mp3", false),
        ]);
        Self {
            audio,
            mediator,
            stage,
            surface,
            container: None,
            items: Vec::new(),
            active: ActiveIndex::default(),
        }
    }

    /// Renders one entry per name into `container` and marks the first.
    #[instrument(skip(self))]
    pub fn create_menu_buttons(
        &mut self,
        container: ContainerId,
        names: &[String],
    ) -> Result<(), ShellError> {
        if names.is_empty() {
            return Err(ShellError::configuration("Menu needs at least one entry"));
        }

        {
            let mut surface = self.surface.borrow_mut();
            if !surface.contains(&container) {
                return Err(ShellError::configuration(format!(
                    "Menu container '{}' not on surface",
                    container
                )));
            }
            surface.render_list(&container, names)?;
            surface.mark_active(&container, Some(0))?;
        }

        info!(count = names.len(), container = %container, "Menu rendered");
        self.items = names.to_vec();
        self.active = ActiveIndex::new(names.len());
        self.container = Some(container);
        Ok(())
    }

    /// Re-applies the highlight of the current entry.
    #[instrument(skip(self))]
    pub fn redisplay(&mut self) -> Result<(), ShellError> {
        let container = self.bound_container()?;
        self.surface
            .borrow_mut()
            .mark_active(&container, Some(self.active.get()))
    }

    /// Starts the menu music.
    #[instrument(skip(self))]
    pub fn play_music(&mut self) {
        self.audio.borrow_mut().music_play("menu");
    }

    /// Index of the highlighted entry.
    pub fn active_index(&self) -> usize {
        self.active.get()
    }

    /// Names shown in the menu.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Handles a key. Returns `false` when the key was ignored.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: Key) -> Result<bool, ShellError> {
        if self.stage.get() != Stage::Menu {
            debug!(stage = %self.stage.get(), "Menu ignores keys outside the menu");
            return Ok(false);
        }

        if let Some(direction) = NavDirection::from_key(key) {
            self.change_active(direction)?;
            return Ok(true);
        }

        match key {
            Key::Enter => {
                self.confirm();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    fn change_active(&mut self, direction: NavDirection) -> Result<(), ShellError> {
        let container = self.bound_container()?;
        let index = self.active.step(direction);
        self.audio.borrow_mut().music_play("button");
        self.surface
            .borrow_mut()
            .mark_active(&container, Some(index))?;
        debug!(index, "Menu highlight moved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn confirm(&mut self) {
        let index = self.active.get();
        {
            let mut audio = self.audio.borrow_mut();
            audio.music_stop("menu");
            audio.music_play("enter");
        }
        info!(index, "Menu entry confirmed");
        self.mediator.publish(Event::MenuEntered { index });
    }

    #[instrument(skip(self))]
    fn bound_container(&self) -> Result<ContainerId, ShellError> {
        self.container
            .clone()
            .ok_or_else(|| ShellError::configuration("Menu used before its container was set"))
    }
}
