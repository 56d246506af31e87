//! Assembles the mediator, surface, audio, UI and games into a running shell.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, instrument};

use crate::audio::{AudioManager, SharedAudio};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::game_manager::GameManager;
use crate::games::{Breakout, Game2048, Snake};
use crate::mediator::Mediator;
use crate::registry::GameEntry;
use crate::stage::StageMachine;
use crate::surface::{MemorySurface, SharedSurface};
use crate::ui::{HelperItem, ShellLayout, UiManager};

/// The bundled game registry: snake, 2048 and breakout.
#[instrument(skip(mediator))]
pub fn default_games(mediator: &Rc<Mediator>, seed: u64) -> Vec<GameEntry> {
    vec![
        GameEntry::new(
            "snake",
            Box::new(Snake::new(Rc::clone(mediator), seed)),
            vec![
                HelperItem::new("arrow right →", "Turn right"),
                HelperItem::new("arrow left ←", "Turn left"),
                HelperItem::new("arrow up ↑", "Turn up"),
                HelperItem::new("arrow down ↓", "Turn down"),
                HelperItem::new("esc", "Exit"),
            ],
        ),
        GameEntry::new(
            "2048",
            Box::new(Game2048::new(Rc::clone(mediator), seed.wrapping_add(1))),
            vec![
                HelperItem::new("arrow right →", "Slide right"),
                HelperItem::new("arrow left ←", "Slide left"),
                HelperItem::new("arrow up ↑", "Slide up"),
                HelperItem::new("arrow down ↓", "Slide down"),
                HelperItem::new("esc", "Exit"),
            ],
        ),
        GameEntry::new(
            "breakout",
            Box::new(Breakout::new(Rc::clone(mediator))),
            vec![
                HelperItem::new("arrow right →", "Move right"),
                HelperItem::new("arrow left ←", "Move left"),
                HelperItem::new("space", "Launch ball"),
                HelperItem::new("esc", "Exit"),
            ],
        ),
    ]
}

/// A fully wired shell and the handles the front end draws from.
#[derive(Debug)]
pub struct Shell {
    manager: GameManager,
    surface: Rc<RefCell<MemorySurface>>,
    audio: Rc<RefCell<AudioManager>>,
    mediator: Rc<Mediator>,
    layout: ShellLayout,
}

impl Shell {
    /// Builds a shell around the bundled games.
    #[instrument(skip(config))]
    pub fn new(config: &ShellConfig) -> Result<Self, ShellError> {
        let seed = config.seed().unwrap_or_else(rand::random);
        info!(seed, "Seeding bundled games");
        Self::with_games(config, |mediator| default_games(mediator, seed))
    }

    /// Builds a shell around the games returned by `games`.
    ///
    /// `games` receives the mediator the games must publish on.
    #[instrument(skip(config, games))]
    pub fn with_games<F>(config: &ShellConfig, games: F) -> Result<Self, ShellError>
    where
        F: FnOnce(&Rc<Mediator>) -> Vec<GameEntry>,
    {
        let layout = ShellLayout::standard();
        let mediator = Rc::new(Mediator::new());
        let surface = Rc::new(RefCell::new(MemorySurface::with_containers(
            layout.containers(),
        )));
        let audio = Rc::new(RefCell::new(AudioManager::new(
            *config.audio().muted(),
            *config.audio().bell(),
            *config.audio().volume(),
        )));

        let stage = StageMachine::new();
        let shared_surface: SharedSurface = surface.clone();
        let shared_audio: SharedAudio = audio.clone();
        let ui = UiManager::new(
            shared_audio,
            Rc::clone(&mediator),
            stage.reader(),
            shared_surface,
        );

        let entries = games(&mediator);
        let manager = GameManager::init(entries, stage, ui, Rc::clone(&mediator), &layout)?;

        Ok(Self {
            manager,
            surface,
            audio,
            mediator,
            layout,
        })
    }

    /// The game manager.
    pub fn manager(&self) -> &GameManager {
        &self.manager
    }

    /// The game manager, mutably.
    pub fn manager_mut(&mut self) -> &mut GameManager {
        &mut self.manager
    }

    /// The surface every manager writes to.
    pub fn surface(&self) -> std::cell::Ref<'_, MemorySurface> {
        self.surface.borrow()
    }

    /// The audio manager.
    pub fn audio(&self) -> std::cell::Ref<'_, AudioManager> {
        self.audio.borrow()
    }

    /// The shared bus.
    pub fn mediator(&self) -> &Rc<Mediator> {
        &self.mediator
    }

    /// Container layout.
    pub fn layout(&self) -> &ShellLayout {
        &self.layout
    }
}
