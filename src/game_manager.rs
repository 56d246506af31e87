//! Game manager: owns the stage machine and orchestrates game lifecycles.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, info, instrument, warn};

use crate::error::ShellError;
use crate::events::{Event, EventKind, Outcome, ResultAction};
use crate::keys::Key;
use crate::mediator::{Mediator, SubscriptionId};
use crate::registry::{GameEntry, GameHandle};
use crate::stage::{Stage, StageMachine, StageReader, StageTrigger};
use crate::ui::{ShellLayout, UiManager};

/// Event kinds that drive stage transitions.
const CONTROL_EVENTS: [EventKind; 4] = [
    EventKind::MenuEntered,
    EventKind::GameOutcome,
    EventKind::ResultChosen,
    EventKind::GameExited,
];

/// Drives the shell: menu → playing → win/lose → playing or menu.
///
/// Keys enter through [`GameManager::handle_key`], which routes them to the
/// one component that owns the current stage. A control event published on
/// the mediator is applied before `publish` returns; one raised while a key
/// or tick is being dispatched is applied as soon as that dispatch finishes.
#[derive(Debug)]
pub struct GameManager {
    core: Rc<RefCell<ManagerCore>>,
    mediator: Rc<Mediator>,
    pending: Rc<RefCell<VecDeque<Event>>>,
    subscriptions: Vec<SubscriptionId>,
}

/// State mutated by transitions, shared with the control subscriptions.
#[derive(Debug)]
struct ManagerCore {
    stage: StageMachine,
    entries: Vec<GameEntry>,
    active: Option<usize>,
    ui: UiManager,
}

impl GameManager {
    /// Wires the registry into the UI and enters the menu.
    ///
    /// # Errors
    ///
    /// Returns a configuration [`ShellError`] if the registry is empty, a
    /// game has no name, or any layout container is missing from the surface.
    #[instrument(skip(entries, stage, ui, mediator), fields(games = entries.len()))]
    pub fn init(
        entries: Vec<GameEntry>,
        stage: StageMachine,
        mut ui: UiManager,
        mediator: Rc<Mediator>,
        layout: &ShellLayout,
    ) -> Result<Self, ShellError> {
        if entries.is_empty() {
            return Err(ShellError::configuration("No games registered"));
        }
        if let Some(position) = entries.iter().position(|e| e.name().trim().is_empty()) {
            return Err(ShellError::configuration(format!(
                "Game at position {} has no name",
                position
            )));
        }
        if stage.current() != Stage::Menu {
            return Err(ShellError::configuration("Stage machine must start in the menu"));
        }

        let names: Vec<String> = entries.iter().map(|e| e.name().clone()).collect();
        ui.set_menu_items(layout.menu().clone(), &names)?;
        ui.set_score_items(layout.score_current().clone(), layout.score_max().clone())?;
        ui.set_result_blocks(layout.result().clone())?;
        ui.set_helper_block(layout.helper().clone())?;
        ui.set_default_helper_list()?;
        ui.play_music();

        let core = Rc::new(RefCell::new(ManagerCore {
            stage,
            entries,
            active: None,
            ui,
        }));
        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let subscriptions = CONTROL_EVENTS
            .iter()
            .map(|&kind| {
                let core = Rc::clone(&core);
                let queue = Rc::clone(&pending);
                mediator.subscribe(kind, move |event| {
                    queue.borrow_mut().push_back(event.clone());
                    // Busy core means a dispatch is running; it drains on exit.
                    if let Ok(mut core) = core.try_borrow_mut() {
                        core.drain(&queue)?;
                    }
                    Ok(())
                })
            })
            .collect();

        info!(games = ?names, "Game manager ready");
        Ok(Self {
            core,
            mediator,
            pending,
            subscriptions,
        })
    }

    /// Current stage.
    #[instrument(skip(self))]
    pub fn stage(&self) -> Stage {
        self.core.borrow().stage.current()
    }

    /// Read-only stage handle for other components.
    #[instrument(skip(self))]
    pub fn stage_reader(&self) -> StageReader {
        self.core.borrow().stage.reader()
    }

    /// Index of the game being played or showing its result.
    pub fn active_game(&self) -> Option<usize> {
        self.core.borrow().active
    }

    /// Name of the active game.
    pub fn active_name(&self) -> Option<String> {
        let core = self.core.borrow();
        core.active.map(|i| core.entries[i].name().clone())
    }

    /// Playfield of the active game.
    #[instrument(skip(self))]
    pub fn active_view(&self) -> Vec<String> {
        let core = self.core.borrow();
        core.active
            .map(|i| core.entries[i].game().view())
            .unwrap_or_default()
    }

    /// Registered game names, in menu order.
    pub fn game_names(&self) -> Vec<String> {
        self.core
            .borrow()
            .entries
            .iter()
            .map(|e| e.name().clone())
            .collect()
    }

    /// Registry entries, in menu order.
    pub fn entries(&self) -> Ref<'_, [GameEntry]> {
        Ref::map(self.core.borrow(), |core| core.entries.as_slice())
    }

    /// The UI facade.
    pub fn ui(&self) -> Ref<'_, UiManager> {
        Ref::map(self.core.borrow(), |core| &core.ui)
    }

    /// Routes one key press to the component owning the current stage.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: Key) -> Result<(), ShellError> {
        let mut core = self.core.borrow_mut();
        core.drain(&self.pending)?;
        match core.stage.current() {
            Stage::Menu => {
                core.ui.menu_key(key)?;
            }
            Stage::Playing if key == Key::Escape => {
                debug!("Leaving game on request");
                self.mediator.publish(Event::GameExited);
            }
            Stage::Playing => match core.active_game_mut() {
                Some(game) => game.handle_key(key),
                None => warn!("Playing without an active game"),
            },
            Stage::Win | Stage::Lose => {
                core.ui.result_key(key)?;
            }
        }
        core.drain(&self.pending)
    }

    /// Advances the running game by one frame.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> Result<(), ShellError> {
        let mut core = self.core.borrow_mut();
        if core.stage.current() == Stage::Playing
            && let Some(game) = core.active_game_mut()
        {
            game.tick();
        }
        core.drain(&self.pending)
    }

    /// Applies control events still waiting in the queue.
    ///
    /// Events stay queued only when an earlier transition returned an error.
    /// The front end calls this once per frame.
    #[instrument(skip(self))]
    pub fn process_events(&mut self) -> Result<(), ShellError> {
        self.core.borrow_mut().drain(&self.pending)
    }
}

impl ManagerCore {
    fn active_game_mut(&mut self) -> Option<&mut dyn GameHandle> {
        let index = self.active?;
        Some(self.entries[index].game_mut())
    }

    #[instrument(skip(self, pending))]
    fn drain(&mut self, pending: &RefCell<VecDeque<Event>>) -> Result<(), ShellError> {
        loop {
            let next = pending.borrow_mut().pop_front();
            let Some(event) = next else {
                return Ok(());
            };
            self.apply_event(event)?;
        }
    }

    #[instrument(skip(self))]
    fn apply_event(&mut self, event: Event) -> Result<(), ShellError> {
        match event {
            Event::MenuEntered { index } => self.enter_game(index),
            Event::GameOutcome { result, score } => self.finish_game(result, score),
            Event::ResultChosen {
                action: ResultAction::Restart,
            } => self.restart_game(),
            Event::ResultChosen {
                action: ResultAction::Menu,
            } => self.return_to_menu(StageTrigger::BackToMenu),
            Event::GameExited => self.return_to_menu(StageTrigger::Exit),
            Event::ScoreUpdated(_) => Ok(()),
        }
    }

    #[instrument(skip(self))]
    fn enter_game(&mut self, index: usize) -> Result<(), ShellError> {
        if index >= self.entries.len() {
            warn!(index, "Menu entry without a registered game");
            return Ok(());
        }
        if self.stage.apply(StageTrigger::MenuEntered).is_none() {
            return Ok(());
        }

        self.active = Some(index);
        self.ui.reset_score()?;
        let entry = &mut self.entries[index];
        info!(game = %entry.name(), "Starting game");
        entry.game_mut().start();
        let helper = entry.helper().clone();
        self.ui.update_helper_list(helper)
    }

    #[instrument(skip(self))]
    fn finish_game(&mut self, result: Outcome, score: u64) -> Result<(), ShellError> {
        if self.stage.apply(StageTrigger::from(result)).is_none() {
            return Ok(());
        }

        if let Some(game) = self.active_game_mut() {
            game.stop();
        }
        self.ui.set_result(result, score)?;
        self.ui.reset_result_selection()
    }

    #[instrument(skip(self))]
    fn restart_game(&mut self) -> Result<(), ShellError> {
        if self.stage.apply(StageTrigger::Restart).is_none() {
            return Ok(());
        }

        self.ui.reset_score()?;
        match self.active_game_mut() {
            Some(game) => game.start(),
            None => warn!("Restart without an active game"),
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn return_to_menu(&mut self, trigger: StageTrigger) -> Result<(), ShellError> {
        if self.stage.apply(trigger).is_none() {
            return Ok(());
        }

        if trigger == StageTrigger::Exit
            && let Some(game) = self.active_game_mut()
        {
            game.stop();
        }
        self.active = None;
        self.ui.redisplay_menu()?;
        self.ui.set_default_helper_list()?;
        self.ui.play_music();
        Ok(())
    }
}

impl Drop for GameManager {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.mediator.unsubscribe(id);
        }
    }
}
