//! UI facade and its sub-managers.

mod helper;
mod menu;
mod navigation;
mod result;
mod score;

use std::cell::RefCell;
use std::rc::Rc;

use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument};

pub use helper::{HelperItem, HelperManager, default_helper_list};
pub use menu::MenuManager;
pub use navigation::{ActiveIndex, NavDirection};
pub use result::{LOSE_TEXT, ResultBlocks, ResultButton, ResultManager, WIN_TEXT};
pub use score::ScoreManager;

use crate::audio::SharedAudio;
use crate::error::ShellError;
use crate::events::{Outcome, ResultAction};
use crate::keys::Key;
use crate::mediator::{Mediator, SubscriptionId};
use crate::stage::StageReader;
use crate::surface::{ContainerId, SharedSurface};

/// Every container the shell writes to.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ShellLayout {
    menu: ContainerId,
    score_current: ContainerId,
    score_max: ContainerId,
    result: ResultBlocks,
    helper: ContainerId,
}

impl ShellLayout {
    /// Layout used by the terminal front end.
    #[instrument]
    pub fn standard() -> Self {
        Self {
            menu: ContainerId::from("menu"),
            score_current: ContainerId::from("score-current"),
            score_max: ContainerId::from("score-max"),
            result: ResultBlocks::new(
                ContainerId::from("result-text"),
                ContainerId::from("result-score"),
                ContainerId::from("result-buttons"),
                vec![
                    ResultButton::new("Restart", ResultAction::Restart),
                    ResultButton::new("Menu", ResultAction::Menu),
                ],
            ),
            helper: ContainerId::from("helper"),
        }
    }

    /// All container ids, for building a matching surface.
    #[instrument(skip(self))]
    pub fn containers(&self) -> Vec<ContainerId> {
        vec![
            self.menu.clone(),
            self.score_current.clone(),
            self.score_max.clone(),
            self.result.text().clone(),
            self.result.score().clone(),
            self.result.buttons_container().clone(),
            self.helper.clone(),
        ]
    }
}

/// Composes the menu, score, result and helper managers.
///
/// Pure delegation; the state lives in the sub-managers. The score
/// subscription is released on drop.
#[derive(Debug)]
pub struct UiManager {
    menu: MenuManager,
    score: Rc<RefCell<ScoreManager>>,
    result: ResultManager,
    helper: HelperManager,
    mediator: Rc<Mediator>,
    score_subscription: SubscriptionId,
}

impl UiManager {
    /// Builds the sub-managers and subscribes the score display.
    #[instrument(skip_all)]
    pub fn new(
        audio: SharedAudio,
        mediator: Rc<Mediator>,
        stage: StageReader,
        surface: SharedSurface,
    ) -> Self {
        debug!("Creating UI manager");
        let menu = MenuManager::new(
            Rc::clone(&audio),
            Rc::clone(&mediator),
            stage.clone(),
            Rc::clone(&surface),
        );
        let score = Rc::new(RefCell::new(ScoreManager::new(
            Rc::clone(&surface),
            stage.clone(),
        )));
        let score_subscription = ScoreManager::subscribe(&score, &mediator);
        let result = ResultManager::new(audio, Rc::clone(&mediator), stage, Rc::clone(&surface));
        let helper = HelperManager::new(surface);

        Self {
            menu,
            score,
            result,
            helper,
            mediator,
            score_subscription,
        }
    }

    /// Renders the game names into the menu.
    #[instrument(skip(self))]
    pub fn set_menu_items(
        &mut self,
        container: ContainerId,
        names: &[String],
    ) -> Result<(), ShellError> {
        self.menu.create_menu_buttons(container, names)
    }

    /// Binds the score displays.
    #[instrument(skip(self))]
    pub fn set_score_items(
        &mut self,
        current: ContainerId,
        max: ContainerId,
    ) -> Result<(), ShellError> {
        self.score.borrow_mut().set_blocks(current, max)
    }

    /// Binds the result overlay.
    #[instrument(skip(self))]
    pub fn set_result_blocks(&mut self, blocks: ResultBlocks) -> Result<(), ShellError> {
        self.result.set_blocks(blocks)
    }

    /// Shows the outcome of a run.
    #[instrument(skip(self))]
    pub fn set_result(&mut self, outcome: Outcome, score: u64) -> Result<(), ShellError> {
        self.result.update_result(outcome, score)
    }

    /// Starts the menu music.
    #[instrument(skip(self))]
    pub fn play_music(&mut self) {
        self.menu.play_music();
    }

    /// Binds the hint panel.
    #[instrument(skip(self))]
    pub fn set_helper_block(&mut self, container: ContainerId) -> Result<(), ShellError> {
        self.helper.set_wrapper(container)
    }

    /// Replaces the hints.
    #[instrument(skip(self, list))]
    pub fn update_helper_list(&mut self, list: Vec<HelperItem>) -> Result<(), ShellError> {
        self.helper.update_helper_list(list)
    }

    /// Installs the menu hints.
    #[instrument(skip(self))]
    pub fn set_default_helper_list(&mut self) -> Result<(), ShellError> {
        self.helper.set_default_list()
    }

    /// Zeroes the current score display.
    #[instrument(skip(self))]
    pub fn reset_score(&mut self) -> Result<(), ShellError> {
        self.score.borrow().reset()
    }

    /// Highlights the first result button.
    #[instrument(skip(self))]
    pub fn reset_result_selection(&mut self) -> Result<(), ShellError> {
        self.result.reset_selection()
    }

    /// Re-applies the menu highlight.
    #[instrument(skip(self))]
    pub fn redisplay_menu(&mut self) -> Result<(), ShellError> {
        self.menu.redisplay()
    }

    /// Forwards a key to the menu.
    #[instrument(skip(self))]
    pub fn menu_key(&mut self, key: Key) -> Result<bool, ShellError> {
        self.menu.handle_key(key)
    }

    /// Forwards a key to the result overlay.
    #[instrument(skip(self))]
    pub fn result_key(&mut self, key: Key) -> Result<bool, ShellError> {
        self.result.handle_key(key)
    }

    /// Highlighted menu entry.
    pub fn active_menu_index(&self) -> usize {
        self.menu.active_index()
    }

    /// Highlighted result button.
    pub fn active_result_index(&self) -> usize {
        self.result.active_index()
    }

    /// Hints currently shown.
    pub fn helper_list(&self) -> &[HelperItem] {
        self.helper.list()
    }
}

impl Drop for UiManager {
    fn drop(&mut self) {
        self.mediator.unsubscribe(self.score_subscription);
    }
}
