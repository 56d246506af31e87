//! Arcade shell - a keyboard-driven host for small games
//!
//! The shell shows a menu of games, runs the chosen one, keeps a
//! zero-padded score display and offers restart or menu once the game
//! reports a win or a loss.
//!
//! # Architecture
//!
//! - **Mediator**: typed publish/subscribe bus shared by every component
//! - **Stage machine**: `menu → playing → win/lose`, owned by the game manager
//! - **UI managers**: menu, score, result and helper panels drawn on a [`Surface`]
//! - **Audio**: named tracks with loop, volume and mute handling
//! - **Games**: anything implementing [`GameHandle`]
//!
//! # Example
//!
//! ```no_run
//! use arcade_shell::{Key, Shell, ShellConfig, Stage};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut shell = Shell::new(&ShellConfig::default())?;
//! shell.manager_mut().handle_key(Key::Enter)?;
//! assert_eq!(shell.manager().stage(), Stage::Playing);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod audio;
mod bootstrap;
mod config;
mod error;
mod events;
mod game_manager;
mod keys;
mod mediator;
mod registry;
mod stage;
mod surface;
mod text;
mod tui;
mod ui;

pub mod games;

// Crate-level exports - Event bus
pub use events::{Event, EventKind, Outcome, ResultAction, ScoreSnapshot};
pub use mediator::{Mediator, SubscriptionId};

// Crate-level exports - Stages
pub use stage::{Stage, StageMachine, StageReader, StageTrigger};

// Crate-level exports - Input
pub use keys::Key;

// Crate-level exports - Audio
pub use audio::{Audio, AudioCue, AudioManager, SharedAudio, Track};

// Crate-level exports - Surface
pub use surface::{ContainerId, MemorySurface, Panel, SharedSurface, Surface};

// Crate-level exports - UI managers
pub use ui::{
    ActiveIndex, HelperItem, HelperManager, LOSE_TEXT, MenuManager, NavDirection, ResultBlocks,
    ResultButton, ResultManager, ScoreManager, ShellLayout, UiManager, WIN_TEXT,
    default_helper_list,
};

// Crate-level exports - Games and orchestration
pub use bootstrap::{Shell, default_games};
pub use game_manager::GameManager;
pub use registry::{GameEntry, GameHandle};

// Crate-level exports - Errors and configuration
pub use config::{AudioConfig, ConfigError, ShellConfig};
pub use error::{ShellError, ShellErrorKind};

// Crate-level exports - Text helpers
pub use text::{SCORE_WIDTH, filled_zero_text, pad_zeros};

// Crate-level exports - Terminal front end
pub use tui::run_tui;
