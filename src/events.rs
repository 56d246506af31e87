//! Typed events carried by the [`Mediator`](crate::Mediator).

use derive_new::new;
use strum::{Display, EnumDiscriminants};

/// Live score published by a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, new)]
pub struct ScoreSnapshot {
    /// Score of the current run.
    pub current: u64,
    /// Best score seen by the game during this process.
    pub max: u64,
}

/// Terminal result of a game run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// The player won.
    Win,
    /// The player lost.
    Lose,
}

/// Action bound to a button on the result overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResultAction {
    /// Play the same game again.
    Restart,
    /// Go back to the game menu.
    Menu,
}

/// Everything that travels over the bus.
///
/// [`EventKind`] is the matching fieldless discriminant used as the
/// subscription key.
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(EventKind))]
#[strum_discriminants(derive(Hash, Display))]
pub enum Event {
    /// A menu entry was confirmed.
    MenuEntered {
        /// Index of the confirmed entry.
        index: usize,
    },
    /// A running game changed its score.
    ScoreUpdated(ScoreSnapshot),
    /// A running game ended.
    GameOutcome {
        /// Win or lose.
        result: Outcome,
        /// Final score of the run.
        score: u64,
    },
    /// A result overlay button was confirmed.
    ResultChosen {
        /// Action of the confirmed button.
        action: ResultAction,
    },
    /// The player left a running game.
    GameExited,
}

impl Event {
    /// Returns the subscription key of this event.
    pub fn kind(&self) -> EventKind {
        EventKind::from(self)
    }
}
