//! Score bookkeeping shared by the bundled games.

use std::rc::Rc;

use tracing::{info, instrument};

use crate::events::{Event, Outcome, ScoreSnapshot};
use crate::mediator::Mediator;

/// Tracks the current and best score of one game and publishes changes.
#[derive(Debug)]
pub struct ScoreKeeper {
    mediator: Rc<Mediator>,
    current: u64,
    best: u64,
}

impl ScoreKeeper {
    /// Creates a keeper publishing on `mediator`.
    #[instrument(skip_all)]
    pub fn new(mediator: Rc<Mediator>) -> Self {
        Self {
            mediator,
            current: 0,
            best: 0,
        }
    }

    /// Score of the current run.
    pub fn current(&self) -> u64 {
        self.current
    }

    /// Best score seen so far.
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Starts a new run at zero.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.current = 0;
        self.publish();
    }

    /// Adds `points` to the current run.
    #[instrument(skip(self))]
    pub fn add(&mut self, points: u64) {
        self.current += points;
        self.best = self.best.max(self.current);
        self.publish();
    }

    /// Reports the end of the run.
    #[instrument(skip(self))]
    pub fn finish(&self, result: Outcome) {
        info!(%result, score = self.current, "Run finished");
        self.mediator.publish(Event::GameOutcome {
            result,
            score: self.current,
        });
    }

    fn publish(&self) {
        self.mediator
            .publish(Event::ScoreUpdated(ScoreSnapshot::new(self.current, self.best)));
    }
}
