//! Synchronous publish/subscribe bus decoupling the UI from the games.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{debug, error, instrument, trace, warn};

use crate::events::{Event, EventKind};

/// Handle returned by [`Mediator::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Rc<RefCell<dyn FnMut(&Event) -> anyhow::Result<()>>>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    callback: Callback,
}

/// Event bus.
///
/// Callbacks for one event kind run in registration order and `publish`
/// returns only after every one of them ran. A callback that fails or
/// panics is logged and skipped; delivery to the others continues.
pub struct Mediator {
    subscriptions: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
}

impl Mediator {
    /// Creates a bus with no subscriptions.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating mediator");
        Self {
            subscriptions: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Registers `callback` for every event of `kind`.
    ///
    /// Registering the same logic twice delivers twice.
    #[instrument(skip(self, callback))]
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> anyhow::Result<()> + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let callback: Callback = Rc::new(RefCell::new(callback));
        self.subscriptions.borrow_mut().push(Subscription { id, kind, callback });
        debug!(?id, %kind, "Subscribed");
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    #[instrument(skip(self))]
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        let removed = subscriptions.len() != before;
        debug!(removed, "Unsubscribe requested");
        removed
    }

    /// Number of callbacks currently registered for `kind`.
    #[instrument(skip(self))]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .count()
    }

    /// Delivers `event` to every subscriber of its kind.
    ///
    /// The subscriber list is snapshotted first, so callbacks may subscribe,
    /// unsubscribe or publish; table changes apply from the next publish.
    #[instrument(skip(self))]
    pub fn publish(&self, event: Event) {
        let kind = event.kind();
        let targets: Vec<(SubscriptionId, Callback)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| (s.id, Rc::clone(&s.callback)))
            .collect();

        if targets.is_empty() {
            trace!(%kind, "No subscribers");
            return;
        }

        for (id, callback) in targets {
            let Ok(mut callback) = callback.try_borrow_mut() else {
                warn!(?id, %kind, "Subscriber re-entered during its own delivery, skipping");
                continue;
            };

            match panic::catch_unwind(AssertUnwindSafe(|| (&mut *callback)(&event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(?id, %kind, error = %e, "Subscriber failed"),
                Err(_) => error!(?id, %kind, "Subscriber panicked"),
            }
        }
    }
}

impl Default for Mediator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("subscriptions", &self.subscriptions.borrow().len())
            .field("next_id", &self.next_id.get())
            .finish()
    }
}
