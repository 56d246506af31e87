//! Tests for the event bus.

use std::cell::RefCell;
use std::rc::Rc;

use arcade_shell::{Event, EventKind, Mediator, Outcome, ScoreSnapshot};

fn score(current: u64) -> Event {
    Event::ScoreUpdated(ScoreSnapshot::new(current, current))
}

/// Subscribes a callback that appends `tag` to `log` on every delivery.
fn record(mediator: &Mediator, kind: EventKind, log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) {
    let log = Rc::clone(log);
    mediator.subscribe(kind, move |_| {
        log.borrow_mut().push(tag);
        Ok(())
    });
}

#[test]
fn test_publish_without_subscribers_is_noop() {
    let mediator = Mediator::new();
    mediator.publish(Event::GameExited);
    mediator.publish(score(3));
    assert_eq!(mediator.subscriber_count(EventKind::GameExited), 0);
}

#[test]
fn test_subscribers_run_in_registration_order() {
    let mediator = Mediator::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mediator, EventKind::ScoreUpdated, &log, "first");
    record(&mediator, EventKind::ScoreUpdated, &log, "second");
    record(&mediator, EventKind::ScoreUpdated, &log, "third");

    mediator.publish(score(1));

    assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn test_events_only_reach_their_kind() {
    let mediator = Mediator::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mediator, EventKind::GameOutcome, &log, "outcome");
    record(&mediator, EventKind::MenuEntered, &log, "menu");

    mediator.publish(Event::GameOutcome {
        result: Outcome::Win,
        score: 9,
    });

    assert_eq!(*log.borrow(), vec!["outcome"]);
}

#[test]
fn test_duplicate_registration_delivers_twice() {
    let mediator = Mediator::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mediator, EventKind::GameExited, &log, "exit");
    record(&mediator, EventKind::GameExited, &log, "exit");

    mediator.publish(Event::GameExited);

    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_unsubscribe_stops_only_that_callback() {
    let mediator = Mediator::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mediator, EventKind::ScoreUpdated, &log, "kept");
    let removed_log = Rc::clone(&log);
    let id = mediator.subscribe(EventKind::ScoreUpdated, move |_| {
        removed_log.borrow_mut().push("removed");
        Ok(())
    });

    assert!(mediator.unsubscribe(id));
    assert!(!mediator.unsubscribe(id));
    mediator.publish(score(2));

    assert_eq!(*log.borrow(), vec!["kept"]);
    assert_eq!(mediator.subscriber_count(EventKind::ScoreUpdated), 1);
}

#[test]
fn test_failing_subscriber_does_not_block_others() {
    let mediator = Mediator::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    mediator.subscribe(EventKind::ScoreUpdated, |_| anyhow::bail!("display gone"));
    mediator.subscribe(EventKind::ScoreUpdated, |_| panic!("subscriber bug"));
    record(&mediator, EventKind::ScoreUpdated, &log, "after");

    mediator.publish(score(4));

    assert_eq!(*log.borrow(), vec!["after"]);
}

#[test]
fn test_publish_from_callback_is_delivered() {
    let mediator = Rc::new(Mediator::new());
    let log = Rc::new(RefCell::new(Vec::new()));
    record(&mediator, EventKind::GameExited, &log, "exit");

    let inner = Rc::clone(&mediator);
    mediator.subscribe(EventKind::ResultChosen, move |_| {
        inner.publish(Event::GameExited);
        Ok(())
    });

    mediator.publish(Event::ResultChosen {
        action: arcade_shell::ResultAction::Menu,
    });

    assert_eq!(*log.borrow(), vec!["exit"]);
}

#[test]
fn test_subscription_during_publish_applies_next_time() {
    let mediator = Rc::new(Mediator::new());
    let log = Rc::new(RefCell::new(Vec::new()));

    let inner = Rc::clone(&mediator);
    let late_log = Rc::clone(&log);
    mediator.subscribe(EventKind::GameExited, move |_| {
        let late_log = Rc::clone(&late_log);
        inner.subscribe(EventKind::GameExited, move |_| {
            late_log.borrow_mut().push("late");
            Ok(())
        });
        Ok(())
    });

    mediator.publish(Event::GameExited);
    assert!(log.borrow().is_empty());

    mediator.publish(Event::GameExited);
    assert_eq!(*log.borrow(), vec!["late"]);
}
