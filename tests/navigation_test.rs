//! Tests for cyclic highlight navigation.

use arcade_shell::{ActiveIndex, Key, NavDirection};

#[test]
fn test_up_then_down_returns_to_start() {
    for count in 1..6 {
        for start in 0..count {
            let mut active = ActiveIndex::new(count);
            for _ in 0..start {
                active.step(NavDirection::Down);
            }
            assert_eq!(active.get(), start);

            active.step(NavDirection::Up);
            assert_eq!(active.step(NavDirection::Down), start);
            active.step(NavDirection::Down);
            assert_eq!(active.step(NavDirection::Up), start);
        }
    }
}

#[test]
fn test_boundaries_wrap() {
    let mut active = ActiveIndex::new(4);
    assert_eq!(active.step(NavDirection::Up), 3);
    assert_eq!(active.step(NavDirection::Down), 0);
}

#[test]
fn test_count_steps_is_identity() {
    let mut active = ActiveIndex::new(5);
    active.step(NavDirection::Down);
    for _ in 0..5 {
        active.step(NavDirection::Down);
    }
    assert_eq!(active.get(), 1);
}

#[test]
fn test_only_vertical_arrows_navigate() {
    assert_eq!(NavDirection::from_key(Key::ArrowUp), Some(NavDirection::Up));
    assert_eq!(NavDirection::from_key(Key::ArrowDown), Some(NavDirection::Down));
    assert_eq!(NavDirection::from_key(Key::ArrowLeft), None);
    assert_eq!(NavDirection::from_key(Key::Enter), None);
}
