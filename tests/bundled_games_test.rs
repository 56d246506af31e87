//! Tests running the bundled games inside the shell.

use arcade_shell::{Key, LOSE_TEXT, Shell, ShellConfig, Stage};

fn seeded_shell() -> Shell {
    let config = ShellConfig::default().with_seed(42).muted();
    Shell::new(&config).expect("Shell setup failed")
}

#[test]
fn test_bundled_registry() {
    let shell = seeded_shell();
    assert_eq!(shell.manager().game_names(), vec!["snake", "2048", "breakout"]);
    for entry in shell.manager().entries().iter() {
        assert!(entry.helper().iter().any(|h| h.key() == "esc"));
    }
}

#[test]
fn test_snake_runs_into_wall() {
    let mut shell = seeded_shell();
    shell.manager_mut().handle_key(Key::Enter).expect("Enter failed");
    assert_eq!(shell.manager().active_name().as_deref(), Some("snake"));
    assert!(!shell.manager().active_view().is_empty());

    for _ in 0..40 {
        shell.manager_mut().tick().expect("Tick failed");
    }

    assert_eq!(shell.manager().stage(), Stage::Lose);
    let result = shell.layout().result().clone();
    assert_eq!(shell.surface().text(result.text()), LOSE_TEXT);
}

#[test]
fn test_2048_starts_with_two_tiles() {
    let mut shell = seeded_shell();
    shell
        .manager_mut()
        .handle_key(Key::ArrowDown)
        .expect("Navigation failed");
    shell.manager_mut().handle_key(Key::Enter).expect("Enter failed");

    assert_eq!(shell.manager().active_name().as_deref(), Some("2048"));
    let tiles: usize = shell
        .manager()
        .active_view()
        .iter()
        .flat_map(|row| row.split_whitespace())
        .filter(|cell| cell.parse::<u32>().is_ok_and(|v| v > 0))
        .count();
    assert_eq!(tiles, 2);
}

#[test]
fn test_breakout_exit_returns_to_menu() {
    let mut shell = seeded_shell();
    for key in [Key::ArrowUp, Key::Enter, Key::Space] {
        shell.manager_mut().handle_key(key).expect("Key dispatch failed");
    }
    assert_eq!(shell.manager().active_name().as_deref(), Some("breakout"));
    shell.manager_mut().tick().expect("Tick failed");

    shell.manager_mut().handle_key(Key::Escape).expect("Escape failed");

    assert_eq!(shell.manager().stage(), Stage::Menu);
    assert_eq!(shell.manager().ui().active_menu_index(), 2);
}
