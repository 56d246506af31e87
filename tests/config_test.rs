//! Tests for TOML configuration loading.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use arcade_shell::ShellConfig;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_defaults() {
    let config = ShellConfig::default();
    assert_eq!(*config.tick_ms(), 120);
    assert_eq!(config.log_file(), &PathBuf::from("arcade_shell.log"));
    assert_eq!(*config.seed(), None);
    assert!(!*config.audio().muted());
    assert_eq!(*config.audio().volume(), 1.0);
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
tick_ms = 80
log_file = "shell.log"
seed = 7

[audio]
muted = true
bell = true
volume = 0.5
"#,
    );

    let config = ShellConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(*config.tick_ms(), 80);
    assert_eq!(config.log_file(), &PathBuf::from("shell.log"));
    assert_eq!(*config.seed(), Some(7));
    assert!(*config.audio().muted());
    assert!(*config.audio().bell());
    assert_eq!(*config.audio().volume(), 0.5);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("seed = 3\n");
    let config = ShellConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(*config.tick_ms(), 120);
    assert_eq!(*config.seed(), Some(3));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = ShellConfig::load_or_default(dir.path().join("absent.toml"))
        .expect("Defaults failed");
    assert_eq!(config, ShellConfig::default());
}

#[test]
fn test_unknown_key_is_rejected() {
    let file = write_config("speed = 3\n");
    let err = ShellConfig::from_file(file.path()).expect_err("Unknown key accepted");
    assert!(err.message.contains("parse"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_config("tick_ms = 0\n");
    assert!(ShellConfig::from_file(file.path()).is_err());

    let file = write_config("[audio]\nvolume = 1.5\n");
    assert!(ShellConfig::from_file(file.path()).is_err());

    assert!(ShellConfig::default().with_tick_ms(0).is_err());
}

#[test]
fn test_overrides() {
    let config = ShellConfig::default()
        .with_tick_ms(50)
        .expect("Override failed")
        .with_seed(11)
        .muted();
    assert_eq!(*config.tick_ms(), 50);
    assert_eq!(*config.seed(), Some(11));
    assert!(*config.audio().muted());
}
