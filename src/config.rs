//! Shell configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Runtime settings of the shell.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Milliseconds between game frames.
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,

    /// File receiving the tracing output.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Seed for the bundled games; random when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Audio settings.
    #[serde(default)]
    audio: AudioConfig,
}

/// Audio section of [`ShellConfig`].
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioConfig {
    /// Record playback without emitting anything.
    #[serde(default)]
    muted: bool,

    /// Ring the terminal bell for one-shot effects.
    #[serde(default)]
    bell: bool,

    /// Master volume applied to every track (`0.0..=1.0`).
    #[serde(default = "default_volume")]
    volume: f32,
}

#[instrument]
fn default_tick_ms() -> u64 {
    120
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("arcade_shell.log")
}

#[instrument]
fn default_volume() -> f32 {
    1.0
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            muted: false,
            bell: false,
            volume: default_volume(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            log_file: default_log_file(),
            seed: None,
            audio: AudioConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(tick_ms = config.tick_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the frame interval.
    #[instrument(skip(self))]
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Result<Self, ConfigError> {
        self.tick_ms = tick_ms;
        self.validate()?;
        Ok(self)
    }

    /// Overrides the game seed.
    #[instrument(skip(self))]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Mutes all audio.
    #[instrument(skip(self))]
    pub fn muted(mut self) -> Self {
        self.audio.muted = true;
        self
    }

    #[instrument(skip(self))]
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::new("tick_ms must be greater than zero".to_string()));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::new(format!(
                "audio.volume must be within 0.0..=1.0, got {}",
                self.audio.volume
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
