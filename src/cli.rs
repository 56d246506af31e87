//! Command-line interface for arcade_shell.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Arcade Shell - menu, mini-games and score overlay in the terminal
#[derive(Parser, Debug)]
#[command(name = "arcade_shell")]
#[command(about = "Keyboard-driven arcade shell", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the TOML config (defaults are used if it doesn't exist)
        #[arg(long, default_value = "arcade_shell.toml")]
        config: PathBuf,

        /// Milliseconds between game frames
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Seed for the bundled games
        #[arg(long)]
        seed: Option<u64>,

        /// Disable all audio
        #[arg(long)]
        mute: bool,
    },

    /// List the bundled games and their controls
    Games,
}
