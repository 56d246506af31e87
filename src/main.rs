//! Arcade Shell - terminal entry point.

#![warn(missing_docs)]

mod cli;

use std::rc::Rc;

use anyhow::Result;
use arcade_shell::{Mediator, ShellConfig, default_games, run_tui};
use clap::Parser;
use cli::{Cli, Command};
use tracing::instrument;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            tick_ms,
            seed,
            mute,
        } => {
            let mut config = ShellConfig::load_or_default(&config)?;
            if let Some(tick_ms) = tick_ms {
                config = config.with_tick_ms(tick_ms)?;
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if mute {
                config = config.muted();
            }
            run_tui(config)
        }
        Command::Games => {
            list_games();
            Ok(())
        }
    }
}

/// Prints every bundled game with its key hints.
#[instrument]
fn list_games() {
    let mediator = Rc::new(Mediator::new());
    for entry in default_games(&mediator, 0) {
        println!("{}", entry.name());
        for item in entry.helper() {
            println!("    {}", item.line());
        }
    }
}
