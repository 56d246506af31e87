//! Terminal front end.

mod ui;

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument, warn};

use crate::bootstrap::Shell;
use crate::config::ShellConfig;
use crate::keys::Key;
use crate::stage::Stage;

/// Runs the shell in the terminal until the player quits.
///
/// The terminal is restored on every exit path.
#[instrument(skip(config))]
pub fn run_tui(config: ShellConfig) -> Result<()> {
    // Log to a file so output does not tear the alternate screen
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting arcade shell TUI");
    let mut shell = Shell::new(&config)?;

    let mut guard = TerminalGuard::enter(io::stdout())?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut shell, Duration::from_millis(*config.tick_ms()));

    guard.restore()?;

    if let Err(err) = &res {
        error!(error = ?err, "Shell loop error");
    }
    res
}

#[instrument(skip(terminal, shell))]
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    shell: &mut Shell,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        shell.manager_mut().process_events()?;
        terminal.draw(|f| ui::draw(f, &*shell))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if is_quit(&key, shell.manager().stage()) {
                info!("Player quit");
                return Ok(());
            }
            match Key::from_key_code(key.code) {
                Some(key) => shell.manager_mut().handle_key(key)?,
                None => debug!(code = ?key.code, "Unrecognized key ignored"),
            }
        }

        if last_tick.elapsed() >= tick_rate {
            shell.manager_mut().tick()?;
            last_tick = Instant::now();
        }
    }
}

/// Raw mode plus alternate screen, undone on drop.
///
/// Dropping also runs while a panic unwinds, so the shell never leaves the
/// terminal in raw mode.
#[derive(Debug)]
struct TerminalGuard<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Switches the terminal into raw mode and the alternate screen.
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self::armed(out);
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }

    fn armed(out: W) -> Self {
        Self { out, active: true }
    }

    /// Leaves raw mode and the alternate screen. Later calls do nothing.
    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.out, LeaveAlternateScreen, Show)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// `q` quits from the menu, `Ctrl+C` from anywhere.
#[instrument]
fn is_quit(key: &KeyEvent, stage: Stage) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
        KeyCode::Char('q') | KeyCode::Char('Q') => stage == Stage::Menu,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAVE_ALTERNATE_SCREEN: &[u8] = b"\x1b[?1049l";

    fn leave_count(bytes: &[u8]) -> usize {
        bytes
            .windows(LEAVE_ALTERNATE_SCREEN.len())
            .filter(|w| *w == LEAVE_ALTERNATE_SCREEN)
            .count()
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let mut out = Vec::new();
        drop(TerminalGuard::armed(&mut out));
        assert_eq!(leave_count(&out), 1);
    }

    #[test]
    fn test_guard_restores_while_unwinding() {
        let mut out = Vec::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = TerminalGuard::armed(&mut out);
            panic!("game bug");
        }));
        assert!(result.is_err());
        assert_eq!(leave_count(&out), 1);
    }

    #[test]
    fn test_explicit_restore_is_not_repeated() {
        let mut out = Vec::new();
        {
            let mut guard = TerminalGuard::armed(&mut out);
            guard.restore().expect("restore failed");
        }
        assert_eq!(leave_count(&out), 1);
    }
}
