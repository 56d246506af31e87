//! Shell error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Category of a [`ShellError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ShellErrorKind {
    /// Wiring mistake detected while assembling the shell.
    #[display("configuration")]
    Configuration,
    /// The rendering surface rejected an operation.
    #[display("surface")]
    Surface,
}

/// Shell error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Shell {} error: {} at {}:{}", kind, message, file, line)]
pub struct ShellError {
    /// Error category.
    pub kind: ShellErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ShellError {
    /// Creates a new shell error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: ShellErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates a configuration error.
    #[track_caller]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ShellErrorKind::Configuration, message)
    }

    /// Creates a surface error.
    #[track_caller]
    pub fn surface(message: impl Into<String>) -> Self {
        Self::new(ShellErrorKind::Surface, message)
    }
}
