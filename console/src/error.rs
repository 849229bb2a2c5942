//! Error types for the dnsrelay console.
//!
//! Each layer defines its own error enum (`ConfigError` in [`crate::config`],
//! `ApiError` in [`crate::api`]); this module ties them together into the
//! crate-level [`ConsoleError`] used at the binary boundary.
//!
//! Failures in the control layer never escape their component: login
//! rejections, poll failures, and delete failures are consumed locally and
//! surfaced as screen state. `ConsoleError` only carries conditions that end
//! a whole console run (configuration, terminal I/O).

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors that can end a console run.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API error that escaped a headless command.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// File system or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TUI-related error.
    #[error("TUI error: {0}")]
    Tui(#[from] TuiError),
}

/// Errors that can occur during TUI operation.
#[derive(Error, Debug)]
pub enum TuiError {
    /// Terminal initialization failed.
    #[error("failed to initialize terminal: {0}")]
    TerminalInit(#[source] std::io::Error),

    /// Terminal rendering failed.
    #[error("render error: {0}")]
    Render(#[source] std::io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(String),
}

/// A specialized `Result` type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConsoleError::Config(ConfigError::MissingEnvVar(
            "DNSRELAY_SERVER_URL".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "configuration error: missing required environment variable: DNSRELAY_SERVER_URL"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no tty");
        let err: ConsoleError = io_err.into();
        assert!(matches!(err, ConsoleError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn tui_error_display() {
        let io_err = std::io::Error::other("raw mode failed");
        let err = TuiError::TerminalInit(io_err);
        assert_eq!(
            err.to_string(),
            "failed to initialize terminal: raw mode failed"
        );
    }

    #[test]
    fn tui_error_source_chain() {
        use std::error::Error;

        let io_err = std::io::Error::other("write failed");
        let err = TuiError::Render(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn tui_error_to_console_error_conversion() {
        let tui_err = TuiError::Event("poll timeout".to_string());
        let err: ConsoleError = tui_err.into();
        assert!(matches!(err, ConsoleError::Tui(_)));
        assert_eq!(err.to_string(), "TUI error: event error: poll timeout");
    }
}
