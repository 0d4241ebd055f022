//! Error types for hydrawatch-terminal.

use hydrawatch_core::DashError;
use thiserror::Error;

/// Errors that can occur while driving the terminal dashboard.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error from terminal operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error surfaced by the render pipeline or its configuration.
    #[error(transparent)]
    Dash(#[from] DashError),

    /// Terminal not available.
    #[error("Terminal not available")]
    TerminalNotAvailable,

    /// The log sink could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
        assert!(tui_err.to_string().contains("IO error"));
    }

    #[test]
    fn test_tui_error_from_dash() {
        let err: TuiError = DashError::RenderPanic("boom".into()).into();
        assert!(matches!(err, TuiError::Dash(_)));
        assert_eq!(err.to_string(), "Render pass panicked: boom");
    }

    #[test]
    fn test_tui_error_terminal_not_available() {
        let err = TuiError::TerminalNotAvailable;
        assert_eq!(err.to_string(), "Terminal not available");
    }

    #[test]
    fn test_tui_error_logging() {
        let err = TuiError::Logging("no permission".into());
        assert!(err.to_string().contains("no permission"));
    }
}
