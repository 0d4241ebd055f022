//! Error types for hydrawatch-core.

use thiserror::Error;

/// Errors raised by the dashboard pipeline and its configuration layer.
#[derive(Debug, Error)]
pub enum DashError {
    /// IO error while reading configuration or capture files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("Invalid config: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Frame buffer formatting failed.
    #[error("Frame formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    /// A replay record could not be decoded.
    #[error("Bad replay record on line {line}: {reason}")]
    Replay { line: usize, reason: String },

    /// A render pass panicked and was abandoned.
    #[error("Render pass panicked: {0}")]
    RenderPanic(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashError = io_err.into();
        assert!(matches!(err, DashError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_dash_error_format() {
        let err = DashError::from(std::fmt::Error);
        assert!(err.to_string().starts_with("Frame formatting failed"));
    }

    #[test]
    fn test_dash_error_replay_fields() {
        let err = DashError::Replay {
            line: 7,
            reason: "missing field `address`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("address"));
    }

    #[test]
    fn test_dash_error_config() {
        let yaml_err = serde_yaml_ng::from_str::<u64>("not: [a number").unwrap_err();
        let err = DashError::from(yaml_err);
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_render_panic_message() {
        let err = DashError::RenderPanic("index out of bounds".into());
        assert_eq!(err.to_string(), "Render pass panicked: index out of bounds");
    }
}
