//! Error types for kbforge.
//!
//! Library crates use [`KbForgeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all kbforge operations.
#[derive(Debug, thiserror::Error)]
pub enum KbForgeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error during page fetch or translation.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed or unreadable document content.
    #[error("extract error: {message}")]
    Extract { message: String },

    /// File extension not handled by any reader.
    #[error("unsupported file type: .{extension}")]
    Unsupported { extension: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URL, empty input set, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KbForgeError>;

impl KbForgeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an extract error from any displayable message.
    pub fn extract(msg: impl Into<String>) -> Self {
        Self::Extract {
            message: msg.into(),
        }
    }

    /// Create an unsupported-file-type error from an extension.
    pub fn unsupported(extension: impl Into<String>) -> Self {
        Self::Unsupported {
            extension: extension.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = KbForgeError::config("missing translator endpoint");
        assert_eq!(err.to_string(), "config error: missing translator endpoint");

        let err = KbForgeError::unsupported("txt");
        assert_eq!(err.to_string(), "unsupported file type: .txt");

        let err = KbForgeError::extract("truncated xlsx stream");
        assert!(err.to_string().contains("truncated xlsx"));
    }
}
