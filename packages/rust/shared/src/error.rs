//! Error types for WikiCorpus.
//!
//! Library crates use [`WikiCorpusError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all WikiCorpus operations.
#[derive(Debug, thiserror::Error)]
pub enum WikiCorpusError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the content source.
    #[error("network error: {0}")]
    Network(String),

    /// The MediaWiki API answered with an `error` object.
    #[error("api error [{code}]: {info}")]
    Api { code: String, info: String },

    /// JSON decoding or content parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (invalid option values, bad input shape).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Corpus serialization error (JSON/CSV writers).
    #[error("output error: {0}")]
    Output(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WikiCorpusError>;

impl WikiCorpusError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
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
        let err = WikiCorpusError::config("unknown key `lang2`");
        assert_eq!(err.to_string(), "config error: unknown key `lang2`");

        let err = WikiCorpusError::Api {
            code: "badvalue".into(),
            info: "Unrecognized value for parameter \"list\"".into(),
        };
        assert!(err.to_string().starts_with("api error [badvalue]"));
    }

    #[test]
    fn io_error_keeps_path() {
        let err = WikiCorpusError::io(
            "/tmp/categories.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("categories.json"));
    }
}
