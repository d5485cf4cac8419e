//! Error types for ResearchProfile.
//!
//! Library crates use [`ProfileError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Note that fetch and parse faults never escape the abstract extractor as
//! errors: they are folded into `AbstractResult::Failure` values there.

use std::path::PathBuf;

/// Top-level error type for all ResearchProfile operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport failure, invalid URL, or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed HTML or PDF content.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Summarization model request or response error.
    #[error("summarization error: {0}")]
    Summarization(String),

    /// Roster loading or column error.
    #[error("roster error: {message}")]
    Roster { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
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

    /// Create a roster error from any displayable message.
    pub fn roster(msg: impl Into<String>) -> Self {
        Self::Roster {
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
