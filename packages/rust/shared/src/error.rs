//! Error types for briefparse.
//!
//! Library crates use [`BriefParseError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all briefparse operations.
#[derive(Debug, thiserror::Error)]
pub enum BriefParseError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Remote page fetch error (URL entry point).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Content extraction error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// A rule pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// Structured payload (webhook, aggregate descriptor) had the wrong shape.
    #[error("payload error: {message}")]
    Payload { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (invalid result, empty batch, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// CSV serialization error.
    #[error("export error: {0}")]
    Export(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BriefParseError>;

impl BriefParseError {
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

    /// Create a payload error from any displayable message.
    pub fn payload(msg: impl Into<String>) -> Self {
        Self::Payload {
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

impl From<regex::Error> for BriefParseError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}
