//! Engine error types.

use thiserror::Error;

/// Errors that can occur while running the fix engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Rule table error (e.g. a pattern failed to compile).
    #[error("Rule error: {0}")]
    Rule(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a rule error.
    pub fn rule(message: impl Into<String>) -> Self {
        Self::Rule(message.into())
    }
}
