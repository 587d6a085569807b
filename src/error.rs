//! Error types for chatquiz.

use thiserror::Error;

/// Common error type for chatquiz.
#[derive(Error, Debug)]
pub enum QuizError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed or serialized.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration values are out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A console command could not be executed by the host.
    #[error("command error: {0}")]
    Command(String),

    /// No async runtime was available for scheduling.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl From<serde_json::Error> for QuizError {
    fn from(e: serde_json::Error) -> Self {
        QuizError::Config(e.to_string())
    }
}

/// Result type alias for chatquiz operations.
pub type Result<T> = std::result::Result<T, QuizError>;
