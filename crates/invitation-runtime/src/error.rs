//! Runtime error types.

use std::io;
use thiserror::Error;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur in the view runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// IO error (signal registration, process spawn, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The ticker task is no longer accepting commands.
    #[error("Ticker is not running")]
    TickerStopped,

    /// The ticker task panicked or was cancelled while being joined.
    #[error("Ticker task failed: {0}")]
    TickerJoin(#[from] tokio::task::JoinError),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl RuntimeError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
