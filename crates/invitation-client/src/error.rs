//! Client error types.

use std::fmt;

use invitation_core::CalendarError;
use invitation_runtime::RuntimeError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// The configured event could not be turned into instants.
    Calendar(CalendarError),
    /// Ticker or signal setup failed.
    Runtime(RuntimeError),
    /// IO error.
    Io(std::io::Error),
    /// Action failed (open, copy).
    Action(String),
    /// Output could not be serialized.
    Output(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Calendar(err) => write!(f, "event error: {}", err),
            Self::Runtime(err) => write!(f, "runtime error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
            Self::Output(msg) => write!(f, "output error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Calendar(err) => Some(err),
            Self::Runtime(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

impl From<CalendarError> for ClientError {
    fn from(err: CalendarError) -> Self {
        Self::Calendar(err)
    }
}

impl From<RuntimeError> for ClientError {
    fn from(err: RuntimeError) -> Self {
        Self::Runtime(err)
    }
}
