//! Log setup for the `invitation` binary.
//!
//! Logs always go to stderr so they never interleave with the rendered view
//! on stdout. `RUST_LOG` takes precedence over the preset level.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// How each log record is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// One short line per record, no timestamp.
    Compact,
    /// One JSON object per line.
    Json,
}

/// Log preset picked from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    pub level: Level,
    pub style: LogStyle,
    /// Adds module path, file and line to each record.
    pub verbose: bool,
}

impl TracingConfig {
    /// `--debug`: everything down to `DEBUG`, with source locations.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            style: LogStyle::Compact,
            verbose: true,
        }
    }

    /// The live view: warnings only.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            level: Level::WARN,
            style: LogStyle::Compact,
            verbose: false,
        }
    }

    /// `--json`: machine-readable records next to JSON frames.
    #[must_use]
    pub fn json() -> Self {
        Self {
            level: Level::INFO,
            style: LogStyle::Json,
            verbose: true,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> String {
        format!("invitation={}", self.level).to_lowercase()
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber was already set.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.verbose)
        .with_file(config.verbose)
        .with_line_number(config.verbose);

    let layer = match config.style {
        LogStyle::Compact => layer.compact().without_time().boxed(),
        LogStyle::Json => layer.json().boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
