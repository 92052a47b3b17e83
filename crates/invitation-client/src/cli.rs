//! Command-line interface definition.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use invitation_core::{OutputFormat, Variant};

/// invitation - A countdown invitation in your terminal
#[derive(Debug, Parser)]
#[command(name = "invitation")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "INVITATION_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Deployment variant (invitation or proposal), overrides the config file
    #[arg(long, global = true)]
    pub variant: Option<Variant>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Print plain URLs instead of terminal hyperlinks
    #[arg(long)]
    pub no_hyperlinks: bool,

    /// Seed for the evasive button placement
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the live view and read button presses from stdin (default)
    Watch,

    /// Print the countdown once
    Countdown {
        /// Evaluate at this instant instead of now (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Print the add-to-calendar link for the event
    CalendarLink {
        /// Open the link in the default browser
        #[arg(long)]
        open: bool,

        /// Copy the link to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
