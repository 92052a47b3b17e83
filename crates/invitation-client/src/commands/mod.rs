//! Subcommand implementations.

pub mod calendar;
pub mod config;
pub mod countdown;
pub mod watch;
