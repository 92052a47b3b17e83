//! CLI, configuration, terminal rendering, actions
//!
//! This crate provides the `invitation` command-line interface.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
