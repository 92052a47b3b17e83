//! Add-to-calendar link.

use invitation_core::{CalendarLinkBuilder, OutputFormat};
use serde_json::json;

use crate::actions;
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Prints the link, then opens and/or copies it.
pub fn run(
    config: &ClientConfig,
    open: bool,
    copy: bool,
    format: OutputFormat,
) -> ClientResult<()> {
    let url = link(config)?;

    match format {
        OutputFormat::Tty => println!("{}", url),
        OutputFormat::Json => println!("{}", json!({ "calendar_url": url })),
    }

    if open {
        actions::open_url(&url)?;
    }
    if copy {
        actions::copy_url(&url)?;
    }
    Ok(())
}

/// Builds the Google Calendar link for the configured event.
pub fn link(config: &ClientConfig) -> ClientResult<String> {
    let event = config.event.to_calendar_event()?;
    Ok(CalendarLinkBuilder::google().build(&event))
}
