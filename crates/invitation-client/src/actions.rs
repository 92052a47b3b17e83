//! Link actions: open in the browser, copy to the clipboard.

use tracing::info;

use crate::error::{ClientError, ClientResult};

/// Opens `url` in the default browser.
pub fn open_url(url: &str) -> ClientResult<()> {
    info!(url = %url, "opening calendar link");
    open::that(url).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))
}

/// Copies `url` to the clipboard.
pub fn copy_url(url: &str) -> ClientResult<()> {
    info!(url = %url, "copying calendar link to clipboard");

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClientError::Action(format!("failed to access clipboard: {}", e)))?;

    clipboard
        .set_text(url)
        .map_err(|e| ClientError::Action(format!("failed to copy to clipboard: {}", e)))
}
