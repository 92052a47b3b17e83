//! Terminal frames for the live view.

use invitation_core::{
    FormatOptions, InvitationDetails, JsonView, OutputFormat, ScreenState, Variant, ViewFormatter,
};
use serde::Serialize;

use crate::error::ClientResult;

/// Clears the screen and moves the cursor home.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Shown under every TTY frame.
pub const HELP: &str = "Comandos: si · no · music · calendar · quit";

/// One JSON line per frame.
#[derive(Debug, Serialize)]
struct JsonFrame<'a> {
    #[serde(flatten)]
    view: JsonView,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

/// Turns session state into whole frames.
#[derive(Debug, Clone)]
pub struct Renderer {
    formatter: ViewFormatter,
    details: InvitationDetails,
    format: OutputFormat,
}

impl Renderer {
    pub fn new(
        variant: Variant,
        hyperlinks: bool,
        details: InvitationDetails,
        format: OutputFormat,
    ) -> Self {
        let formatter = ViewFormatter::new(FormatOptions {
            hyperlinks,
            celebration: variant.celebration(),
        });
        Self {
            formatter,
            details,
            format,
        }
    }

    /// Renders one frame. `notice` is the last action feedback, if any.
    pub fn render(&self, screen: &ScreenState<'_>, notice: Option<&str>) -> ClientResult<String> {
        match self.format {
            OutputFormat::Tty => Ok(self.render_tty(screen, notice)),
            OutputFormat::Json => {
                let frame = JsonFrame {
                    view: self.formatter.format_json(screen),
                    notice,
                };
                Ok(serde_json::to_string(&frame)?)
            }
        }
    }

    fn render_tty(&self, screen: &ScreenState<'_>, notice: Option<&str>) -> String {
        let mut out = String::from(CLEAR);
        for line in self.formatter.format_screen(&self.details, screen) {
            out.push_str(&line);
            out.push('\n');
        }
        if let Some(notice) = notice {
            out.push('\n');
            out.push_str("» ");
            out.push_str(notice);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(HELP);
        out
    }
}
