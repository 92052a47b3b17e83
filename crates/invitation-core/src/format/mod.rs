//! Output formatting for the invitation view.
//!
//! This module renders the view state in two output formats:
//! - **TTY**: Human-readable terminal screen with optional hyperlinks
//! - **JSON**: Machine-readable snapshot of the view
//!
//! # Example
//!
//! ```rust
//! use invitation_core::format::{FormatOptions, ViewFormatter};
//! use invitation_core::CountdownParts;
//!
//! let formatter = ViewFormatter::new(FormatOptions::default());
//! let line = formatter.format_countdown(&CountdownParts::from_millis(90_000));
//! assert_eq!(line, "0 Días  0 Horas  1 Minutos  30 Segundos");
//! ```

use serde::{Deserialize, Serialize};

use crate::buttons::{Offset, RsvpState};
use crate::countdown::{CountdownSnapshot, Phase};
use crate::time::CountdownParts;

/// Number of hearts in the celebration banner.
const CELEBRATION_HEARTS: usize = 12;

/// The output format for the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Whether to include hyperlinks (OSC8) in TTY output.
    pub hyperlinks: bool,
    /// Whether to draw the celebration banner on the proposal screen.
    pub celebration: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            hyperlinks: true,
            celebration: false,
        }
    }
}

/// Text content of the two screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationDetails {
    /// Name shown after "Para:".
    pub recipient: String,
    /// Headline of the event card.
    pub event_name: String,
    /// Human-readable date and time lines.
    pub when: Vec<String>,
    /// Venue address lines.
    pub venue: Vec<String>,
    /// Heading over the countdown.
    pub countdown_heading: String,
    /// Line at the bottom of the invitation screen.
    pub footer: String,
    /// Question asked on the proposal screen.
    pub proposal_question: String,
    /// Message under the proposal question.
    pub proposal_message: String,
}

impl Default for InvitationDetails {
    fn default() -> Self {
        Self {
            recipient: "Diana Laura Contreras".to_string(),
            event_name: "Concierto de Sebastian Romero".to_string(),
            when: vec![
                "Viernes 24 de Octubre 2025".to_string(),
                "19:30 hrs".to_string(),
            ],
            venue: vec![
                "FORO LA PAZ".to_string(),
                "Av. de la Paz 57, 1er piso".to_string(),
                "San Ángel, Álvaro Obregón".to_string(),
                "01000, CDMX".to_string(),
            ],
            countdown_heading: "Tiempo hasta el final del concierto:".to_string(),
            footer: "💝 Con amor y muchas ganas de compartir esta experiencia contigo 💝"
                .to_string(),
            proposal_question: "¿Puedo ser tu novio?".to_string(),
            proposal_message: "Diana Laura, después de esta hermosa velada musical, \
                               me encantaría poder compartir mi vida contigo... 💖"
                .to_string(),
        }
    }
}

/// Everything a screen render needs, borrowed from the session.
#[derive(Debug, Clone, Copy)]
pub struct ScreenState<'a> {
    /// Latest countdown snapshot.
    pub snapshot: &'a CountdownSnapshot,
    /// Button state for the current screen.
    pub buttons: &'a RsvpState,
    /// Whether background music is playing.
    pub music_playing: bool,
    /// Calendar link, if one could be built.
    pub calendar_url: Option<&'a str>,
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonView {
    /// Current phase.
    pub phase: Phase,
    /// Milliseconds until the target.
    pub remaining_ms: u64,
    /// Remaining time split into components.
    pub countdown: CountdownParts,
    /// Time the snapshot was taken, RFC 3339.
    pub at: String,
    /// Whether background music is playing.
    pub music_playing: bool,
    /// Button state.
    pub buttons: JsonButtons,
    /// Calendar link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_url: Option<String>,
}

/// Button state in JSON format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonButtons {
    pub yes_label: String,
    pub no_label: String,
    pub yes_scale: f64,
    pub no_scale: f64,
    pub no_offset: Offset,
    pub no_clicks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Renders view state for output.
#[derive(Debug, Clone, Default)]
pub struct ViewFormatter {
    options: FormatOptions,
}

impl ViewFormatter {
    /// Creates a new formatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new formatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Returns the formatter options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats countdown components as a single line.
    pub fn format_countdown(&self, parts: &CountdownParts) -> String {
        format!(
            "{} Días  {} Horas  {} Minutos  {} Segundos",
            parts.days, parts.hours, parts.minutes, parts.seconds
        )
    }

    /// Formats a one-line status suitable for a prompt or status bar.
    pub fn format_status_line(&self, snapshot: &CountdownSnapshot) -> String {
        match snapshot.phase {
            Phase::Invitation => format!("⏳ {}", self.format_countdown(&snapshot.parts)),
            Phase::Proposal => "💕 ¡Momento Especial! 💕".to_string(),
        }
    }

    /// Formats the full screen for the current phase as terminal lines.
    pub fn format_screen(
        &self,
        details: &InvitationDetails,
        state: &ScreenState<'_>,
    ) -> Vec<String> {
        let mut lines = match state.snapshot.phase {
            Phase::Invitation => self.invitation_lines(details, state),
            Phase::Proposal => self.proposal_lines(details),
        };

        lines.push(String::new());
        lines.extend(self.button_lines(state.buttons));
        lines.push(String::new());
        lines.push(format!("🎶 Música: {}", music_label(state.music_playing)));

        if let Some(url) = state.calendar_url {
            lines.push(format!("📆 {}", self.link("Agregar al calendario", url)));
        }

        if state.snapshot.phase == Phase::Invitation && !details.footer.is_empty() {
            lines.push(String::new());
            lines.push(details.footer.clone());
        }

        lines
    }

    /// Builds the JSON view.
    pub fn format_json(&self, state: &ScreenState<'_>) -> JsonView {
        let snapshot = state.snapshot;
        let buttons = state.buttons;
        JsonView {
            phase: snapshot.phase,
            remaining_ms: snapshot.remaining_ms,
            countdown: snapshot.parts,
            at: snapshot.at.to_rfc3339(),
            music_playing: state.music_playing,
            buttons: JsonButtons {
                yes_label: buttons.yes_label().to_string(),
                no_label: buttons.no_label().to_string(),
                yes_scale: buttons.yes_scale,
                no_scale: buttons.no_scale,
                no_offset: buttons.no_offset,
                no_clicks: buttons.no_clicks,
                message: buttons.plea().map(str::to_string),
            },
            calendar_url: state.calendar_url.map(str::to_string),
        }
    }

    fn invitation_lines(
        &self,
        details: &InvitationDetails,
        state: &ScreenState<'_>,
    ) -> Vec<String> {
        let mut lines = vec!["💕 Invitación Especial 💕".to_string()];
        if !details.recipient.is_empty() {
            lines.push(format!("Para: {}", details.recipient));
        }
        lines.push(String::new());
        lines.push(format!("🎵 {}", details.event_name));
        if !details.when.is_empty() {
            lines.push(format!("📅 Fecha y Hora: {}", details.when.join(", ")));
        }
        if !details.venue.is_empty() {
            lines.push(format!("📍 Lugar: {}", details.venue.join(", ")));
        }
        lines.push(String::new());
        lines.push(format!("⏳ {}", details.countdown_heading));
        lines.push(format!("   {}", self.format_countdown(&state.snapshot.parts)));
        lines.push(String::new());
        lines.push("¿Confirmas tu asistencia?".to_string());
        lines
    }

    fn proposal_lines(&self, details: &InvitationDetails) -> Vec<String> {
        let mut lines = Vec::new();
        if self.options.celebration {
            lines.push(celebration_banner());
        }
        lines.push("💕 ¡Momento Especial! 💕".to_string());
        lines.push(details.proposal_question.clone());
        if !details.proposal_message.is_empty() {
            lines.push(details.proposal_message.clone());
        }
        if self.options.celebration {
            lines.push(celebration_banner());
        }
        lines
    }

    fn button_lines(&self, buttons: &RsvpState) -> Vec<String> {
        let mut lines = vec![format!(
            "  [ {} ]   [ {} ]",
            buttons.yes_label(),
            buttons.no_label()
        )];
        if let Some(plea) = buttons.plea() {
            lines.push(format!("  {}", plea));
        }
        lines
    }

    fn link(&self, label: &str, url: &str) -> String {
        if self.options.hyperlinks {
            make_hyperlink(url, label)
        } else {
            format!("{}: {}", label, url)
        }
    }
}

fn music_label(playing: bool) -> &'static str {
    if playing { "reproduciendo" } else { "en pausa" }
}

fn celebration_banner() -> String {
    vec!["💛"; CELEBRATION_HEARTS].join(" ")
}

/// Creates an OSC8 hyperlink for terminal output.
///
/// This creates an ANSI escape sequence that modern terminals interpret as a clickable link.
pub fn make_hyperlink(url: &str, label: &str) -> String {
    // OSC8 hyperlink format: \e]8;;URL\e\\LABEL\e]8;;\e\\
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 24, 20, 0, 0).unwrap()
    }

    fn snapshot(remaining_ms: u64, phase: Phase) -> CountdownSnapshot {
        CountdownSnapshot {
            remaining_ms,
            parts: CountdownParts::from_millis(remaining_ms),
            phase,
            at: at(),
            transitioned: false,
        }
    }

    mod hyperlink_tests {
        use super::*;

        #[test]
        fn creates_osc8_link() {
            let result = make_hyperlink("https://example.com", "Click me");
            assert!(result.contains("https://example.com"));
            assert!(result.contains("Click me"));
            assert!(result.contains("\x1b]8;;"));
        }
    }

    mod output_format {
        use super::*;

        #[test]
        fn default_is_tty() {
            assert_eq!(OutputFormat::default(), OutputFormat::Tty);
        }

        #[test]
        fn serde_roundtrip() {
            let json = serde_json::to_string(&OutputFormat::Json).unwrap();
            assert_eq!(json, "\"json\"");
            let parsed: OutputFormat = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, OutputFormat::Json);
        }
    }

    mod format_options {
        use super::*;

        #[test]
        fn default_values() {
            let opts = FormatOptions::default();
            assert!(opts.hyperlinks);
            assert!(!opts.celebration);
        }
    }

    mod formatter {
        use super::*;

        fn plain() -> ViewFormatter {
            ViewFormatter::new(FormatOptions {
                hyperlinks: false,
                celebration: false,
            })
        }

        #[test]
        fn status_line_per_phase() {
            let formatter = plain();
            assert_eq!(
                formatter.format_status_line(&snapshot(3_661_000, Phase::Invitation)),
                "⏳ 0 Días  1 Horas  1 Minutos  1 Segundos"
            );
            assert_eq!(
                formatter.format_status_line(&snapshot(0, Phase::Proposal)),
                "💕 ¡Momento Especial! 💕"
            );
        }

        #[test]
        fn invitation_screen_contents() {
            let formatter = plain();
            let snap = snapshot(90_000, Phase::Invitation);
            let buttons = RsvpState::new(Phase::Invitation, 0);
            let state = ScreenState {
                snapshot: &snap,
                buttons: &buttons,
                music_playing: false,
                calendar_url: Some("https://calendar.test/add"),
            };

            let lines = formatter.format_screen(&InvitationDetails::default(), &state);

            assert_eq!(lines[0], "💕 Invitación Especial 💕");
            assert!(lines.contains(&"Para: Diana Laura Contreras".to_string()));
            assert!(lines.contains(&"   0 Días  0 Horas  1 Minutos  30 Segundos".to_string()));
            assert!(lines.contains(&"  [ ¡SÍ, IRÉ! 💕 ]   [ No puedo ]".to_string()));
            assert!(lines.contains(&"🎶 Música: en pausa".to_string()));
            let calendar = "📆 Agregar al calendario: https://calendar.test/add".to_string();
            assert!(lines.contains(&calendar));
            assert_eq!(
                lines.last().map(String::as_str),
                Some("💝 Con amor y muchas ganas de compartir esta experiencia contigo 💝")
            );
        }

        #[test]
        fn empty_details_lines_are_dropped() {
            let formatter = plain();
            let snap = snapshot(1_000, Phase::Invitation);
            let buttons = RsvpState::new(Phase::Invitation, 0);
            let state = ScreenState {
                snapshot: &snap,
                buttons: &buttons,
                music_playing: true,
                calendar_url: None,
            };
            let details = InvitationDetails {
                venue: Vec::new(),
                ..Default::default()
            };

            let lines = formatter.format_screen(&details, &state);

            assert!(!lines.iter().any(|l| l.starts_with("📍")));
            assert!(!lines.iter().any(|l| l.starts_with("📆")));
        }

        #[test]
        fn only_empty_details_are_dropped() {
            let formatter = plain();
            let snap = snapshot(1_000, Phase::Invitation);
            let buttons = RsvpState::new(Phase::Invitation, 0);
            let state = ScreenState {
                snapshot: &snap,
                buttons: &buttons,
                music_playing: false,
                calendar_url: None,
            };
            let details = InvitationDetails {
                recipient: String::new(),
                event_name: "Programa: ".to_string(),
                when: Vec::new(),
                ..Default::default()
            };

            let lines = formatter.format_screen(&details, &state);

            assert!(!lines.iter().any(|l| l.starts_with("Para:")));
            assert!(!lines.iter().any(|l| l.starts_with("📅")));
            assert!(lines.contains(&"🎵 Programa: ".to_string()));
            assert!(lines.iter().any(|l| l.starts_with("📍 Lugar: FORO LA PAZ, ")));
        }

        #[test]
        fn proposal_screen_with_plea() {
            let formatter = plain();
            let snap = snapshot(0, Phase::Proposal);
            let mut buttons = RsvpState::new(Phase::Proposal, 0);
            buttons.apply(crate::buttons::RsvpAction::PressNo);
            let state = ScreenState {
                snapshot: &snap,
                buttons: &buttons,
                music_playing: true,
                calendar_url: None,
            };

            let lines = formatter.format_screen(&InvitationDetails::default(), &state);

            assert_eq!(lines[0], "💕 ¡Momento Especial! 💕");
            assert_eq!(lines[1], "¿Puedo ser tu novio?");
            assert!(lines.contains(&"  ¿Estás segura? 🥺".to_string()));
            assert!(lines.contains(&"🎶 Música: reproduciendo".to_string()));
            assert!(!lines.iter().any(|l| l.contains("Con amor")));
        }

        #[test]
        fn celebration_banner_wraps_proposal() {
            let formatter = ViewFormatter::new(FormatOptions {
                hyperlinks: false,
                celebration: true,
            });
            let snap = snapshot(0, Phase::Proposal);
            let buttons = RsvpState::new(Phase::Proposal, 0);
            let state = ScreenState {
                snapshot: &snap,
                buttons: &buttons,
                music_playing: true,
                calendar_url: None,
            };

            let lines = formatter.format_screen(&InvitationDetails::default(), &state);

            assert_eq!(lines[0], celebration_banner());
            assert_eq!(lines[4], celebration_banner());
            assert_eq!(lines[0].matches("💛").count(), CELEBRATION_HEARTS);
        }

        #[test]
        fn hyperlinked_calendar_line() {
            let formatter = ViewFormatter::with_defaults();
            let snap = snapshot(0, Phase::Proposal);
            let buttons = RsvpState::new(Phase::Proposal, 0);
            let state = ScreenState {
                snapshot: &snap,
                buttons: &buttons,
                music_playing: false,
                calendar_url: Some("https://calendar.test/add"),
            };

            let lines = formatter.format_screen(&InvitationDetails::default(), &state);
            let link = lines.iter().find(|l| l.starts_with("📆")).unwrap();
            assert!(link.contains("\x1b]8;;https://calendar.test/add"));
        }

        #[test]
        fn json_view() {
            let formatter = plain();
            let snap = snapshot(90_000, Phase::Invitation);
            let mut buttons = RsvpState::new(Phase::Invitation, 5);
            buttons.apply(crate::buttons::RsvpAction::PressNo);
            let state = ScreenState {
                snapshot: &snap,
                buttons: &buttons,
                music_playing: false,
                calendar_url: None,
            };

            let view = formatter.format_json(&state);
            let value = serde_json::to_value(&view).unwrap();

            assert_eq!(value["phase"], "invitation");
            assert_eq!(value["remaining_ms"], 90_000);
            assert_eq!(value["countdown"]["minutes"], 1);
            assert_eq!(value["countdown"]["seconds"], 30);
            assert_eq!(value["at"], "2025-10-24T20:00:00+00:00");
            assert_eq!(value["buttons"]["no_clicks"], 1);
            assert_eq!(value["buttons"]["no_label"], "No puedo");
            assert!(value.get("calendar_url").is_none());
        }
    }
}
