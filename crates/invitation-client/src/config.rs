//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/invitation/config.toml` by default. Every section is optional;
//! a missing file yields the built-in concert invitation.
//!
//! Event times are wall-clock times in the event's IANA timezone:
//!
//! ```toml
//! [event]
//! title = "Invitación: Diana E Ian"
//! start = "2025-10-24T19:30:00"
//! end = "2025-10-24T21:30:00"
//! timezone = "America/Mexico_City"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use invitation_core::calendar::DEFAULT_TIMEZONE;
use invitation_core::{AssetManifest, CalendarError, CalendarEvent, InvitationDetails, Variant};
use invitation_runtime::TickerConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the invitation client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// The event being counted down to.
    pub event: EventSettings,

    /// Display settings.
    pub display: DisplaySettings,

    /// Asset locations.
    pub assets: AssetManifest,

    /// External audio player.
    pub audio: AudioSettings,

    /// Tick settings.
    pub ticker: TickerSettings,
}

/// The event: its title, local times and calendar metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventSettings {
    pub title: String,

    /// Local start time in `timezone`.
    pub start: NaiveDateTime,

    /// Local end time in `timezone`. The countdown targets this instant.
    pub end: NaiveDateTime,

    /// IANA timezone name.
    pub timezone: String,

    pub description: Option<String>,
    pub location: Option<String>,
}

impl Default for EventSettings {
    fn default() -> Self {
        let day = NaiveDate::from_ymd_opt(2025, 10, 24).unwrap_or_default();
        Self {
            title: "Invitación: Diana E Ian".to_string(),
            start: day.and_hms_opt(19, 30, 0).unwrap_or_default(),
            end: day.and_hms_opt(21, 30, 0).unwrap_or_default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            description: None,
            location: None,
        }
    }
}

impl EventSettings {
    /// Resolves the local times into a calendar event.
    pub fn to_calendar_event(&self) -> Result<CalendarEvent, CalendarError> {
        let mut event =
            CalendarEvent::from_local(&self.title, self.start, self.end, &self.timezone)?;
        if let Some(ref description) = self.description {
            event = event.with_description(description);
        }
        if let Some(ref location) = self.location {
            event = event.with_location(location);
        }
        Ok(event)
    }

    /// Returns the countdown target: the event end as an instant.
    pub fn countdown_target(&self) -> Result<DateTime<Utc>, CalendarError> {
        self.to_calendar_event().map(|event| event.end)
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Which variant of the view to show.
    pub variant: Variant,

    /// Emit OSC8 hyperlinks for URLs.
    pub hyperlinks: bool,

    /// Texts shown on the two screens.
    pub details: InvitationDetails,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            hyperlinks: true,
            details: InvitationDetails::default(),
        }
    }
}

/// External player used for background music.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Player program; unset disables music.
    pub player: Option<String>,

    /// Arguments passed before the audio source.
    pub args: Vec<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            player: Some("mpv".to_string()),
            args: vec!["--no-video".to_string(), "--really-quiet".to_string()],
        }
    }
}

/// Tick settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerSettings {
    /// Milliseconds between countdown evaluations.
    pub period_ms: u64,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self { period_ms: 1000 }
    }
}

impl TickerSettings {
    pub fn to_ticker_config(&self) -> TickerConfig {
        TickerConfig::new(Duration::from_millis(self.period_ms))
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("invitation")
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), String> {
        let event = self
            .event
            .to_calendar_event()
            .map_err(|e| format!("[event]: {}", e))?;
        if event.end < event.start {
            return Err(format!(
                "[event]: end ({}) is before start ({})",
                self.event.end, self.event.start
            ));
        }
        if self.ticker.period_ms == 0 {
            return Err("[ticker]: period_ms must be greater than zero".to_string());
        }
        if let Some(ref player) = self.audio.player
            && player.trim().is_empty()
        {
            return Err("[audio]: player must not be empty; remove it to disable music".to_string());
        }
        Ok(())
    }
}
