//! Core types: countdown, phases, calendar links, buttons, formatting

pub mod assets;
pub mod buttons;
pub mod calendar;
pub mod countdown;
pub mod format;
pub mod time;
pub mod tracing;
pub mod variant;

pub use assets::AssetManifest;
pub use buttons::{ButtonProfile, Offset, RsvpAction, RsvpOutcome, RsvpState};
pub use calendar::{
    CalendarError, CalendarEvent, CalendarLinkBuilder, format_compact_utc, google_calendar_url,
};
pub use countdown::{CountdownClock, CountdownSnapshot, Phase};
pub use format::{
    FormatOptions, InvitationDetails, JsonView, OutputFormat, ScreenState, ViewFormatter,
    make_hyperlink,
};
pub use time::{CountdownParts, remaining_until};
pub use self::tracing::{LogStyle, TracingConfig, TracingError, init_tracing};
pub use variant::Variant;
