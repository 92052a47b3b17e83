//! "Add to calendar" link construction.
//!
//! [`CalendarLinkBuilder`] turns a [`CalendarEvent`] into the event-template
//! URL understood by Google Calendar. Building a link is total and
//! deterministic: the same event always yields the same string, and the
//! builder never consults the current time.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use invitation_core::calendar::{CalendarEvent, google_calendar_url};
//!
//! let event = CalendarEvent::new(
//!     "Dinner",
//!     Utc.with_ymd_and_hms(2025, 10, 25, 1, 30, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 10, 25, 3, 30, 0).unwrap(),
//! );
//! let url = google_calendar_url(&event);
//! assert!(url.contains("dates=20251025T013000Z%2F20251025T033000Z"));
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use url::form_urlencoded;

/// Timezone used when an event does not name one.
pub const DEFAULT_TIMEZONE: &str = "America/Mexico_City";

/// Google Calendar event-template endpoint.
pub const GOOGLE_CALENDAR_ENDPOINT: &str = "https://calendar.google.com/calendar/render";

/// Compact UTC layout expected by the calendar provider (`YYYYMMDDTHHMMSSZ`).
const COMPACT_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Errors raised while interpreting local event times.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The timezone is not a known IANA identifier.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The local time falls in a gap (e.g. skipped by a DST change).
    #[error("local time {time} does not exist in {timezone}")]
    NonexistentLocalTime { time: NaiveDateTime, timezone: String },
}

/// An event to export as a calendar link.
///
/// `end` is expected to be after `start`, but this is not checked: an inverted
/// range still produces a well-formed link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title.
    pub title: String,
    /// Event start.
    pub start: DateTime<Utc>,
    /// Event end.
    pub end: DateTime<Utc>,
    /// Free-text description, omitted from the link when empty.
    pub description: Option<String>,
    /// Location text, omitted from the link when empty.
    pub location: Option<String>,
    /// IANA timezone the provider should display the event in.
    pub timezone: String,
}

impl CalendarEvent {
    /// Creates an event in the default timezone.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            description: None,
            location: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    /// Creates an event from wall-clock times in the given IANA timezone.
    ///
    /// Ambiguous local times (a repeated hour) resolve to the earlier instant.
    pub fn from_local(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        timezone: &str,
    ) -> Result<Self, CalendarError> {
        let tz = parse_timezone(timezone)?;
        let start = resolve_local(&tz, start, timezone)?;
        let end = resolve_local(&tz, end, timezone)?;
        Ok(Self::new(title, start, end).with_timezone(timezone))
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the timezone identifier passed to the provider.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }
}

/// Parses an IANA timezone identifier.
pub fn parse_timezone(name: &str) -> Result<Tz, CalendarError> {
    name.parse::<Tz>()
        .map_err(|_| CalendarError::UnknownTimezone(name.to_string()))
}

fn resolve_local(
    tz: &Tz,
    local: NaiveDateTime,
    name: &str,
) -> Result<DateTime<Utc>, CalendarError> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| CalendarError::NonexistentLocalTime {
            time: local,
            timezone: name.to_string(),
        })
}

/// Formats an instant as `YYYYMMDDTHHMMSSZ` in UTC, dropping fractional seconds.
pub fn format_compact_utc(instant: DateTime<Utc>) -> String {
    instant.format(COMPACT_UTC_FORMAT).to_string()
}

/// Builds provider "add event" links.
#[derive(Debug, Clone)]
pub struct CalendarLinkBuilder {
    endpoint: String,
}

impl Default for CalendarLinkBuilder {
    fn default() -> Self {
        Self::google()
    }
}

impl CalendarLinkBuilder {
    /// Creates a builder targeting Google Calendar.
    pub fn google() -> Self {
        Self::with_endpoint(GOOGLE_CALENDAR_ENDPOINT)
    }

    /// Creates a builder targeting a custom template endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Returns the endpoint links are built against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the link for `event`.
    pub fn build(&self, event: &CalendarEvent) -> String {
        let dates = format!(
            "{}/{}",
            format_compact_utc(event.start),
            format_compact_utc(event.end)
        );

        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &event.title)
            .append_pair("dates", &dates)
            .append_pair("ctz", &event.timezone);

        if let Some(description) = non_empty(event.description.as_deref()) {
            query.append_pair("details", description);
        }
        if let Some(location) = non_empty(event.location.as_deref()) {
            query.append_pair("location", location);
        }

        format!("{}?{}", self.endpoint, query.finish())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Convenience function to build a Google Calendar link.
///
/// See [`CalendarLinkBuilder::build`] for details.
pub fn google_calendar_url(event: &CalendarEvent) -> String {
    CalendarLinkBuilder::google().build(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn concert() -> CalendarEvent {
        CalendarEvent::from_local(
            "Invitación: Diana E Ian",
            local(2025, 10, 24, 19, 30),
            local(2025, 10, 24, 21, 30),
            "America/Mexico_City",
        )
        .unwrap()
    }

    fn query_keys(url: &str) -> Vec<String> {
        let (_, query) = url.split_once('?').unwrap();
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, _)| k.into_owned())
            .collect()
    }

    mod timestamps {
        use super::*;

        #[test]
        fn compact_utc() {
            assert_eq!(format_compact_utc(utc(2025, 10, 25, 1, 30, 0)), "20251025T013000Z");
        }

        #[test]
        fn drops_fractional_seconds() {
            let instant = utc(2025, 1, 2, 3, 4, 5) + chrono::Duration::milliseconds(987);
            assert_eq!(format_compact_utc(instant), "20250102T030405Z");
        }
    }

    mod local_times {
        use super::*;

        #[test]
        fn mexico_city_is_utc_minus_six() {
            let event = concert();
            assert_eq!(event.start, utc(2025, 10, 25, 1, 30, 0));
            assert_eq!(event.end, utc(2025, 10, 25, 3, 30, 0));
            assert_eq!(event.timezone, "America/Mexico_City");
        }

        #[test]
        fn unknown_timezone() {
            let err = CalendarEvent::from_local(
                "x",
                local(2025, 1, 1, 0, 0),
                local(2025, 1, 1, 1, 0),
                "Mars/Olympus_Mons",
            )
            .unwrap_err();
            assert_eq!(err, CalendarError::UnknownTimezone("Mars/Olympus_Mons".into()));
        }

        #[test]
        fn skipped_hour_is_an_error() {
            // 2025-03-09 02:30 does not exist in New York.
            let err = CalendarEvent::from_local(
                "x",
                local(2025, 3, 9, 2, 30),
                local(2025, 3, 9, 4, 0),
                "America/New_York",
            )
            .unwrap_err();
            assert!(matches!(err, CalendarError::NonexistentLocalTime { .. }));
        }

        #[test]
        fn repeated_hour_takes_earliest() {
            // 2025-11-02 01:30 happens twice in New York; the first is EDT (UTC-4).
            let event = CalendarEvent::from_local(
                "x",
                local(2025, 11, 2, 1, 30),
                local(2025, 11, 2, 3, 0),
                "America/New_York",
            )
            .unwrap();
            assert_eq!(event.start, utc(2025, 11, 2, 5, 30, 0));
        }
    }

    mod links {
        use super::*;

        #[test]
        fn concert_link() {
            insta::assert_snapshot!(
                google_calendar_url(&concert()),
                @"https://calendar.google.com/calendar/render?action=TEMPLATE&text=Invitaci%C3%B3n%3A+Diana+E+Ian&dates=20251025T013000Z%2F20251025T033000Z&ctz=America%2FMexico_City"
            );
        }

        #[test]
        fn required_parameters() {
            let url = google_calendar_url(&concert());
            assert!(url.starts_with("https://calendar.google.com/calendar/render?"));
            assert!(url.contains("action=TEMPLATE"));
            assert!(url.contains("ctz=America%2FMexico_City"));

            let (_, query) = url.split_once('?').unwrap();
            let dates = form_urlencoded::parse(query.as_bytes())
                .find(|(k, _)| k == "dates")
                .map(|(_, v)| v.into_owned())
                .unwrap();
            let (start, end) = dates.split_once('/').unwrap();
            for stamp in [start, end] {
                assert_eq!(stamp.len(), 16);
                assert!(stamp.ends_with('Z'));
                assert_eq!(&stamp[8..9], "T");
            }
        }

        #[test]
        fn optional_fields_omitted() {
            let keys = query_keys(&google_calendar_url(&concert()));
            assert_eq!(keys, ["action", "text", "dates", "ctz"]);
        }

        #[test]
        fn empty_optional_fields_omitted() {
            let event = concert().with_description("").with_location("");
            let keys = query_keys(&google_calendar_url(&event));
            assert!(!keys.contains(&"details".to_string()));
            assert!(!keys.contains(&"location".to_string()));
        }

        #[test]
        fn optional_fields_encoded() {
            let event = concert()
                .with_description("Concierto & cena")
                .with_location("FORO LA PAZ, Av. de la Paz 57");
            let url = google_calendar_url(&event);
            assert!(url.ends_with(
                "&details=Concierto+%26+cena&location=FORO+LA+PAZ%2C+Av.+de+la+Paz+57"
            ));
        }

        #[test]
        fn stable_output() {
            let event = concert().with_location("San Ángel");
            assert_eq!(google_calendar_url(&event), google_calendar_url(&event.clone()));
        }

        #[test]
        fn inverted_range_is_not_rejected() {
            let event = CalendarEvent::new(
                "backwards",
                utc(2025, 10, 25, 3, 30, 0),
                utc(2025, 10, 25, 1, 30, 0),
            );
            let url = google_calendar_url(&event);
            assert!(url.contains("dates=20251025T033000Z%2F20251025T013000Z"));
        }

        #[test]
        fn custom_endpoint() {
            let builder = CalendarLinkBuilder::with_endpoint("https://example.test/add");
            let url = builder.build(&concert());
            assert!(url.starts_with("https://example.test/add?action=TEMPLATE&"));
            assert_eq!(builder.endpoint(), "https://example.test/add");
            assert_eq!(CalendarLinkBuilder::default().endpoint(), GOOGLE_CALENDAR_ENDPOINT);
        }
    }
}
