//! One-shot countdown.

use chrono::{DateTime, Utc};
use invitation_core::{
    CountdownClock, CountdownParts, CountdownSnapshot, OutputFormat, Phase, Variant,
    ViewFormatter,
};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// The countdown fields of a watch frame, under the same keys.
#[derive(Debug, Serialize)]
struct CountdownJson {
    phase: Phase,
    remaining_ms: u64,
    countdown: CountdownParts,
    at: String,
}

/// Prints the countdown as of `at` (now when unset).
pub fn run(
    config: &ClientConfig,
    variant: Variant,
    at: Option<DateTime<Utc>>,
    format: OutputFormat,
) -> ClientResult<()> {
    let target = config.event.countdown_target()?;
    let snapshot = evaluate(target, variant, at.unwrap_or_else(Utc::now));
    println!("{}", render(&snapshot, format)?);
    Ok(())
}

/// Evaluates a fresh clock once.
pub fn evaluate(target: DateTime<Utc>, variant: Variant, now: DateTime<Utc>) -> CountdownSnapshot {
    CountdownClock::new(target, variant.initial_phase()).tick(now)
}

pub fn render(snapshot: &CountdownSnapshot, format: OutputFormat) -> ClientResult<String> {
    match format {
        OutputFormat::Tty => Ok(ViewFormatter::with_defaults().format_status_line(snapshot)),
        OutputFormat::Json => {
            let json = CountdownJson {
                phase: snapshot.phase,
                remaining_ms: snapshot.remaining_ms,
                countdown: snapshot.parts,
                at: snapshot.at.to_rfc3339(),
            };
            Ok(serde_json::to_string(&json)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use invitation_core::{RsvpState, ScreenState};

    fn target() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 25, 3, 30, 0).unwrap()
    }

    #[test]
    fn before_target() {
        let at = Utc.with_ymd_and_hms(2025, 10, 24, 2, 29, 59).unwrap();
        let snapshot = evaluate(target(), Variant::Invitation, at);
        assert_eq!(snapshot.phase, Phase::Invitation);
        assert_eq!(
            render(&snapshot, OutputFormat::Tty).unwrap(),
            "⏳ 1 Días  1 Horas  0 Minutos  1 Segundos"
        );
    }

    #[test]
    fn past_target_flips_on_first_tick() {
        let at = target() + chrono::Duration::days(3);
        let snapshot = evaluate(target(), Variant::Invitation, at);
        assert_eq!(snapshot.phase, Phase::Proposal);
        assert_eq!(snapshot.remaining_ms, 0);
        assert!(snapshot.transitioned);
    }

    #[test]
    fn proposal_variant_starts_in_proposal() {
        let at = target() - chrono::Duration::days(1);
        let snapshot = evaluate(target(), Variant::Proposal, at);
        assert_eq!(snapshot.phase, Phase::Proposal);
        assert_eq!(snapshot.remaining_ms, 86_400_000);
    }

    #[test]
    fn json_output() {
        let at = target() - chrono::Duration::seconds(90);
        let snapshot = evaluate(target(), Variant::Invitation, at);
        let json = render(&snapshot, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["remaining_ms"], 90_000);
        assert_eq!(value["phase"], "invitation");
        assert_eq!(value["countdown"]["minutes"], 1);
        assert_eq!(value["countdown"]["seconds"], 30);
        assert!(value.get("parts").is_none());
        assert!(value.get("transitioned").is_none());
    }

    #[test]
    fn json_matches_watch_frame_fields() {
        let at = target() - chrono::Duration::minutes(61);
        let snapshot = evaluate(target(), Variant::Invitation, at);
        let buttons = RsvpState::new(Phase::Invitation, 0);
        let screen = ScreenState {
            snapshot: &snapshot,
            buttons: &buttons,
            music_playing: false,
            calendar_url: None,
        };
        let frame = serde_json::to_value(ViewFormatter::with_defaults().format_json(&screen))
            .unwrap();

        let json = render(&snapshot, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for (key, field) in object {
            assert_eq!(&frame[key], field, "field {key}");
        }
    }
}
