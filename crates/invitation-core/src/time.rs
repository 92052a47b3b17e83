//! Time arithmetic for the countdown.
//!
//! This module provides [`remaining_until`] for clamped millisecond distances
//! between two instants, and [`CountdownParts`] for splitting a distance into
//! the day/hour/minute/second components shown on the countdown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds in one second.
pub const MS_PER_SECOND: u64 = 1_000;
/// Milliseconds in one minute.
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
/// Milliseconds in one hour.
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
/// Milliseconds in one day.
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Returns the non-negative number of milliseconds from `now` until `target`.
///
/// Returns zero when `target` is at or before `now`.
pub fn remaining_until(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let distance = target.timestamp_millis().saturating_sub(now.timestamp_millis());
    u64::try_from(distance).unwrap_or(0)
}

/// Whole-unit components of a remaining duration.
///
/// Each component is floored; the sub-second remainder is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountdownParts {
    /// Whole days.
    pub days: u64,
    /// Hours within the current day (0-23).
    pub hours: u64,
    /// Minutes within the current hour (0-59).
    pub minutes: u64,
    /// Seconds within the current minute (0-59).
    pub seconds: u64,
}

impl CountdownParts {
    /// Splits `millis` into days, hours, minutes and seconds.
    pub fn from_millis(millis: u64) -> Self {
        Self {
            days: millis / MS_PER_DAY,
            hours: (millis % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (millis % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (millis % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Returns the whole-second duration these parts represent, in milliseconds.
    pub fn to_millis(&self) -> u64 {
        self.days * MS_PER_DAY
            + self.hours * MS_PER_HOUR
            + self.minutes * MS_PER_MINUTE
            + self.seconds * MS_PER_SECOND
    }

    /// Returns `true` when every component is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
