//! Countdown clock and the invitation/proposal phase machine.
//!
//! A [`CountdownClock`] is created once per view with a fixed target instant.
//! Every tick samples the wall clock, publishes the clamped remaining time, and
//! flips the [`Phase`] to [`Phase::Proposal`] once the target has passed. The
//! flip happens at most once and is never undone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::{CountdownParts, remaining_until};

/// Which screen the view is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Event details, countdown and RSVP buttons.
    #[default]
    Invitation,
    /// The post-event question. Terminal state.
    Proposal,
}

impl Phase {
    /// Returns the phase name used in logs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invitation => "invitation",
            Self::Proposal => "proposal",
        }
    }

    /// Returns `true` for [`Phase::Proposal`].
    pub fn is_proposal(&self) -> bool {
        matches!(self, Self::Proposal)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value published to observers after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    /// Milliseconds until the target, zero once it has passed.
    pub remaining_ms: u64,
    /// `remaining_ms` split into display components.
    pub parts: CountdownParts,
    /// Phase after this tick.
    pub phase: Phase,
    /// Wall-clock time the tick was evaluated at.
    pub at: DateTime<Utc>,
    /// `true` only on the tick that moved the phase to [`Phase::Proposal`].
    #[serde(skip)]
    pub transitioned: bool,
}

impl CountdownSnapshot {
    /// Returns `true` once the target instant has passed.
    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }
}

/// Remaining time to a fixed target, with a one-way phase flag.
#[derive(Debug, Clone)]
pub struct CountdownClock {
    target: DateTime<Utc>,
    remaining_ms: u64,
    phase: Phase,
}

impl CountdownClock {
    /// Creates a clock counting down to `target`, starting in `initial_phase`.
    ///
    /// Nothing is evaluated until the first [`tick`](Self::tick); a target
    /// already in the past flips the phase on that first tick.
    pub fn new(target: DateTime<Utc>, initial_phase: Phase) -> Self {
        Self {
            target,
            remaining_ms: 0,
            phase: initial_phase,
        }
    }

    /// Returns the target instant.
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the remaining milliseconds as of the last tick.
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    /// Re-evaluates the countdown at `now`.
    ///
    /// Calling this again after expiry is harmless: remaining stays at zero and
    /// the phase stays [`Phase::Proposal`].
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownSnapshot {
        let remaining_ms = remaining_until(self.target, now);
        let mut transitioned = false;

        if remaining_ms == 0 && !self.phase.is_proposal() {
            self.phase = Phase::Proposal;
            transitioned = true;
        }
        self.remaining_ms = remaining_ms;

        CountdownSnapshot {
            remaining_ms,
            parts: CountdownParts::from_millis(remaining_ms),
            phase: self.phase,
            at: now,
            transitioned,
        }
    }

    /// Returns the snapshot for the last evaluated state without ticking.
    pub fn snapshot_at(&self, at: DateTime<Utc>) -> CountdownSnapshot {
        CountdownSnapshot {
            remaining_ms: self.remaining_ms,
            parts: CountdownParts::from_millis(self.remaining_ms),
            phase: self.phase,
            at,
            transitioned: false,
        }
    }
}
