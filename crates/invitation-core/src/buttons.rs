//! Yes/No button state for the RSVP and proposal screens.
//!
//! The buttons are a small reducer: [`RsvpState::apply`] takes an
//! [`RsvpAction`] and returns the next state. Pressing "No" shrinks the No
//! button, grows the Yes button, and jumps the No button to a pseudo-random
//! offset inside the active [`ButtonProfile`]'s bounds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::countdown::Phase;

/// Per-phase constants for the evasive buttons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonProfile {
    /// Smallest scale the No button shrinks to.
    pub no_scale_floor: f64,
    /// Amount the No button shrinks per press.
    pub no_scale_step: f64,
    /// Largest scale the Yes button grows to.
    pub yes_scale_cap: f64,
    /// Amount the Yes button grows per No press.
    pub yes_scale_step: f64,
    /// Horizontal offset range, applied as `[-x, x]`.
    pub max_offset_x: f64,
    /// Vertical offset range, applied as `[-y, y]`.
    pub max_offset_y: f64,
}

impl ButtonProfile {
    /// Profile for the invitation (RSVP) screen.
    pub const INVITATION: Self = Self {
        no_scale_floor: 0.3,
        no_scale_step: 0.15,
        yes_scale_cap: 1.5,
        yes_scale_step: 0.1,
        max_offset_x: 100.0,
        max_offset_y: 50.0,
    };

    /// Profile for the proposal screen.
    pub const PROPOSAL: Self = Self {
        no_scale_floor: 0.2,
        no_scale_step: 0.2,
        yes_scale_cap: 2.0,
        yes_scale_step: 0.15,
        max_offset_x: 150.0,
        max_offset_y: 75.0,
    };

    /// Returns the profile used on `phase`'s screen.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Invitation => Self::INVITATION,
            Phase::Proposal => Self::PROPOSAL,
        }
    }
}

/// Displacement of the No button from its resting place, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// User input on the buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpAction {
    PressYes,
    PressNo,
}

/// What the view should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsvpOutcome {
    /// The Yes button was pressed; show the acceptance message.
    Accepted(&'static str),
    /// The No button dodged; show the plea, if any.
    Dodged(Option<&'static str>),
}

/// Button state owned by one screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsvpState {
    /// Screen this state belongs to.
    pub phase: Phase,
    /// Number of times No was pressed.
    pub no_clicks: u32,
    /// Current scale of the Yes button.
    pub yes_scale: f64,
    /// Current scale of the No button.
    pub no_scale: f64,
    /// Current displacement of the No button.
    pub no_offset: Offset,
    /// Base seed for the offset generator.
    seed: u64,
}

impl RsvpState {
    /// Creates resting button state for `phase`.
    ///
    /// Each No press seeds its own generator from `seed` plus the click count,
    /// so a given seed replays the same sequence of jumps.
    pub fn new(phase: Phase, seed: u64) -> Self {
        Self {
            phase,
            no_clicks: 0,
            yes_scale: 1.0,
            no_scale: 1.0,
            no_offset: Offset::default(),
            seed,
        }
    }

    /// Returns the profile for this state's screen.
    pub fn profile(&self) -> ButtonProfile {
        ButtonProfile::for_phase(self.phase)
    }

    /// Applies `action` and returns what the view should show.
    pub fn apply(&mut self, action: RsvpAction) -> RsvpOutcome {
        match action {
            RsvpAction::PressYes => RsvpOutcome::Accepted(acceptance_message(self.phase)),
            RsvpAction::PressNo => {
                let profile = self.profile();
                self.no_clicks = self.no_clicks.saturating_add(1);
                self.no_scale = (self.no_scale - profile.no_scale_step).max(profile.no_scale_floor);
                self.yes_scale =
                    (self.yes_scale + profile.yes_scale_step).min(profile.yes_scale_cap);
                let seed = self.seed.wrapping_add(u64::from(self.no_clicks));
                self.no_offset = evasive_offset(&profile, seed);
                RsvpOutcome::Dodged(self.plea())
            }
        }
    }

    /// Returns the current No button label.
    pub fn no_label(&self) -> &'static str {
        match self.phase {
            Phase::Invitation => match self.no_clicks {
                0..=2 => "No puedo",
                3..=4 => "No...",
                _ => "😢",
            },
            Phase::Proposal => match self.no_clicks {
                0..=3 => "No",
                4..=5 => "No...",
                _ => "😢",
            },
        }
    }

    /// Returns the current Yes button label.
    pub fn yes_label(&self) -> &'static str {
        match self.phase {
            Phase::Invitation => "¡SÍ, IRÉ! 💕",
            Phase::Proposal => "¡SÍ! 💕",
        }
    }

    /// Returns the message shown under the buttons, if any.
    pub fn plea(&self) -> Option<&'static str> {
        let message = match self.phase {
            Phase::Invitation => match self.no_clicks {
                0 => return None,
                1 => "¿Estás segura? ¡Va a ser increíble! 🎵",
                2 => "¡Pero es Sebastian Romero! 🌟",
                3 => "¡Por favor, será una noche mágica! ✨",
                4 => "¡Solo esta vez! 🥺",
                _ => "Ok, pero ¿segura que no? 💔",
            },
            Phase::Proposal => match self.no_clicks {
                0 => return None,
                1 => "¿Estás segura? 🥺",
                2 => "Pero... ¡fue una noche tan hermosa! 💫",
                3 => "¿No te gustó el concierto? 🎵",
                4 => "Solo dame una oportunidad... 💝",
                5 => "¡Por favor! 🙏",
                _ => "Ok, entiendo... pero ¿segura? 💔",
            },
        };
        Some(message)
    }
}

/// Returns the message shown when Yes is pressed on `phase`'s screen.
pub fn acceptance_message(phase: Phase) -> &'static str {
    match phase {
        Phase::Invitation => "¡Qué maravilloso! 🥰 ¡Nos vemos en el concierto! 💕",
        Phase::Proposal => "¡Sí acepto ser tu novia! 💕🥰✨ ¡Eres increíble!",
    }
}

/// Draws a No-button offset within `profile`'s bounds from a per-click seed.
pub fn evasive_offset(profile: &ButtonProfile, seed: u64) -> Offset {
    let mut rng = StdRng::seed_from_u64(seed);
    Offset {
        x: rng.random_range(-profile.max_offset_x..=profile.max_offset_x),
        y: rng.random_range(-profile.max_offset_y..=profile.max_offset_y),
    }
}
