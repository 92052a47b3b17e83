//! Deployment variants of the view.
//!
//! Both variants share the same countdown and calendar logic; they differ only
//! in the screen shown before the target passes, whether music starts on its
//! own, and whether the celebration decoration is shown.

use serde::{Deserialize, Serialize};

use crate::countdown::Phase;

/// Which build of the page is deployed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Countdown first, manual music, no celebration.
    #[default]
    Invitation,
    /// Proposal straight away, autoplay, celebration.
    Proposal,
}

impl Variant {
    /// Returns the phase the view opens in.
    pub fn initial_phase(&self) -> Phase {
        match self {
            Self::Invitation => Phase::Invitation,
            Self::Proposal => Phase::Proposal,
        }
    }

    /// Returns `true` if music should start when the view activates.
    pub fn autoplay(&self) -> bool {
        matches!(self, Self::Proposal)
    }

    /// Returns `true` if the celebration decoration is shown.
    pub fn celebration(&self) -> bool {
        matches!(self, Self::Proposal)
    }

    /// Returns the variant name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invitation => "invitation",
            Self::Proposal => "proposal",
        }
    }
}

impl std::str::FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "invitation" => Ok(Self::Invitation),
            "proposal" => Ok(Self::Proposal),
            other => Err(format!("unknown variant '{}', expected invitation or proposal", other)),
        }
    }
}
