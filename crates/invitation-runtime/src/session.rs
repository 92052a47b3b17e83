//! View-owned state.
//!
//! A [`ViewSession`] is the single record behind one rendered view: the latest
//! countdown snapshot, the button state for the current screen, and the music
//! player. User input goes through [`ViewSession::handle`], a reducer that
//! returns the [`ViewEffect`] the front end should carry out.

use invitation_core::{
    CountdownSnapshot, Phase, RsvpAction, RsvpOutcome, RsvpState, ScreenState, Variant,
};
use tracing::{debug, info};

use crate::audio::{AudioSink, MusicPlayer, PlaybackState};

/// Input the view accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    PressYes,
    PressNo,
    ToggleMusic,
    ExportCalendar,
}

/// What the front end should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    /// Redraw; nothing else.
    Redraw,
    /// Show a message to the user.
    Message(String),
    /// Open this URL in a new browser tab/window.
    OpenUrl(String),
}

/// State of one active view.
#[derive(Debug)]
pub struct ViewSession<S: AudioSink> {
    variant: Variant,
    snapshot: CountdownSnapshot,
    buttons: RsvpState,
    player: MusicPlayer<S>,
    calendar_url: Option<String>,
    seed: u64,
}

impl<S: AudioSink> ViewSession<S> {
    /// Creates a session from the first published snapshot.
    pub fn new(
        variant: Variant,
        snapshot: CountdownSnapshot,
        sink: S,
        calendar_url: Option<String>,
        seed: u64,
    ) -> Self {
        Self {
            variant,
            snapshot,
            buttons: RsvpState::new(snapshot.phase, seed),
            player: MusicPlayer::new(sink),
            calendar_url,
            seed,
        }
    }

    /// Runs the activation side effects of the deployment variant.
    pub fn activate(&mut self) {
        info!(variant = self.variant.as_str(), phase = %self.snapshot.phase, "View activated");
        if self.variant.autoplay() {
            self.player.autoplay();
        }
    }

    /// Folds a new snapshot into the session.
    ///
    /// Returns the new phase if the screen changed. Entering a new screen
    /// starts its buttons from rest.
    pub fn observe(&mut self, snapshot: CountdownSnapshot) -> Option<Phase> {
        self.snapshot = snapshot;
        self.player.sync();

        if snapshot.phase == self.buttons.phase {
            return None;
        }
        debug!(from = %self.buttons.phase, to = %snapshot.phase, "Screen changed");
        self.buttons = RsvpState::new(snapshot.phase, self.seed);
        Some(snapshot.phase)
    }

    /// Applies a user action.
    pub fn handle(&mut self, action: UserAction) -> ViewEffect {
        match action {
            UserAction::PressYes => self.press(RsvpAction::PressYes),
            UserAction::PressNo => self.press(RsvpAction::PressNo),
            UserAction::ToggleMusic => {
                self.player.toggle();
                ViewEffect::Redraw
            }
            UserAction::ExportCalendar => match &self.calendar_url {
                Some(url) => ViewEffect::OpenUrl(url.clone()),
                None => ViewEffect::Message("No hay evento para exportar".to_string()),
            },
        }
    }

    fn press(&mut self, action: RsvpAction) -> ViewEffect {
        match self.buttons.apply(action) {
            RsvpOutcome::Accepted(message) => {
                info!(phase = %self.buttons.phase, "Accepted");
                ViewEffect::Message(message.to_string())
            }
            RsvpOutcome::Dodged(_) => {
                debug!(
                    clicks = self.buttons.no_clicks,
                    x = self.buttons.no_offset.x,
                    y = self.buttons.no_offset.y,
                    "No button dodged"
                );
                ViewEffect::Redraw
            }
        }
    }

    /// Returns the borrowed state a renderer needs.
    pub fn screen(&self) -> ScreenState<'_> {
        ScreenState {
            snapshot: &self.snapshot,
            buttons: &self.buttons,
            music_playing: self.player.is_playing(),
            calendar_url: self.calendar_url.as_deref(),
        }
    }

    /// Returns the deployment variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.snapshot.phase
    }

    /// Returns the latest snapshot.
    pub fn snapshot(&self) -> &CountdownSnapshot {
        &self.snapshot
    }

    /// Returns the button state for the current screen.
    pub fn buttons(&self) -> &RsvpState {
        &self.buttons
    }

    /// Returns the playback state.
    pub fn playback(&self) -> PlaybackState {
        self.player.state()
    }

    /// Releases resources held by the view.
    pub fn teardown(&mut self) {
        self.player.stop();
        debug!("View torn down");
    }
}
