//! Background music playback.
//!
//! [`MusicPlayer`] tracks whether music is playing on top of an [`AudioSink`].
//! Starting playback may fail (no player installed, playback refused); such
//! failures are logged and leave the player paused. They never reach the
//! caller.

use std::io;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

/// Reasons playback could not start.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No player command is configured.
    #[error("no audio player configured")]
    NoPlayer,

    /// The player process could not be spawned.
    #[error("failed to start audio player '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The sink refused to play.
    #[error("playback blocked: {0}")]
    Blocked(String),
}

/// Something that can play and pause the background track.
pub trait AudioSink: Send {
    /// Starts or resumes playback.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pauses playback. Pausing a paused sink does nothing.
    fn pause(&mut self);

    /// Returns `false` if playback stopped on its own since the last call.
    fn is_alive(&mut self) -> bool {
        true
    }
}

/// Whether music is audible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    #[default]
    Paused,
}

/// Play/pause state over an [`AudioSink`].
#[derive(Debug)]
pub struct MusicPlayer<S: AudioSink> {
    sink: S,
    state: PlaybackState,
}

impl<S: AudioSink> MusicPlayer<S> {
    /// Creates a paused player.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: PlaybackState::Paused,
        }
    }

    /// Returns the playback state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Returns `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Returns the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub(crate) fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Flips between playing and paused and returns the new state.
    pub fn toggle(&mut self) -> PlaybackState {
        match self.state {
            PlaybackState::Playing => {
                self.sink.pause();
                self.state = PlaybackState::Paused;
                debug!("Music paused");
            }
            PlaybackState::Paused => self.start(),
        }
        self.state
    }

    /// Starts playback on activation if not already playing.
    pub fn autoplay(&mut self) -> PlaybackState {
        if !self.is_playing() {
            self.start();
        }
        self.state
    }

    /// Downgrades to paused if the sink stopped by itself.
    pub fn sync(&mut self) -> PlaybackState {
        if self.is_playing() && !self.sink.is_alive() {
            warn!("Audio player exited, marking music as paused");
            self.state = PlaybackState::Paused;
        }
        self.state
    }

    /// Pauses playback for teardown.
    pub fn stop(&mut self) {
        if self.is_playing() {
            self.sink.pause();
            self.state = PlaybackState::Paused;
        }
    }

    fn start(&mut self) {
        match self.sink.play() {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                info!("Music playing");
            }
            Err(e) => {
                warn!(error = %e, "Audio playback failed to start");
                self.state = PlaybackState::Paused;
            }
        }
    }
}

/// Sink that plays a file through an external player process.
///
/// Pausing stops the process; playing again restarts the track.
#[derive(Debug)]
pub struct CommandSink {
    program: Option<String>,
    args: Vec<String>,
    source: String,
    child: Option<Child>,
}

impl CommandSink {
    /// Creates a sink running `program args... source`.
    ///
    /// `program` of `None` yields a sink whose `play` always fails.
    pub fn new(program: Option<String>, args: Vec<String>, source: impl Into<String>) -> Self {
        Self {
            program,
            args,
            source: source.into(),
            child: None,
        }
    }

    /// Returns the audio source passed to the player.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl AudioSink for CommandSink {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let program = self.program.clone().ok_or(PlaybackError::NoPlayer)?;
        self.pause();

        let child = Command::new(&program)
            .args(&self.args)
            .arg(&self.source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PlaybackError::Spawn {
                program: program.clone(),
                source,
            })?;

        debug!(%program, source = %self.source, pid = ?child.id(), "Audio player started");
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.start_kill()
        {
            debug!(error = %e, "Audio player already gone");
        }
    }

    fn is_alive(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                debug!(%status, "Audio player exited");
                self.child = None;
                false
            }
            Some(Err(e)) => {
                debug!(error = %e, "Could not poll audio player");
                self.child = None;
                false
            }
            None => false,
        }
    }
}

impl Drop for CommandSink {
    fn drop(&mut self) {
        self.pause();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn starts_paused() {
        let player = MusicPlayer::new(RecordingSink::default());
        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(!player.is_playing());
    }

    #[test]
    fn toggle_plays_and_pauses() {
        let mut player = MusicPlayer::new(RecordingSink::default());

        assert_eq!(player.toggle(), PlaybackState::Playing);
        assert_eq!(player.toggle(), PlaybackState::Paused);

        assert_eq!(player.sink().plays, 1);
        assert_eq!(player.sink().pauses, 1);
    }

    #[test]
    fn refused_playback_stays_paused() {
        let mut player = MusicPlayer::new(RecordingSink::refusing());

        assert_eq!(player.toggle(), PlaybackState::Paused);
        assert_eq!(player.autoplay(), PlaybackState::Paused);
        assert_eq!(player.toggle(), PlaybackState::Paused);
        assert_eq!(player.sink().pauses, 0);
    }

    #[test]
    fn autoplay_is_idempotent() {
        let mut player = MusicPlayer::new(RecordingSink::default());
        player.autoplay();
        player.autoplay();
        assert!(player.is_playing());
        assert_eq!(player.sink().plays, 1);
    }

    #[test]
    fn sync_notices_dead_sink() {
        let mut player = MusicPlayer::new(RecordingSink::default());
        player.toggle();
        assert_eq!(player.sync(), PlaybackState::Playing);

        player.sink.alive = false;
        assert_eq!(player.sync(), PlaybackState::Paused);
    }

    #[test]
    fn stop_only_pauses_when_playing() {
        let mut player = MusicPlayer::new(RecordingSink::default());
        player.stop();
        assert_eq!(player.sink().pauses, 0);

        player.toggle();
        player.stop();
        assert!(!player.is_playing());
        assert_eq!(player.sink().pauses, 1);
    }

    #[tokio::test]
    async fn command_sink_without_program() {
        let mut sink = CommandSink::new(None, Vec::new(), "./bonita.mp3");
        assert!(matches!(sink.play(), Err(PlaybackError::NoPlayer)));
        assert!(!sink.is_alive());
        assert_eq!(sink.source(), "./bonita.mp3");
    }

    #[tokio::test]
    async fn command_sink_missing_binary() {
        let mut sink = CommandSink::new(
            Some("definitely-not-an-audio-player-7c1e".into()),
            Vec::new(),
            "./bonita.mp3",
        );
        let err = sink.play().unwrap_err();
        assert!(matches!(err, PlaybackError::Spawn { .. }));
        assert!(err.to_string().contains("definitely-not-an-audio-player-7c1e"));
    }

    #[tokio::test]
    async fn missing_binary_degrades_player() {
        let sink = CommandSink::new(
            Some("definitely-not-an-audio-player-7c1e".into()),
            Vec::new(),
            "x.mp3",
        );
        let mut player = MusicPlayer::new(sink);
        assert_eq!(player.toggle(), PlaybackState::Paused);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_sink_restarts_running_player() {
        let mut sink = CommandSink::new(Some("sleep".into()), Vec::new(), "30");

        sink.play().unwrap();
        assert!(sink.is_alive());

        sink.play().unwrap();
        assert!(sink.is_alive());

        sink.pause();
        assert!(!sink.is_alive());
    }
}
