//! View runtime: countdown ticker, music playback, session state, shutdown.
//!
//! This crate drives a rendered invitation view:
//! - A [`Ticker`] re-evaluates the countdown once per period and publishes
//!   snapshots over a watch channel
//! - A [`MusicPlayer`] toggles background music over an [`AudioSink`]
//! - A [`ViewSession`] owns everything the view shows and reduces user input
//!   into [`ViewEffect`]s
//!
//! # Example
//!
//! ```rust,no_run
//! use invitation_core::{CountdownClock, Phase};
//! use invitation_runtime::{Ticker, TickerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let target = chrono::Utc::now() + chrono::Duration::hours(2);
//!     let clock = CountdownClock::new(target, Phase::Invitation);
//!     let mut ticker = Ticker::with_system_clock(TickerConfig::default(), clock)?.spawn();
//!
//!     let mut rx = ticker.subscribe();
//!     rx.changed().await?;
//!     println!("{} ms left", rx.borrow().remaining_ms);
//!
//!     ticker.stop().await?;
//!     Ok(())
//! }
//! ```

mod audio;
mod error;
mod session;
mod signals;
mod ticker;

pub use audio::{AudioSink, CommandSink, MusicPlayer, PlaybackError, PlaybackState};
pub use error::{RuntimeError, RuntimeResult};
pub use session::{UserAction, ViewEffect, ViewSession};
pub use signals::{ShutdownSignal, SignalHandler};
pub use ticker::{
    ManualClock, SystemClock, Ticker, TickerCommand, TickerConfig, TickerHandle, WallClock,
};
