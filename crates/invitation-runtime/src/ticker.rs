//! Background ticker driving the countdown.
//!
//! The ticker owns a [`CountdownClock`] and re-evaluates it on a fixed period
//! (one second by default). Each evaluation is published on a `watch` channel
//! so any number of observers can read the latest [`CountdownSnapshot`]
//! without locking.
//!
//! The task lives exactly as long as its [`TickerHandle`]: call
//! [`TickerHandle::stop`] on teardown, or drop the handle and the task is
//! aborted.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use invitation_core::{CountdownClock, CountdownSnapshot};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::error::{RuntimeError, RuntimeResult};

/// Source of wall-clock time.
pub trait WallClock: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += delta;
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Ticker configuration.
#[derive(Debug, Clone)]
pub struct TickerConfig {
    /// Interval between evaluations.
    pub period: Duration,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl TickerConfig {
    /// Creates a new ticker config with the given period.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

/// Commands that can be sent to a running ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerCommand {
    /// Evaluate immediately, outside the regular cadence.
    TickNow,
    /// Stop the ticker.
    Stop,
}

/// The ticker task, before it is spawned.
pub struct Ticker<C: WallClock = SystemClock> {
    config: TickerConfig,
    clock: CountdownClock,
    wall: C,
}

impl Ticker<SystemClock> {
    /// Creates a ticker reading the system clock.
    pub fn with_system_clock(config: TickerConfig, clock: CountdownClock) -> RuntimeResult<Self> {
        Self::new(config, clock, SystemClock)
    }
}

impl<C: WallClock> Ticker<C> {
    /// Creates a ticker for `clock` sampling time from `wall`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the period is zero.
    pub fn new(config: TickerConfig, clock: CountdownClock, wall: C) -> RuntimeResult<Self> {
        if config.period.is_zero() {
            return Err(RuntimeError::config("ticker period must be greater than zero"));
        }
        Ok(Self {
            config,
            clock,
            wall,
        })
    }

    /// Evaluates the clock once and starts the recurring task.
    ///
    /// The first snapshot is available from the returned handle immediately.
    /// Must be called from within a Tokio runtime.
    pub fn spawn(mut self) -> TickerHandle {
        let first = self.clock.tick(self.wall.now());
        log_transition(&first);

        let (snapshot_tx, snapshot_rx) = watch::channel(first);
        let (command_tx, command_rx) = mpsc::channel(16);

        info!(
            period_ms = self.config.period.as_millis() as u64,
            countdown_target = %self.clock.target(),
            phase = %first.phase,
            "Ticker started"
        );

        let task = tokio::spawn(self.run(snapshot_tx, command_rx));

        TickerHandle {
            command_tx,
            snapshots: snapshot_rx,
            task: Some(task),
        }
    }

    async fn run(
        mut self,
        snapshot_tx: watch::Sender<CountdownSnapshot>,
        mut command_rx: mpsc::Receiver<TickerCommand>,
    ) {
        let period = self.config.period;
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !self.publish(&snapshot_tx) {
                        debug!("No observers left, stopping ticker");
                        break;
                    }
                }
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(TickerCommand::TickNow) => {
                            debug!("Received TickNow command");
                            if !self.publish(&snapshot_tx) {
                                break;
                            }
                        }
                        Some(TickerCommand::Stop) | None => {
                            info!("Ticker stopping");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Ticks the clock and publishes the snapshot. Returns `false` once every
    /// receiver is gone.
    fn publish(&mut self, snapshot_tx: &watch::Sender<CountdownSnapshot>) -> bool {
        let snapshot = self.clock.tick(self.wall.now());
        trace!(remaining_ms = snapshot.remaining_ms, phase = %snapshot.phase, "Tick");
        log_transition(&snapshot);
        snapshot_tx.send(snapshot).is_ok()
    }
}

fn log_transition(snapshot: &CountdownSnapshot) {
    if snapshot.transitioned {
        info!(at = %snapshot.at, "Countdown reached its target, switching to proposal");
    }
}

/// Handle to a running ticker.
///
/// Dropping the handle aborts the task if it has not been stopped.
#[derive(Debug)]
pub struct TickerHandle {
    command_tx: mpsc::Sender<TickerCommand>,
    snapshots: watch::Receiver<CountdownSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Returns a receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.snapshots.clone()
    }

    /// Returns the most recently published snapshot.
    pub fn latest(&self) -> CountdownSnapshot {
        *self.snapshots.borrow()
    }

    /// Requests an immediate evaluation.
    pub async fn tick_now(&self) -> RuntimeResult<()> {
        if !self.is_running() {
            return Err(RuntimeError::TickerStopped);
        }
        self.command_tx
            .send(TickerCommand::TickNow)
            .await
            .map_err(|_| RuntimeError::TickerStopped)
    }

    /// Returns `true` while the task is alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the ticker and waits for the task to finish.
    ///
    /// Stopping an already stopped ticker is a no-op.
    pub async fn stop(&mut self) -> RuntimeResult<()> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        // The task may already have exited on its own; the send then fails.
        let _ = self.command_tx.send(TickerCommand::Stop).await;
        task.await?;
        debug!("Ticker stopped");
        Ok(())
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Ticker handle dropped while running, aborting task");
            task.abort();
        }
    }
}
