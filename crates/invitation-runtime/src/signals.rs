//! Shutdown on SIGINT/SIGTERM (Ctrl+C elsewhere).
//!
//! The watch loop selects on a [`ShutdownSignal`] so that leaving the view
//! always goes through teardown, however it was triggered.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::RuntimeResult;

/// Listens for termination signals and fans them out as a shutdown flag.
pub struct SignalHandler {
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalHandler {
    /// Creates a handler with shutdown not yet signaled.
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    /// Installs the signal handlers and spawns the listener task.
    ///
    /// Handlers are registered before this returns, so a signal arriving
    /// right after the call is not lost.
    #[cfg(unix)]
    pub fn spawn_listener(&self) -> RuntimeResult<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let shutdown_tx = self.shutdown_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM, leaving view"),
                _ = sigint.recv() => info!("Received SIGINT, leaving view"),
            }
            let _ = shutdown_tx.send(true);
            debug!("Signal listener stopped");
        });
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn spawn_listener(&self) -> RuntimeResult<()> {
        let shutdown_tx = self.shutdown_tx.clone();
        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                info!("Received Ctrl+C, leaving view");
                let _ = shutdown_tx.send(true);
            }
        });
        Ok(())
    }

    /// Returns a future-like signal that resolves on shutdown.
    pub fn shutdown(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.shutdown_rx.clone(),
        }
    }

    /// Signals shutdown without a process signal.
    pub fn trigger_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Resolves once shutdown is signaled.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Waits for shutdown. Also returns if every sender is gone.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|down| *down).await;
    }
}
