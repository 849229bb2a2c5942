//! Verification polling for webhook setup.
//!
//! While the wizard waits for the provider's test callback, a
//! [`VerificationPoller`] task re-fetches the status snapshot on a fixed
//! interval and forwards the outcome to the owning event loop. The task:
//!
//! - never starts an overlapping request (each fetch completes before the
//!   next tick is honored)
//! - swallows individual poll failures (logged, polling continues)
//! - emits [`PollEvent::SetupComplete`] at most once, then stops on its own
//! - is cancelled deterministically via its shutdown channel when the
//!   owning state is torn down; dropping the handle also cancels it, so a
//!   discarded wizard can never leak the timer
//!
//! The shutdown wiring mirrors the TUI event handler: a oneshot channel
//! checked first in a biased `tokio::select!`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::session::Session;
use crate::types::AppStatus;

/// Default interval between verification polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Outcomes forwarded from the poller to the owning event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A poll completed; setup is not finished yet. Carries the fresh
    /// snapshot so the store can apply it.
    Status(AppStatus),

    /// The backend reported `setup_complete`. Emitted exactly once; the
    /// poller stops afterwards.
    SetupComplete(AppStatus),
}

/// Handle to a running verification poll task.
#[derive(Debug)]
pub struct VerificationPoller {
    handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl VerificationPoller {
    /// Spawns the polling task.
    ///
    /// Polls begin one full interval after spawning (matching the cadence of
    /// the original flow: submit, then check every few seconds).
    #[must_use]
    pub fn spawn(
        api: ApiClient,
        session: Arc<Session>,
        interval: Duration,
        event_tx: mpsc::Sender<PollEvent>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = PollTask {
            api,
            session,
            interval,
            event_tx,
            shutdown_rx,
        };
        let handle = tokio::spawn(task.run());

        Self {
            handle,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Cancels the poller. No further poll requests are started after the
    /// signal is observed; an in-flight request finishes but its outcome is
    /// not followed by another poll.
    pub fn cancel(mut self) {
        self.signal_shutdown();
    }

    /// Whether the task has exited (completed or cancelled).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the task to exit. Useful in tests and teardown paths that
    /// need the cancellation to have fully taken effect.
    pub async fn join(mut self) {
        self.signal_shutdown();
        // Take the handle out so Drop does not double-signal.
        let _ = (&mut self.handle).await;
    }

    fn signal_shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The task may already have finished; a closed channel is fine.
            let _ = tx.send(());
        }
    }
}

impl Drop for VerificationPoller {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

/// The spawned polling loop.
struct PollTask {
    api: ApiClient,
    session: Arc<Session>,
    interval: Duration,
    event_tx: mpsc::Sender<PollEvent>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl PollTask {
    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        // A slow fetch must not be followed by a burst of catch-up polls.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Consume the immediate first tick so the first poll waits a full
        // interval.
        ticker.tick().await;

        debug!(interval_ms = self.interval.as_millis() as u64, "verification poller started");

        loop {
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    debug!("verification poller cancelled");
                    break;
                }

                _ = ticker.tick() => {
                    match self.api.status(&self.session).await {
                        Ok(status) if status.setup_complete => {
                            debug!("setup complete; verification poller stopping");
                            let _ = self.event_tx.send(PollEvent::SetupComplete(status)).await;
                            break;
                        }
                        Ok(status) => {
                            if self.event_tx.send(PollEvent::Status(status)).await.is_err() {
                                debug!("poll receiver dropped; verification poller stopping");
                                break;
                            }
                        }
                        Err(e) => {
                            // Transient failures must not abort the wait.
                            warn!(error = %e, "verification poll failed; retrying on next tick");
                        }
                    }
                }
            }
        }
    }
}
