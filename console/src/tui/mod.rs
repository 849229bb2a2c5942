//! Terminal user interface for the dnsrelay console.
//!
//! # Modules
//!
//! - [`app`]: Application state, events, and key handling
//! - [`terminal`]: Raw-mode terminal guard and panic hook
//! - [`ui`]: Per-screen rendering dispatch
//! - [`widgets`]: Individual screen widgets

pub mod app;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use app::{App, EventHandler, RunOutcome, Theme, TuiEvent};
pub use terminal::{install_panic_hook, Tui};

use tokio::sync::{mpsc, oneshot};

use crate::api::ApiClient;
use crate::boot;
use crate::config::Config;
use crate::error::{Result, TuiError};

/// Capacity of the TUI event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Capacity of the poller event channel.
const POLL_CHANNEL_CAPACITY: usize = 16;

/// Runs one console session against the backend.
///
/// Performs the startup sequence, then drives the event loop until the user
/// quits or logs out. A [`RunOutcome::Restart`] asks the caller to run again
/// from scratch — the full-reset equivalent of reloading the page — so no
/// cached snapshot or wizard state can survive a logout.
pub async fn run(config: &Config) -> Result<RunOutcome> {
    let api = ApiClient::from_config(config);
    let booted = boot::bootstrap(&api).await;

    let (poll_tx, mut poll_rx) = mpsc::channel(POLL_CHANNEL_CAPACITY);
    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let handler = EventHandler::new(event_tx, shutdown_rx);
    let handler_task = tokio::spawn(handler.run());

    let mut app = App::new(config.clone(), api, booted, poll_tx);
    let mut tui = Tui::new().map_err(TuiError::TerminalInit)?;

    let outcome = loop {
        tui.draw(|frame| ui::render(frame, &app))
            .map_err(TuiError::Render)?;

        tokio::select! {
            Some(event) = event_rx.recv() => {
                if let TuiEvent::Key(key) = event {
                    app.handle_key(key).await;
                }
                // Ticks and resizes fall through to the redraw above.
            }
            Some(poll) = poll_rx.recv() => {
                app.handle_poll(poll).await;
            }
        }

        if let Some(outcome) = app.outcome() {
            break outcome;
        }
    };

    // Stop the input task before giving the terminal back.
    let _ = shutdown_tx.send(());
    let _ = handler_task.await;
    tui.restore()?;

    Ok(outcome)
}
