//! Cached application status snapshots.
//!
//! [`StatusStore`] owns the single source of truth the rest of the console
//! reads. The cache is only ever replaced wholesale — readers never observe
//! a torn mix of old and new fields — and every completed fetch overwrites
//! whatever was applied before it (last-completed-wins). A failed fetch
//! fails closed: the store records an explicit [`StatusState::Unavailable`]
//! condition and the router treats that as logged-out, never as a guess at
//! an authenticated state.

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::session::Session;
use crate::types::{AppStatus, Webhook};

/// State of the status cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StatusState {
    /// No fetch has completed yet.
    #[default]
    Unknown,

    /// The most recent fetch failed; treated as logged-out.
    Unavailable,

    /// Latest snapshot reported by the backend.
    Loaded(AppStatus),
}

/// Cache of the latest [`AppStatus`] snapshot.
#[derive(Debug, Default)]
pub struct StatusStore {
    state: StatusState,
}

impl StatusStore {
    /// Creates an empty store ([`StatusState::Unknown`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cache state.
    #[must_use]
    pub fn state(&self) -> &StatusState {
        &self.state
    }

    /// The cached snapshot, if one is loaded.
    #[must_use]
    pub fn snapshot(&self) -> Option<&AppStatus> {
        match &self.state {
            StatusState::Loaded(status) => Some(status),
            _ => None,
        }
    }

    /// Read-only view of the cached webhook collection.
    ///
    /// Empty whenever no snapshot is loaded; the backend also omits entries
    /// for unauthenticated sessions.
    #[must_use]
    pub fn webhooks(&self) -> &[Webhook] {
        self.snapshot().map_or(&[], |s| &s.webhooks)
    }

    /// Applies a completed fetch, replacing the cache wholesale.
    ///
    /// Success loads the snapshot; failure records the unavailable condition
    /// (fail-closed). Completion order decides the final state when fetches
    /// overlap.
    pub fn apply(&mut self, outcome: Result<AppStatus, ApiError>) {
        match outcome {
            Ok(status) => {
                debug!(
                    logged_in = status.logged_in,
                    has_admin_password = status.has_admin_password,
                    has_webhooks = status.has_webhooks,
                    setup_complete = status.setup_complete,
                    "status snapshot applied"
                );
                self.state = StatusState::Loaded(status);
            }
            Err(e) => {
                warn!(error = %e, "status fetch failed; treating session as logged out");
                self.state = StatusState::Unavailable;
            }
        }
    }

    /// Fetches a fresh snapshot and applies it.
    ///
    /// Safe to call repeatedly; an unchanged backend yields an identical
    /// cached snapshot.
    pub async fn refresh(&mut self, api: &ApiClient, session: &Session) {
        let outcome = api.status(session).await;
        self.apply(outcome);
    }

    /// Removes the webhook with the given token from the cached snapshot.
    ///
    /// Tokens are unique, so at most one entry is removed; an absent token
    /// is a no-op. This local removal is an optimization — the next full
    /// refresh remains the source of truth if the backend disagrees.
    ///
    /// Returns whether an entry was removed.
    pub fn remove_webhook(&mut self, token: &str) -> bool {
        let StatusState::Loaded(status) = &mut self.state else {
            return false;
        };

        let before = status.webhooks.len();
        status.webhooks.retain(|w| w.token != token);
        let removed = status.webhooks.len() < before;
        if removed {
            status.has_webhooks = !status.webhooks.is_empty();
        }
        removed
    }
}
