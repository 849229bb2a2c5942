//! Webhook collection operations.
//!
//! List and delete over the configured webhooks, kept consistent with the
//! cached status snapshot. Deletion is optimistic: a successful request
//! removes the matching entry locally without a re-fetch, and the next full
//! refresh remains authoritative if the backend disagrees. A failed delete
//! leaves the cache untouched and is logged only — there is no automatic
//! retry.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::session::Session;
use crate::status::StatusStore;
use crate::types::Webhook;

/// List/delete operations over the configured webhooks.
#[derive(Debug, Clone)]
pub struct WebhookManager {
    api: ApiClient,
    session: Arc<Session>,
}

impl WebhookManager {
    /// Creates a manager bound to the given client and session.
    #[must_use]
    pub fn new(api: ApiClient, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    /// Read-only view of the cached webhook collection.
    #[must_use]
    pub fn list<'a>(&self, store: &'a StatusStore) -> &'a [Webhook] {
        store.webhooks()
    }

    /// Deletes the webhook with the given token.
    ///
    /// The request always reaches the backend. On success exactly one cached
    /// entry with a matching token is removed (removal of an unknown token
    /// is a client-side no-op). On failure — including the backend's 404 for
    /// an already-gone token — the cached collection is left unchanged.
    ///
    /// Returns whether the backend confirmed the deletion.
    pub async fn delete(&self, store: &mut StatusStore, token: &str) -> bool {
        match self.api.delete_webhook(&self.session, token).await {
            Ok(()) => {
                let removed = store.remove_webhook(token);
                debug!(token, removed, "webhook deleted");
                true
            }
            Err(e) => {
                warn!(error = %e, token, "failed to delete webhook; cached list left unchanged");
                false
            }
        }
    }
}
