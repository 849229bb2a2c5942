//! Startup sequence for a console run.
//!
//! Bootstrap ordering matters: the GUI flag is resolved first, and only when
//! the console is enabled are the session bootstrap and first status fetch
//! performed — a disabled console must not touch `/api/init` or
//! `/api/status` at all. A failed GUI check degrades to "enabled" rather
//! than halting; a failed session bootstrap or status fetch is handled by
//! the downstream fail-closed paths.

use std::sync::Arc;

use tracing::warn;

use crate::api::ApiClient;
use crate::router::GuiFlag;
use crate::session::Session;
use crate::status::StatusStore;

/// Result of the startup sequence.
#[derive(Debug)]
pub struct Boot {
    /// Resolved GUI availability.
    pub gui: GuiFlag,

    /// Bootstrapped session. Anonymous when the console is disabled or the
    /// credential fetch failed.
    pub session: Arc<Session>,

    /// Status cache, primed with the first fetch when the console is
    /// enabled.
    pub store: StatusStore,
}

/// Runs the startup sequence against the backend.
pub async fn bootstrap(api: &ApiClient) -> Boot {
    let gui = match api.gui_status().await {
        Ok(resp) => GuiFlag::resolve(resp.gui_disabled),
        Err(e) => {
            // Degrade to a usable console rather than halting.
            warn!(error = %e, "GUI status check failed; assuming enabled");
            GuiFlag::Enabled
        }
    };

    if gui == GuiFlag::Disabled {
        return Boot {
            gui,
            session: Arc::new(Session::anonymous()),
            store: StatusStore::new(),
        };
    }

    let session = Arc::new(Session::bootstrap(api).await);
    let mut store = StatusStore::new();
    store.refresh(api, &session).await;

    Boot {
        gui,
        session,
        store,
    }
}
