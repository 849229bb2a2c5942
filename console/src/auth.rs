//! Authentication gating over the status snapshot.
//!
//! The backend serves both "set the first admin password" and "log in"
//! through the same endpoint; which one the user is doing is decided by the
//! snapshot's `has_admin_password` flag. [`AuthGate`] performs the submit
//! and keeps the user-visible rejection condition; it never locks out or
//! rate-limits — that is a backend concern.

use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::session::Session;
use crate::types::AppStatus;

/// Message shown when the backend rejects the submitted password.
const INVALID_PASSWORD_MESSAGE: &str = "Invalid password";

/// Authentication posture derived from the latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No admin password exists yet; the next submit sets it.
    PasswordSetupRequired,

    /// A password exists and the session is not logged in.
    LoginRequired,

    /// The session is logged in.
    Authenticated,
}

/// Derives the authentication posture from a status snapshot.
#[must_use]
pub fn auth_state(status: &AppStatus) -> AuthState {
    if !status.has_admin_password {
        AuthState::PasswordSetupRequired
    } else if !status.logged_in {
        AuthState::LoginRequired
    } else {
        AuthState::Authenticated
    }
}

/// Which wording the authentication form uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthVariant {
    /// First-run variant: the submitted password becomes the admin password.
    SetPassword,

    /// Normal variant: the password is checked against the stored one.
    Login,
}

impl AuthVariant {
    /// Screen heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AuthVariant::SetPassword => "Set Admin Password",
            AuthVariant::Login => "Login",
        }
    }

    /// Submit action label.
    #[must_use]
    pub fn action(self) -> &'static str {
        match self {
            AuthVariant::SetPassword => "Set Password",
            AuthVariant::Login => "Login",
        }
    }
}

/// Drives the login / first-password-set action.
#[derive(Debug, Default)]
pub struct AuthGate {
    error: Option<&'static str>,
}

impl AuthGate {
    /// Creates a gate with no pending error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits the password to the backend.
    ///
    /// On success the local error is cleared and the caller must re-run a
    /// status refresh to observe the new `logged_in` state. On failure the
    /// user-visible condition is set and the typed input is left for the
    /// user to correct — the gate never clears it.
    ///
    /// Returns whether the backend accepted the password.
    pub async fn submit(&mut self, api: &ApiClient, session: &Session, password: &str) -> bool {
        match api.login(session, password).await {
            Ok(()) => {
                self.error = None;
                debug!("login accepted");
                true
            }
            Err(e) => {
                debug!(error = %e, "login rejected");
                self.error = Some(INVALID_PASSWORD_MESSAGE);
                false
            }
        }
    }

    /// Invalidates the session server-side.
    ///
    /// The caller must follow a successful logout with a full client reset
    /// so no stale snapshot or wizard state survives.
    pub async fn logout(&self, api: &ApiClient, session: &Session) -> Result<(), ApiError> {
        api.logout(session).await
    }

    /// The current user-visible rejection message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error
    }

    /// Clears the rejection message (e.g. when the user edits the input).
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
