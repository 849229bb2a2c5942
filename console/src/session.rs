//! Session credential for the backend API.
//!
//! The backend issues a bearer token once per client lifetime via
//! `GET /api/init`; every later request must carry it in the
//! `X-Api-Token` header. The credential is written exactly once — a
//! [`Session`] is only ever produced by [`Session::bootstrap`] (or the
//! anonymous constructor) and never mutated afterwards, which makes the
//! single-writer rule structural rather than a convention.
//!
//! A failed bootstrap is non-fatal: the session simply stays anonymous and
//! downstream requests fail their own authorization check, which the auth
//! layer surfaces as a login condition.

use std::fmt;

use zeroize::Zeroize;

use crate::api::ApiClient;

/// Process-wide bearer credential for backend requests.
///
/// The token is zeroized on drop.
#[derive(Default)]
pub struct Session {
    token: Option<String>,
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(token) = self.token.as_mut() {
            token.zeroize();
        }
    }
}

impl Session {
    /// Creates a session without a credential.
    ///
    /// Requests made with an anonymous session omit the credential header
    /// entirely; the backend rejects them the same way it rejects a stale
    /// token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// Creates a session with a known credential. Intended for tests and
    /// headless tooling that obtained the token elsewhere.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Performs the one-time credential bootstrap against the backend.
    ///
    /// Exactly one `GET /api/init` request is issued. On failure the session
    /// is anonymous; there is no retry at this layer — the startup sequence
    /// decides whether to proceed.
    pub async fn bootstrap(api: &ApiClient) -> Self {
        match api.init().await {
            Ok(resp) => {
                tracing::info!("session credential obtained");
                Self {
                    token: Some(resp.api_token),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "session bootstrap failed; continuing without credential");
                Self { token: None }
            }
        }
    }

    /// The bearer token, if bootstrap succeeded.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a credential is held.
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    // The token never appears in logs or panic output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
