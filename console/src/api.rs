//! HTTP client for the dnsrelay backend.
//!
//! This module wraps a pooled reqwest [`Client`] with one method per backend
//! action. Every method other than the two bootstrap calls
//! ([`ApiClient::gui_status`] and [`ApiClient::init`]) takes the [`Session`]
//! whose credential it must attach; from this layer's perspective a missing
//! credential and a rejected one are the same thing, and both surface as an
//! authorization error the caller consumes locally.
//!
//! There is no retry logic here: the control layer decides per operation
//! whether a failure is retried (poll ticks), surfaced (login), or swallowed
//! (delete).

use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::session::Session;
use crate::types::{AppStatus, GuiStatus, InitResponse, Platform, SetupResponse};

/// Header carrying the session credential.
pub const API_TOKEN_HEADER: &str = "X-Api-Token";

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credential missing, invalid, or rejected (401/403).
    #[error("authorization rejected")]
    Unauthorized,

    /// The addressed resource does not exist (404).
    #[error("not found")]
    NotFound,

    /// Any other non-success status.
    #[error("server error: {status} - {message}")]
    Server { status: u16, message: String },

    /// The credential contains characters that cannot form a header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

/// Request body for `POST /api/login`.
#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

/// Request body for `POST /api/setup`.
#[derive(Serialize)]
struct SetupRequest<'a> {
    webhook_url: &'a str,
    platform: Platform,
}

/// Client for the backend HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Creates a client for the given base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: String, request_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .pool_max_idle_per_host(4)
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Creates a client from the console configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.server_url.clone(), config.request_timeout)
    }

    /// The backend base URL. Callback endpoints are derived from it.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/gui-status` — administrator kill switch for the console.
    pub async fn gui_status(&self) -> Result<GuiStatus, ApiError> {
        let response = self.send(Method::GET, "/api/gui-status", None).await?;
        Ok(response.json().await?)
    }

    /// `GET /api/init` — obtains the session credential.
    pub async fn init(&self) -> Result<InitResponse, ApiError> {
        let response = self.send(Method::GET, "/api/init", None).await?;
        Ok(response.json().await?)
    }

    /// `GET /api/status` — the authoritative status snapshot.
    pub async fn status(&self, session: &Session) -> Result<AppStatus, ApiError> {
        let response = self.send(Method::GET, "/api/status", Some(session)).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/login` — sets the first admin password or logs in,
    /// depending on backend state.
    pub async fn login(&self, session: &Session, password: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/login", Some(session))?
            .json(&LoginRequest { password });
        self.execute(builder, "/api/login").await?;
        Ok(())
    }

    /// `POST /api/logout` — invalidates the session server-side.
    pub async fn logout(&self, session: &Session) -> Result<(), ApiError> {
        self.send(Method::POST, "/api/logout", Some(session)).await?;
        Ok(())
    }

    /// `POST /api/setup` — registers a destination URL and triggers the
    /// provider test message.
    pub async fn create_webhook(
        &self,
        session: &Session,
        platform: Platform,
        webhook_url: &str,
    ) -> Result<SetupResponse, ApiError> {
        let builder = self
            .request(Method::POST, "/api/setup", Some(session))?
            .json(&SetupRequest {
                webhook_url,
                platform,
            });
        let response = self.execute(builder, "/api/setup").await?;
        Ok(response.json().await?)
    }

    /// `DELETE /api/webhooks/{token}` — removes one configured webhook.
    pub async fn delete_webhook(&self, session: &Session, token: &str) -> Result<(), ApiError> {
        let path = format!("/api/webhooks/{token}");
        self.send(Method::DELETE, &path, Some(session)).await?;
        Ok(())
    }

    /// Builds a request, attaching the session credential when present.
    fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);

        if let Some(token) = session.and_then(Session::token) {
            builder = builder.header(API_TOKEN_HEADER, HeaderValue::from_str(token)?);
        }

        Ok(builder)
    }

    /// Builds and executes a bodyless request.
    async fn send(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> Result<Response, ApiError> {
        let builder = self.request(method, path, session)?;
        self.execute(builder, path).await
    }

    /// Executes a request and maps non-success statuses to [`ApiError`].
    async fn execute(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(path, status = status.as_u16(), "backend response");

        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            s => {
                let message = response.text().await.unwrap_or_default();
                Err(ApiError::Server {
                    status: s.as_u16(),
                    message,
                })
            }
        }
    }
}
