//! dnsrelay Console - webhook administration client.
//!
//! This crate provides the control logic and terminal interface for
//! configuring Slack and Microsoft Teams push-notification webhooks against
//! a dnsrelay backend, gated behind the shared administrator credential.
//!
//! # Overview
//!
//! A console run resolves the GUI availability flag, bootstraps a session
//! credential, and then drives a small set of screens — password setup or
//! login, the webhook setup wizard, and the dashboard — off the backend's
//! status snapshot. All state the screens render from is derived through
//! one pure routing function, and the only recurring background work is the
//! verification poller that waits for the DNS provider's test callback.
//!
//! # Modules
//!
//! - [`api`]: HTTP client for the backend API
//! - [`auth`]: Login / first-password gating
//! - [`boot`]: Startup sequence (GUI gate, session, first fetch)
//! - [`config`]: Configuration from environment variables
//! - [`error`]: Error types for console operations
//! - [`poller`]: Cancellable verification polling task
//! - [`router`]: Pure screen routing
//! - [`session`]: One-shot credential bootstrap
//! - [`status`]: Cached status snapshots
//! - [`types`]: Backend wire types
//! - [`webhooks`]: Webhook list/delete operations
//! - [`wizard`]: Webhook setup state machine
//! - [`tui`]: Terminal user interface

pub mod api;
pub mod auth;
pub mod boot;
pub mod config;
pub mod error;
pub mod poller;
pub mod router;
pub mod session;
pub mod status;
pub mod tui;
pub mod types;
pub mod webhooks;
pub mod wizard;

pub use api::{ApiClient, ApiError, API_TOKEN_HEADER};
pub use auth::{auth_state, AuthGate, AuthState, AuthVariant};
pub use boot::{bootstrap, Boot};
pub use config::{Config, ConfigError};
pub use error::{ConsoleError, Result, TuiError};
pub use poller::{PollEvent, VerificationPoller, DEFAULT_POLL_INTERVAL};
pub use router::{route, GuiFlag, Screen};
pub use session::Session;
pub use status::{StatusState, StatusStore};
pub use types::{AppStatus, GuiStatus, InitResponse, Platform, SetupResponse, Webhook};
pub use webhooks::WebhookManager;
pub use wizard::{callback_endpoint, insecure_endpoint_warning, SetupWizard, WizardStep};
