//! Wire types for the dnsrelay backend API.
//!
//! This module defines the JSON shapes exchanged with the backend. All fields
//! serialize to snake_case to match the backend contract.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Notification platform a webhook delivers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Teams,
    Slack,
}

impl Platform {
    /// Wire identifier, as used in request bodies and callback paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Teams => "teams",
            Platform::Slack => "slack",
        }
    }

    /// Human-readable platform name for screen copy.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Teams => "Microsoft Teams",
            Platform::Slack => "Slack",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured webhook connection as reported by the backend.
///
/// Identified by its server-issued `token`; the `status` label is a
/// server-defined lifecycle string (e.g. `pending`, `verified`) and is
/// displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Unique, stable identifier issued at creation.
    pub token: String,

    /// Destination platform.
    #[serde(rename = "type")]
    pub platform: Platform,

    /// Server-defined lifecycle label.
    pub status: String,

    /// Destination URL registered with the platform. Opaque to the console.
    pub webhook_url: String,
}

/// Authoritative application status snapshot from `GET /api/status`.
///
/// Replaced wholesale on every successful fetch. `has_webhooks` drives
/// routing; the `webhooks` list drives rendering (the backend omits entries
/// for unauthenticated sessions, so the two can legitimately disagree).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStatus {
    pub logged_in: bool,
    pub has_admin_password: bool,
    pub has_webhooks: bool,
    pub setup_complete: bool,
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}

/// Response of `GET /api/gui-status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuiStatus {
    pub gui_disabled: bool,
}

/// Response of `GET /api/init`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResponse {
    pub api_token: String,
}

/// Response of `POST /api/setup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupResponse {
    /// Token identifying the new webhook; also the last path segment of the
    /// callback endpoint the provider must be pointed at.
    pub token: String,

    /// Whether the backend is waiting for the provider's test callback.
    pub waiting_for_test: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&Platform::Teams).unwrap(), "\"teams\"");
        assert_eq!(serde_json::to_string(&Platform::Slack).unwrap(), "\"slack\"");
    }

    #[test]
    fn platform_display_matches_wire_form() {
        assert_eq!(Platform::Teams.to_string(), "teams");
        assert_eq!(Platform::Slack.to_string(), "slack");
    }

    #[test]
    fn webhook_type_field_maps_to_platform() {
        let json = r#"{
            "token": "tok-1",
            "type": "slack",
            "status": "pending",
            "webhook_url": "https://hooks.slack.example/X"
        }"#;

        let webhook: Webhook = serde_json::from_str(json).unwrap();
        assert_eq!(webhook.platform, Platform::Slack);
        assert_eq!(webhook.token, "tok-1");
        assert_eq!(webhook.status, "pending");
    }

    #[test]
    fn app_status_defaults_to_empty_webhooks() {
        // The backend omits the list for unauthenticated sessions.
        let json = r#"{
            "logged_in": false,
            "has_admin_password": true,
            "has_webhooks": true,
            "setup_complete": false
        }"#;

        let status: AppStatus = serde_json::from_str(json).unwrap();
        assert!(status.has_webhooks);
        assert!(status.webhooks.is_empty());
    }

    #[test]
    fn app_status_round_trips() {
        let status = AppStatus {
            logged_in: true,
            has_admin_password: true,
            has_webhooks: true,
            setup_complete: true,
            webhooks: vec![Webhook {
                token: "tok-1".to_string(),
                platform: Platform::Teams,
                status: "verified".to_string(),
                webhook_url: "https://example.webhook.office.com/x".to_string(),
            }],
        };

        let json = serde_json::to_string(&status).unwrap();
        let parsed: AppStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }

    #[test]
    fn setup_response_parses() {
        let json = r#"{"message": "Slack URL set and test message sent.", "token": "abc", "waiting_for_test": true}"#;
        let resp: SetupResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "abc");
        assert!(resp.waiting_for_test);
    }
}
