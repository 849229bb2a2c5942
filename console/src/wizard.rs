//! Webhook setup wizard state machine.
//!
//! The wizard walks the administrator through three steps:
//!
//! 1. [`WizardStep::SelectPlatform`] — pick Teams or Slack (no network call)
//! 2. [`WizardStep::EnterUrl`] — paste the platform's incoming-webhook URL
//!    and submit it to the backend
//! 3. [`WizardStep::AwaitVerification`] — hand the derived callback endpoint
//!    to the DNS provider and wait for its test message
//!
//! The wizard holds no server-side transaction: discarding it abandons
//! nothing, and re-entering setup always restarts at platform selection.

use tracing::warn;

use crate::api::ApiClient;
use crate::session::Session;
use crate::types::Platform;

/// Advisory shown when the callback endpoint is served over plain HTTP.
///
/// The provider requires HTTPS for push delivery; the warning never blocks
/// submission.
pub const INSECURE_ENDPOINT_WARNING: &str = "Warning: the DNS provider requires push \
notifications to be delivered over HTTPS. Put this endpoint behind a reverse proxy \
and register the secured URL instead.";

/// Current step of the setup wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Choosing the notification platform.
    #[default]
    SelectPlatform,

    /// Entering the platform webhook URL.
    EnterUrl,

    /// Waiting for the provider's verification callback.
    AwaitVerification,
}

/// State machine for the webhook setup flow.
///
/// Created fresh each time setup is entered and discarded on completion or
/// abandonment.
#[derive(Debug, Default)]
pub struct SetupWizard {
    step: WizardStep,
    platform: Option<Platform>,
    destination_url: String,
    callback_endpoint: Option<String>,
    awaiting_test: bool,
    submitting: bool,
    error: Option<String>,
}

impl SetupWizard {
    /// Creates a wizard at [`WizardStep::SelectPlatform`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Chosen platform, set once the first step completes.
    #[must_use]
    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Destination URL as typed so far.
    #[must_use]
    pub fn destination_url(&self) -> &str {
        &self.destination_url
    }

    /// Callback endpoint to register with the provider, available in
    /// [`WizardStep::AwaitVerification`].
    #[must_use]
    pub fn callback_endpoint(&self) -> Option<&str> {
        self.callback_endpoint.as_deref()
    }

    /// Whether the backend is still waiting for the provider test message.
    #[must_use]
    pub fn awaiting_test(&self) -> bool {
        self.awaiting_test
    }

    /// Current step-local error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Picks the platform and advances to URL entry.
    ///
    /// Ignored outside [`WizardStep::SelectPlatform`].
    pub fn select_platform(&mut self, platform: Platform) {
        if self.step != WizardStep::SelectPlatform {
            return;
        }
        self.platform = Some(platform);
        self.step = WizardStep::EnterUrl;
    }

    /// Appends a character to the destination URL. Editing clears any
    /// previous submission error.
    pub fn input_char(&mut self, c: char) {
        if self.step != WizardStep::EnterUrl || c.is_control() {
            return;
        }
        self.destination_url.push(c);
        self.error = None;
    }

    /// Removes the last character of the destination URL.
    pub fn backspace(&mut self) {
        if self.step != WizardStep::EnterUrl {
            return;
        }
        self.destination_url.pop();
        self.error = None;
    }

    /// Whether submission is currently allowed: URL entry step, non-empty
    /// field, and no submission already in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::EnterUrl
            && !self.destination_url.trim().is_empty()
            && !self.submitting
    }

    /// Submits the destination URL to the backend.
    ///
    /// On success the callback endpoint is derived from the backend base URL
    /// and the wizard advances to [`WizardStep::AwaitVerification`]. On
    /// failure the wizard stays in URL entry with a platform-specific error
    /// and the field value retained for correction.
    ///
    /// Returns whether the submission was accepted.
    pub async fn submit(&mut self, api: &ApiClient, session: &Session) -> bool {
        if !self.can_submit() {
            return false;
        }
        let Some(platform) = self.platform else {
            return false;
        };

        self.submitting = true;
        let outcome = api
            .create_webhook(session, platform, self.destination_url.trim())
            .await;
        self.submitting = false;

        match outcome {
            Ok(resp) => {
                self.callback_endpoint =
                    Some(callback_endpoint(api.base_url(), platform, &resp.token));
                self.awaiting_test = resp.waiting_for_test;
                self.step = WizardStep::AwaitVerification;
                self.error = None;
                true
            }
            Err(e) => {
                warn!(error = %e, platform = %platform, "webhook setup submission failed");
                self.error = Some(format!(
                    "Failed to configure {} webhook",
                    platform.display_name()
                ));
                false
            }
        }
    }

    #[cfg(test)]
    fn set_error_for_test(&mut self, e: &crate::api::ApiError) {
        self.error = Some(format!("submission failed: {e}"));
    }

    /// Marks the provider test as received. The parent discards the wizard
    /// and re-enters dashboard routing after this.
    pub fn complete(&mut self) {
        self.awaiting_test = false;
    }
}

/// Derives the callback endpoint the provider must call.
///
/// The endpoint lives on the backend base URL at
/// `/api/<platform>/<token>`.
#[must_use]
pub fn callback_endpoint(base_url: &str, platform: Platform, token: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/api/{platform}/{token}")
}

/// Advisory warning for plain-http callback endpoints, if applicable.
#[must_use]
pub fn insecure_endpoint_warning(base_url: &str) -> Option<&'static str> {
    base_url
        .starts_with("http://")
        .then_some(INSECURE_ENDPOINT_WARNING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn starts_at_platform_selection() {
        let wizard = SetupWizard::new();
        assert_eq!(wizard.step(), WizardStep::SelectPlatform);
        assert!(wizard.platform().is_none());
        assert!(!wizard.awaiting_test());
    }

    #[test]
    fn selecting_platform_advances_to_url_entry() {
        let mut wizard = SetupWizard::new();
        wizard.select_platform(Platform::Slack);

        assert_eq!(wizard.step(), WizardStep::EnterUrl);
        assert_eq!(wizard.platform(), Some(Platform::Slack));
    }

    #[test]
    fn platform_selection_ignored_after_first_step() {
        let mut wizard = SetupWizard::new();
        wizard.select_platform(Platform::Slack);
        wizard.select_platform(Platform::Teams);

        assert_eq!(wizard.platform(), Some(Platform::Slack));
    }

    #[test]
    fn submit_disabled_until_url_entered() {
        let mut wizard = SetupWizard::new();
        assert!(!wizard.can_submit());

        wizard.select_platform(Platform::Teams);
        assert!(!wizard.can_submit());

        for c in "https://example.webhook.office.com/x".chars() {
            wizard.input_char(c);
        }
        assert!(wizard.can_submit());
    }

    #[test]
    fn whitespace_only_url_is_not_submittable() {
        let mut wizard = SetupWizard::new();
        wizard.select_platform(Platform::Slack);
        wizard.input_char(' ');
        assert!(!wizard.can_submit());
    }

    #[test]
    fn editing_clears_error() {
        let mut wizard = SetupWizard::new();
        wizard.select_platform(Platform::Slack);
        wizard.set_error_for_test(&ApiError::Unauthorized);
        assert!(wizard.error().is_some());

        wizard.input_char('h');
        assert!(wizard.error().is_none());
    }

    #[test]
    fn control_chars_are_not_typed() {
        let mut wizard = SetupWizard::new();
        wizard.select_platform(Platform::Slack);
        wizard.input_char('\n');
        assert!(wizard.destination_url().is_empty());
    }

    #[test]
    fn backspace_edits_url() {
        let mut wizard = SetupWizard::new();
        wizard.select_platform(Platform::Slack);
        wizard.input_char('h');
        wizard.input_char('t');
        wizard.backspace();
        assert_eq!(wizard.destination_url(), "h");
    }

    #[test]
    fn callback_endpoint_combines_origin_platform_token() {
        assert_eq!(
            callback_endpoint("https://relay.example.com", Platform::Slack, "abc-123"),
            "https://relay.example.com/api/slack/abc-123"
        );
    }

    #[test]
    fn callback_endpoint_tolerates_trailing_slash() {
        assert_eq!(
            callback_endpoint("http://localhost:8080/", Platform::Teams, "t0k"),
            "http://localhost:8080/api/teams/t0k"
        );
    }

    #[test]
    fn insecure_warning_only_for_plain_http() {
        assert!(insecure_endpoint_warning("http://localhost:8080").is_some());
        assert!(insecure_endpoint_warning("https://relay.example.com").is_none());
    }
}
