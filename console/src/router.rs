//! Screen routing.
//!
//! The rendered screen is a pure function of three inputs: the GUI
//! availability flag, the latest status snapshot, and the wizard step (when
//! setup is active). [`route`] is the only place the backend's overlapping
//! booleans (`logged_in`, `has_admin_password`, `has_webhooks`) are
//! interpreted; everything downstream matches on the resulting [`Screen`]
//! tag, so ambiguous combinations cannot be rendered.

use crate::status::StatusState;
use crate::wizard::WizardStep;

/// Administrator-controlled GUI availability, resolved once per run.
///
/// `Unknown` always renders the neutral loading screen — never the disabled
/// notice and never the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuiFlag {
    /// Not yet resolved.
    #[default]
    Unknown,

    /// The interactive console is switched off; only the notice renders and
    /// no session bootstrap or status fetch is performed.
    Disabled,

    /// Normal operation.
    Enabled,
}

impl GuiFlag {
    /// Resolves the flag from the backend's `gui_disabled` answer.
    #[must_use]
    pub fn resolve(gui_disabled: bool) -> Self {
        if gui_disabled {
            GuiFlag::Disabled
        } else {
            GuiFlag::Enabled
        }
    }
}

/// Exactly one screen to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Static notice: the console is administratively disabled.
    Disabled,

    /// Neutral loading state (GUI flag or first snapshot still pending).
    Loading,

    /// First-run admin password setup.
    SetPassword,

    /// Password prompt.
    Login,

    /// Webhook setup wizard at the given step.
    Setup(WizardStep),

    /// Webhook dashboard.
    Dashboard,
}

/// Maps the current control state to the screen to render.
///
/// Deterministic in its inputs: for any fixed `(gui, status, wizard)` the
/// same screen is returned, with no dependence on prior snapshots.
///
/// An unavailable status fails closed to [`Screen::Login`]: an indeterminate
/// snapshot must never be mistaken for an authenticated state, and the
/// conservative assumption is that a password already exists.
#[must_use]
pub fn route(gui: GuiFlag, status: &StatusState, wizard: Option<WizardStep>) -> Screen {
    match gui {
        GuiFlag::Unknown => return Screen::Loading,
        GuiFlag::Disabled => return Screen::Disabled,
        GuiFlag::Enabled => {}
    }

    let snapshot = match status {
        StatusState::Unknown => return Screen::Loading,
        StatusState::Unavailable => return Screen::Login,
        StatusState::Loaded(snapshot) => snapshot,
    };

    if !snapshot.has_admin_password {
        return Screen::SetPassword;
    }
    if !snapshot.logged_in {
        return Screen::Login;
    }
    if let Some(step) = wizard {
        return Screen::Setup(step);
    }
    Screen::Dashboard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppStatus;

    fn loaded(logged_in: bool, has_admin_password: bool) -> StatusState {
        StatusState::Loaded(AppStatus {
            logged_in,
            has_admin_password,
            ..AppStatus::default()
        })
    }

    #[test]
    fn unknown_gui_flag_always_loads() {
        // Even a loaded snapshot must not render before the flag resolves.
        assert_eq!(
            route(GuiFlag::Unknown, &loaded(true, true), None),
            Screen::Loading
        );
    }

    #[test]
    fn disabled_gui_wins_over_everything() {
        assert_eq!(
            route(GuiFlag::Disabled, &loaded(true, true), Some(WizardStep::EnterUrl)),
            Screen::Disabled
        );
    }

    #[test]
    fn pending_status_loads() {
        assert_eq!(
            route(GuiFlag::Enabled, &StatusState::Unknown, None),
            Screen::Loading
        );
    }

    #[test]
    fn unavailable_status_fails_closed_to_login() {
        assert_eq!(
            route(GuiFlag::Enabled, &StatusState::Unavailable, None),
            Screen::Login
        );
    }

    #[test]
    fn missing_password_routes_to_setup_variant() {
        assert_eq!(
            route(GuiFlag::Enabled, &loaded(false, false), None),
            Screen::SetPassword
        );
    }

    #[test]
    fn logged_out_routes_to_login() {
        assert_eq!(
            route(GuiFlag::Enabled, &loaded(false, true), None),
            Screen::Login
        );
    }

    #[test]
    fn authenticated_without_wizard_routes_to_dashboard() {
        assert_eq!(
            route(GuiFlag::Enabled, &loaded(true, true), None),
            Screen::Dashboard
        );
    }

    #[test]
    fn active_wizard_routes_to_its_step() {
        assert_eq!(
            route(
                GuiFlag::Enabled,
                &loaded(true, true),
                Some(WizardStep::AwaitVerification)
            ),
            Screen::Setup(WizardStep::AwaitVerification)
        );
    }

    #[test]
    fn wizard_does_not_override_authentication() {
        // A stale wizard must not keep rendering once the session is logged
        // out by a fresh snapshot.
        assert_eq!(
            route(
                GuiFlag::Enabled,
                &loaded(false, true),
                Some(WizardStep::SelectPlatform)
            ),
            Screen::Login
        );
    }

    #[test]
    fn routing_is_deterministic() {
        let status = loaded(true, true);
        let first = route(GuiFlag::Enabled, &status, Some(WizardStep::EnterUrl));
        let second = route(GuiFlag::Enabled, &status, Some(WizardStep::EnterUrl));
        assert_eq!(first, second);
    }
}
