//! UI rendering for the console.
//!
//! [`render`] recomputes the screen through the pure router on every frame
//! and dispatches to the matching widget. No widget inspects the backend
//! booleans directly; the [`crate::router::Screen`] tag is the only routing
//! input.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::auth::AuthVariant;
use crate::router::Screen;
use crate::tui::app::App;
use crate::tui::widgets;
use crate::wizard::WizardStep;

/// Renders the screen selected by the router.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Loading => widgets::notice::draw_loading(frame, app.theme()),
        Screen::Disabled => widgets::notice::draw_disabled(frame, app.theme()),
        Screen::SetPassword => widgets::auth_form::draw(
            frame,
            AuthVariant::SetPassword,
            app.password_len(),
            app.auth().error(),
            app.theme(),
        ),
        Screen::Login => widgets::auth_form::draw(
            frame,
            AuthVariant::Login,
            app.password_len(),
            app.auth().error(),
            app.theme(),
        ),
        Screen::Setup(step) => render_wizard(frame, app, step),
        Screen::Dashboard => widgets::dashboard::draw(
            frame,
            app.store().webhooks(),
            app.selected_webhook(),
            app.theme(),
        ),
    }
}

fn render_wizard(frame: &mut Frame, app: &App, step: WizardStep) {
    let Some(wizard) = app.wizard() else {
        // The router only emits Setup while a wizard is active.
        widgets::notice::draw_loading(frame, app.theme());
        return;
    };

    match step {
        WizardStep::SelectPlatform => {
            widgets::platform_select::draw(frame, app.platform_cursor(), app.theme());
        }
        WizardStep::EnterUrl => {
            widgets::url_entry::draw(frame, wizard, app.theme());
        }
        WizardStep::AwaitVerification => {
            widgets::verification::draw(frame, wizard, app.insecure_transport(), app.theme());
        }
    }
}

/// Centers a fixed-height content box of the given width percentage.
pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(height),
            Constraint::Min(1),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
