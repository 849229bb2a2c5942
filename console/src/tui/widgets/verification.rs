//! Verification-wait step of the setup wizard.
//!
//! Shows the callback endpoint the administrator must register with the DNS
//! provider and waits for the provider's test message. The insecure-
//! transport warning is advisory only.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::Theme;
use crate::tui::ui::centered_rect;
use crate::wizard::{SetupWizard, INSECURE_ENDPOINT_WARNING};

/// Renders the verification-wait screen.
pub fn draw(frame: &mut Frame, wizard: &SetupWizard, insecure: bool, theme: &Theme) {
    let area = centered_rect(80, 11, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Line::styled(
            " Waiting for DNS Provider Test Message... ",
            theme.title,
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // warning
            Constraint::Length(1), // label
            Constraint::Length(1), // endpoint
            Constraint::Length(1), // spacer
            Constraint::Length(1), // status
            Constraint::Length(1), // hint
        ])
        .split(inner);

    if insecure {
        frame.render_widget(
            Paragraph::new(Line::styled(INSECURE_ENDPOINT_WARNING, theme.warning))
                .wrap(Wrap { trim: true }),
            rows[0],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Register this endpoint for realtime push notifications:",
            theme.text_primary,
        )),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            wizard.callback_endpoint().unwrap_or_default(),
            theme.input,
        )),
        rows[2],
    );

    let status = if wizard.awaiting_test() {
        "Waiting for the test callback..."
    } else {
        "Verified."
    };
    frame.render_widget(
        Paragraph::new(Line::styled(status, theme.status_pending)).alignment(Alignment::Center),
        rows[4],
    );

    frame.render_widget(
        Paragraph::new(Line::styled("esc cancel", theme.text_secondary))
            .alignment(Alignment::Center),
        rows[5],
    );
}
