//! Webhook URL entry step of the setup wizard.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::app::Theme;
use crate::tui::ui::centered_rect;
use crate::wizard::SetupWizard;

/// Renders the destination URL input for the chosen platform.
pub fn draw(frame: &mut Frame, wizard: &SetupWizard, theme: &Theme) {
    // The platform is set before this step can be reached.
    let platform = wizard
        .platform()
        .map_or("Webhook", |p| p.display_name());

    let area = centered_rect(70, 8, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Line::styled(format!(" Setup {platform} Webhook "), theme.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // label
            Constraint::Length(1), // input
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error
            Constraint::Length(1), // hint
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("{platform} Webhook URL:"),
            theme.text_primary,
        )),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("{}_", wizard.destination_url()),
            theme.input,
        )),
        rows[1],
    );

    if let Some(message) = wizard.error() {
        frame.render_widget(
            Paragraph::new(Line::styled(message, theme.error)).alignment(Alignment::Center),
            rows[3],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::styled(
            "enter submit · esc cancel",
            theme.text_secondary,
        ))
        .alignment(Alignment::Center),
        rows[4],
    );
}
