//! Loading and disabled-notice screens.

use ratatui::layout::Alignment;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::Theme;
use crate::tui::ui::centered_rect;

/// Notice shown while the console is administratively disabled.
const DISABLED_NOTICE: &str = "The administration console is disabled. \
Please contact this service's administrator for assistance.";

/// Neutral loading screen, used while the GUI flag or the first status
/// snapshot is still pending.
pub fn draw_loading(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(50, 3, frame.area());
    let paragraph = Paragraph::new(Line::styled("Loading...", theme.text_secondary))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border));
    frame.render_widget(paragraph, area);
}

/// Static disabled notice. Nothing else renders in this mode.
pub fn draw_disabled(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(60, 5, frame.area());
    let paragraph = Paragraph::new(Line::styled(DISABLED_NOTICE, theme.text_primary))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Line::styled(" dnsrelay ", theme.title)),
        );
    frame.render_widget(paragraph, area);
}
