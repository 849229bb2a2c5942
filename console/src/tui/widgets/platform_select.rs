//! Platform selection step of the setup wizard.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::app::{Theme, PLATFORM_CHOICES};
use crate::tui::ui::centered_rect;

/// Renders the platform list with the cursor row highlighted.
pub fn draw(frame: &mut Frame, cursor: usize, theme: &Theme) {
    let area = centered_rect(50, 4 + PLATFORM_CHOICES.len() as u16, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Line::styled(" Select Notification Platform ", theme.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(PLATFORM_CHOICES.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let items: Vec<ListItem> = PLATFORM_CHOICES
        .iter()
        .map(|p| ListItem::new(Line::styled(p.display_name(), theme.text_primary)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(cursor.min(PLATFORM_CHOICES.len() - 1)));

    let list = List::new(items)
        .highlight_style(theme.selection)
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, rows[0], &mut state);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "up/down choose · enter confirm · esc cancel",
            theme.text_secondary,
        ))
        .alignment(Alignment::Center),
        rows[2],
    );
}
