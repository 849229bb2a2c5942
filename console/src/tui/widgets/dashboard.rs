//! Webhook dashboard.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::tui::app::Theme;
use crate::types::Webhook;

/// Renders the configured webhook list and key legend.
pub fn draw(frame: &mut Frame, webhooks: &[Webhook], selected: usize, theme: &Theme) {
    let rows_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Line::styled(" Dashboard ", theme.title));

    if webhooks.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No webhooks configured. Press 'a' to add one.",
            theme.text_secondary,
        ))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, rows_layout[0]);
    } else {
        let rows: Vec<Row> = webhooks
            .iter()
            .map(|w| {
                let status_style = if w.status == "verified" {
                    theme.status_verified
                } else {
                    theme.status_pending
                };
                Row::new(vec![
                    Line::styled(w.platform.display_name(), theme.text_primary),
                    Line::styled(w.status.clone(), status_style),
                    Line::styled(w.token.clone(), theme.text_secondary),
                    Line::styled(w.webhook_url.clone(), theme.text_secondary),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(16),
                Constraint::Length(10),
                Constraint::Length(38),
                Constraint::Min(20),
            ],
        )
        .header(Row::new(vec!["Type", "Status", "Token", "URL"]).style(theme.title))
        .row_highlight_style(theme.selection)
        .block(block);

        let mut state = TableState::default();
        state.select(Some(selected.min(webhooks.len() - 1)));
        frame.render_stateful_widget(table, rows_layout[0], &mut state);
    }

    frame.render_widget(
        Paragraph::new(Line::styled(
            "a add · d delete · r refresh · l logout · q quit",
            theme.text_secondary,
        ))
        .alignment(Alignment::Center),
        rows_layout[1],
    );
}
