//! Password prompt for login and first-run password setup.

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::auth::AuthVariant;
use crate::tui::app::Theme;
use crate::tui::ui::centered_rect;

/// Renders the password form.
///
/// The password itself never reaches this layer; only its length does, so
/// the input line is a row of mask characters.
pub fn draw(
    frame: &mut Frame,
    variant: AuthVariant,
    password_len: usize,
    error: Option<&str>,
    theme: &Theme,
) {
    let area = centered_rect(50, 8, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Line::styled(format!(" {} ", variant.title()), theme.title));
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
        Paragraph::new(Line::styled("Password:", theme.text_primary)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(mask(password_len), theme.input)),
        rows[1],
    );

    if let Some(message) = error {
        frame.render_widget(
            Paragraph::new(Line::styled(message, theme.error)).alignment(Alignment::Center),
            rows[3],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("enter {} · esc quit", variant.action().to_lowercase()),
            theme.text_secondary,
        ))
        .alignment(Alignment::Center),
        rows[4],
    );
}

/// Mask line for a password of the given length, with a trailing cursor.
fn mask(len: usize) -> String {
    let mut masked = "*".repeat(len);
    masked.push('_');
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_hides_length_zero() {
        assert_eq!(mask(0), "_");
    }

    #[test]
    fn mask_matches_password_length() {
        assert_eq!(mask(4), "****_");
    }
}
