use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// The failed-turn banner shown under the thread until reset or the next
/// successful turn.
pub struct ErrorBanner;

impl ErrorBanner {
    pub fn render(frame: &mut Frame, area: Rect, theme: &dyn Theme, message: &str) {
        let line = Line::from(vec![
            Span::styled(
                "✗ ",
                Style::default()
                    .fg(theme.error())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.to_string(), Style::default().fg(theme.error())),
        ]);

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error())),
        );

        frame.render_widget(paragraph, area);
    }
}
