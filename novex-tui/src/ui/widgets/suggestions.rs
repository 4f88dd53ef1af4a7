use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, SUGGESTIONS};

/// One row of canned-prompt chips; Tab focuses, Enter inserts.
pub struct SuggestionBar;

impl SuggestionBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let mut spans = Vec::new();

        for (index, suggestion) in SUGGESTIONS.iter().enumerate() {
            let focused = app.suggestion_index == Some(index);

            let style = if focused {
                Style::default()
                    .fg(theme.accent())
                    .bg(theme.selection())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground_dim())
            };

            spans.push(Span::styled(format!("❯ {}", suggestion), style));

            if index + 1 < SUGGESTIONS.len() {
                spans.push(Span::raw("  "));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
