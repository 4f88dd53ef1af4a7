use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let line = Line::from(vec![
            Span::styled(
                "✦ Novex AI Assistant",
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Powered by real-time market intelligence",
                Style::default().fg(theme.foreground_dim()),
            ),
            Span::styled(
                format!("  [{}]", app.assistant.provider_name()),
                Style::default().fg(theme.accent_secondary()),
            ),
        ]);

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border())),
        );

        frame.render_widget(paragraph, area);
    }
}
