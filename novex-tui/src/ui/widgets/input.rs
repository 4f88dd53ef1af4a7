use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

const PLACEHOLDER: &str = "Ask about DeFi, trading strategies, or market analysis...";

pub struct InputBar;

impl InputBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let border_color = if app.is_pending() {
            theme.foreground_dim()
        } else {
            theme.accent()
        };

        let line = if app.is_pending() {
            Line::from(Span::styled(
                "Waiting for response...",
                Style::default().fg(theme.foreground_dim()),
            ))
        } else if app.input.is_empty() {
            Line::from(vec![
                cursor_span(app, theme),
                Span::styled(PLACEHOLDER, Style::default().fg(theme.foreground_dim())),
            ])
        } else {
            Line::from(vec![
                Span::styled(app.input.clone(), Style::default().fg(theme.foreground())),
                cursor_span(app, theme),
            ])
        };

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Ask Novex ")
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(paragraph, area);
    }
}

fn cursor_span(app: &App, theme: &dyn crate::theme::Theme) -> Span<'static> {
    // Block cursor blinking on the animation tick.
    let cursor = if (app.animation_tick / 2) % 2 == 0 {
        "█"
    } else {
        " "
    };
    Span::styled(cursor, Style::default().fg(theme.accent()))
}
