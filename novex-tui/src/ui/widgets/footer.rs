use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

const KEY_HINTS: &str =
    "Enter send · Tab suggestions · Ctrl+N new conversation · Ctrl+T theme · Esc quit";

pub struct Footer;

impl Footer {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let line = match app.status_message {
            Some(ref status) => Line::from(Span::styled(
                status.clone(),
                Style::default().fg(theme.info()),
            )),
            None => Line::from(Span::styled(
                KEY_HINTS,
                Style::default().fg(theme.foreground_dim()),
            )),
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}
