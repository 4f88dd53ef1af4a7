use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

pub struct Spinner {
    frames: Vec<&'static str>,
    message: Option<String>,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            frames: vec!["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            message: None,
        }
    }

    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub fn frame(&self, tick: u64) -> &'static str {
        let idx = (tick as usize) % self.frames.len();
        self.frames[idx]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &dyn Theme, tick: u64) {
        let mut spans = vec![Span::styled(
            self.frame(tick),
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )];

        if let Some(ref msg) = self.message {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                msg.clone(),
                Style::default().fg(theme.foreground_dim()),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_frames_cycle() {
        let spinner = Spinner::new();
        assert_eq!(spinner.frame(0), "⠋");
        assert_eq!(spinner.frame(1), "⠙");
        assert_eq!(spinner.frame(10), "⠋");
    }

    #[test]
    fn test_spinner_with_message() {
        let spinner = Spinner::new().with_message("Thinking...");
        assert_eq!(spinner.message, Some("Thinking...".to_string()));
    }
}
