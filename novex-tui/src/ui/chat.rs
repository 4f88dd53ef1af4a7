//! The conversation thread: newest entries pinned to the bottom, older ones
//! scrolled back with Up/Down. Chart messages render as boxed charts, text
//! messages as marker + wrapped body + timestamp.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use novex_core::{ChatMessage, Role};

use crate::app::App;
use crate::theme::Theme;
use crate::ui::charts::ChartMessageView;
use crate::ui::widgets::{ErrorBanner, Spinner};

pub struct ChatView;

impl ChatView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Conversation ")
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 || inner.width < 4 {
            return;
        }

        let mut bottom = inner.bottom();

        // Transient rows sit below the thread and are never scrolled away.
        if let Some(error) = app.assistant.last_error() {
            let height = 3.min(bottom.saturating_sub(inner.y));
            if height > 0 {
                let row = Rect::new(inner.x, bottom - height, inner.width, height);
                ErrorBanner::render(frame, row, theme, error);
                bottom -= height;
            }
        }

        if app.is_pending() && bottom > inner.y {
            let row = Rect::new(inner.x, bottom - 1, inner.width, 1);
            Spinner::new()
                .with_message("Thinking...")
                .render(frame, row, theme, app.animation_tick);
            bottom -= 1;
        }

        let messages = app.assistant.messages();
        let visible = messages.len().saturating_sub(app.scroll_offset);

        for message in messages[..visible].iter().rev() {
            if bottom <= inner.y {
                break;
            }

            let available = bottom - inner.y;
            let height = entry_height(message, inner.width).min(available);
            if height == 0 {
                break;
            }

            let row = Rect::new(inner.x, bottom - height, inner.width, height);
            render_message(frame, row, theme, message);
            bottom -= height;
        }
    }
}

fn entry_height(message: &ChatMessage, width: u16) -> u16 {
    if message.is_chart() {
        return ChartMessageView::HEIGHT;
    }

    // Marker line + wrapped body + timestamp line.
    let body_width = usize::from(width.saturating_sub(2)).max(1);
    let body_lines: u16 = wrap_text(&message.content, body_width).len() as u16;
    body_lines + 2
}

fn render_message(frame: &mut Frame, area: Rect, theme: &dyn Theme, message: &ChatMessage) {
    if message.is_chart() {
        ChartMessageView::render(frame, area, theme, message);
        return;
    }

    let (marker, marker_color, alignment) = match message.role {
        Role::User => ("you ▐", theme.accent_secondary(), Alignment::Right),
        Role::Assistant => ("▌ novex", theme.accent(), Alignment::Left),
    };

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        marker,
        Style::default()
            .fg(marker_color)
            .add_modifier(Modifier::BOLD),
    ))];

    let body_width = usize::from(area.width.saturating_sub(2)).max(1);
    for wrapped in wrap_text(&message.content, body_width) {
        lines.push(Line::from(Span::styled(
            wrapped,
            Style::default().fg(theme.foreground()),
        )));
    }

    lines.push(Line::from(Span::styled(
        message.timestamp_label(),
        Style::default().fg(theme.foreground_dim()),
    )));

    let paragraph = Paragraph::new(lines).alignment(alignment);
    frame.render_widget(paragraph, area);
}

/// Word-wrap preserving existing newlines; words longer than the width are
/// hard-split. Never returns an empty vec.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.lines() {
        if raw_line.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word = word;

            // Hard-split oversized words.
            while word.chars().count() > width {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                let split: String = word.chars().take(width).collect();
                let rest_start = split.len();
                out.push(split);
                word = &word[rest_start..];
            }

            let needed = word.chars().count() + if current.is_empty() { 0 } else { 1 };
            if current.chars().count() + needed > width && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }

            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }

        if !current.is_empty() {
            out.push(current);
        }
    }

    if out.is_empty() {
        out.push(String::new());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_is_single_line() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_splits_on_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_preserves_newlines() {
        let lines = wrap_text("{\n  \"type\": \"price\"\n}", 40);
        assert_eq!(lines, vec!["{", "\"type\": \"price\"", "}"]);
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let lines = wrap_text("0x1234567890abcdef", 8);
        assert_eq!(lines, vec!["0x123456", "7890abcd", "ef"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_entry_height_counts_marker_and_timestamp() {
        let msg = novex_core::ChatMessage::assistant("short");
        assert_eq!(entry_height(&msg, 40), 3);
    }
}
