use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};

use novex_core::{Assistant, NovexError, NovexResult, TuiConfig};

use crate::theme::{Theme, ThemeLoader, ThemeManager};
use crate::ui::layout::MainLayout;

/// Canned prompts offered as suggestion chips above the input line.
pub const SUGGESTIONS: &[&str] = &[
    "How does Novex's AI trading work?",
    "Explain the current SOL market conditions",
    "What's the best DeFi strategy for beginners?",
    "How to minimize transaction fees?",
];

pub struct App {
    pub should_quit: bool,
    pub assistant: Assistant,
    pub input: String,
    pub suggestion_index: Option<usize>,
    /// Number of thread entries hidden below the viewport; 0 follows the tail.
    pub scroll_offset: usize,
    pub status_message: Option<String>,
    pub theme_manager: ThemeManager,
    pub theme_loader: ThemeLoader,
    pub animation_tick: u64,
    pub tick_rate: Duration,
    pending: Option<UnboundedReceiver<NovexResult<String>>>,
}

impl App {
    pub fn new(assistant: Assistant, tui: &TuiConfig) -> Self {
        let theme_loader = ThemeLoader::new();
        let theme_manager = theme_loader.initialize_theme_manager(&tui.theme);

        Self {
            should_quit: false,
            assistant,
            input: String::new(),
            suggestion_index: None,
            scroll_offset: 0,
            status_message: Some(
                "Press Tab for suggestions, Ctrl+N for a new conversation, Esc to quit."
                    .to_string(),
            ),
            theme_manager,
            theme_loader,
            animation_tick: 0,
            tick_rate: Duration::from_millis(tui.tick_ms),
            pending: None,
        }
    }

    pub fn current_theme(&self) -> &dyn Theme {
        self.theme_manager.current_theme()
    }

    /// True while a model call is in flight; submission is disabled then.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        crossterm::execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;

        loop {
            self.animation_tick = self.animation_tick.wrapping_add(1);

            self.poll_pending();

            terminal.draw(|frame| {
                MainLayout::render(frame, self);
            })?;

            if event::poll(self.tick_rate)? {
                let evt = event::read()?;
                self.handle_event(evt);
            }

            if self.should_quit {
                break;
            }
        }

        crossterm::execute!(io::stdout(), crossterm::event::DisableMouseCapture)?;

        Ok(())
    }

    /// Drain the in-flight call's channel, if its result has arrived.
    fn poll_pending(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(outcome) => {
                self.assistant.complete_turn(outcome);
                self.pending = None;
                self.scroll_offset = 0;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.assistant.complete_turn(Err(NovexError::Internal(
                    "response task dropped".to_string(),
                )));
                self.pending = None;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_event(key.code, key.modifiers);
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.scroll_up(3),
                MouseEventKind::ScrollDown => self.scroll_down(3),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => {
                if self.suggestion_index.is_some() {
                    self.suggestion_index = None;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('n') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.reset_conversation();
            }
            KeyCode::Char('t') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_theme();
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
            }
            KeyCode::Tab => self.cycle_suggestion(true),
            KeyCode::BackTab => self.cycle_suggestion(false),
            KeyCode::Enter => {
                if let Some(index) = self.suggestion_index.take() {
                    self.input = SUGGESTIONS[index].to_string();
                } else {
                    self.submit_input();
                }
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(5),
            KeyCode::PageDown => self.scroll_down(5),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
                self.suggestion_index = None;
            }
            _ => {}
        }
    }

    /// Begin a turn and hand the model call to a background task. At most
    /// one call is in flight; further submissions are ignored until it
    /// resolves. The call is never cancelled.
    pub fn submit_input(&mut self) {
        if self.is_pending() {
            return;
        }

        let Some(prompt) = self.assistant.begin_turn(&self.input) else {
            return;
        };

        self.input.clear();
        self.scroll_offset = 0;
        self.status_message = None;

        let provider = self.assistant.provider();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let outcome = provider.generate(&prompt).await;
            let _ = tx.send(outcome);
        });

        self.pending = Some(rx);
    }

    pub fn reset_conversation(&mut self) {
        self.assistant.reset();
        self.scroll_offset = 0;
        self.status_message = Some("Started a new conversation.".to_string());
    }

    fn toggle_theme(&mut self) {
        self.theme_manager.cycle_theme();
        let theme_name = self.theme_manager.current_theme_name();
        if let Err(e) = self.theme_loader.save_theme_name(theme_name) {
            tracing::warn!("Failed to save theme preference: {}", e);
        }
        self.status_message = Some(format!("Theme changed to: {}", theme_name));
    }

    fn cycle_suggestion(&mut self, forward: bool) {
        let len = SUGGESTIONS.len();
        self.suggestion_index = Some(match (self.suggestion_index, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }

    fn scroll_up(&mut self, lines: usize) {
        let max = self.assistant.messages().len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + lines).min(max);
    }

    fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novex_core::{MockProvider, GREETING};
    use std::sync::Arc;

    fn test_app() -> App {
        let assistant = Assistant::new(Arc::new(MockProvider::with_delay(Duration::ZERO)));
        App::new(assistant, &TuiConfig::default())
    }

    #[test]
    fn test_blank_input_is_not_submitted() {
        let mut app = test_app();
        app.input = "   ".to_string();

        app.submit_input();

        assert!(!app.is_pending());
        assert_eq!(app.assistant.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_disables_until_response_arrives() {
        let mut app = test_app();
        app.input = "price chart".to_string();

        app.submit_input();
        assert!(app.is_pending());
        assert_eq!(app.assistant.messages().len(), 2);

        // A second submit while pending is ignored.
        app.input = "another question".to_string();
        app.submit_input();
        assert_eq!(app.assistant.messages().len(), 2);

        // Wait for the background task, then drain it like the run loop does.
        let outcome = app.pending.as_mut().unwrap().recv().await.unwrap();
        assert!(outcome.is_ok());
        app.assistant.complete_turn(outcome);
        app.pending = None;

        assert_eq!(app.assistant.messages().len(), 3);
        assert!(app.assistant.messages().last().unwrap().is_chart());
    }

    #[test]
    fn test_reset_restores_greeting() {
        let mut app = test_app();
        app.scroll_offset = 4;

        app.reset_conversation();

        assert_eq!(app.assistant.messages().len(), 1);
        assert_eq!(app.assistant.messages()[0].content, GREETING);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_suggestion_cycling() {
        let mut app = test_app();

        app.handle_key_event(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.suggestion_index, Some(0));

        app.handle_key_event(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.suggestion_index, Some(1));

        app.handle_key_event(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(app.suggestion_index, Some(0));

        app.handle_key_event(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(app.suggestion_index, Some(SUGGESTIONS.len() - 1));
    }

    #[test]
    fn test_enter_on_suggestion_fills_input() {
        let mut app = test_app();

        app.handle_key_event(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key_event(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.input, SUGGESTIONS[0]);
        assert!(app.suggestion_index.is_none());
        // Filling the input does not submit anything.
        assert!(!app.is_pending());
    }

    #[test]
    fn test_typing_clears_suggestion_focus() {
        let mut app = test_app();

        app.handle_key_event(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key_event(KeyCode::Char('h'), KeyModifiers::NONE);

        assert!(app.suggestion_index.is_none());
        assert_eq!(app.input, "h");
    }

    #[test]
    fn test_esc_clears_suggestion_before_quitting() {
        let mut app = test_app();

        app.handle_key_event(KeyCode::Tab, KeyModifiers::NONE);
        app.handle_key_event(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.should_quit);

        app.handle_key_event(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_u_clears_input() {
        let mut app = test_app();
        app.input = "half-typed".to_string();

        app.handle_key_event(KeyCode::Char('u'), KeyModifiers::CONTROL);

        assert!(app.input.is_empty());
    }
}
