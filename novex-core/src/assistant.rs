//! Turn orchestration: prompt rendering, the provider call, classification,
//! and the conversation log.
//!
//! `Assistant` is not self-locking; a caller that allows concurrent turns
//! must serialize submissions itself (the TUI disables input while a call
//! is pending).

use std::sync::Arc;
use tracing::{info, warn};

use crate::classifier::classify;
use crate::error::NovexResult;
use crate::llm::CompletionProvider;
use crate::models::{ChatMessage, Conversation};
use crate::prompt::render_prompt;

/// Assistant message appended when a turn fails.
pub const FALLBACK_MESSAGE: &str = "An error occurred while processing your request.";

/// User-visible error banner text for a failed turn.
pub const ERROR_BANNER: &str = "Failed to fetch response. Please try again.";

pub struct Assistant {
    provider: Arc<dyn CompletionProvider>,
    conversation: Conversation,
    last_error: Option<String>,
}

impl Assistant {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            conversation: Conversation::new(),
            last_error: None,
        }
    }

    pub fn provider(&self) -> Arc<dyn CompletionProvider> {
        Arc::clone(&self.provider)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a turn: append the user message and return the rendered prompt.
    /// Empty or whitespace-only input appends nothing and returns `None`.
    pub fn begin_turn(&mut self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.conversation.push(ChatMessage::user(trimmed));
        self.last_error = None;

        Some(render_prompt(trimmed))
    }

    /// Finish a turn with the provider's outcome. A successful reply is
    /// classified and appended; a failure appends the fallback message and
    /// records the error banner. The call is not retried.
    pub fn complete_turn(&mut self, outcome: NovexResult<String>) {
        match outcome {
            Ok(raw) => {
                let message = classify(&raw);
                info!(
                    chart = message.is_chart(),
                    "Classified assistant reply"
                );
                self.conversation.push(message);
            }
            Err(e) => {
                warn!("Model call failed: {}", e);
                self.last_error = Some(ERROR_BANNER.to_string());
                self.conversation.push(ChatMessage::assistant(FALLBACK_MESSAGE));
            }
        }
    }

    /// Run a full turn inline. Returns false when the input was blank and
    /// nothing happened.
    pub async fn submit(&mut self, input: &str) -> bool {
        let Some(prompt) = self.begin_turn(input) else {
            return false;
        };

        let provider = self.provider();
        let outcome = provider.generate(&prompt).await;
        self.complete_turn(outcome);
        true
    }

    /// Restore the single greeting message and clear any error state.
    pub fn reset(&mut self) {
        self.conversation.reset();
        self.last_error = None;
    }
}
