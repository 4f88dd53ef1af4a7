use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chart::{ChartKind, ChartPayload};

/// The assistant greeting that seeds every conversation.
pub const GREETING: &str = "Hello! I'm Novex AI, your intelligent DeFi assistant. \
I'm here to help you navigate decentralized finance with real-time insights and \
personalized recommendations. How can I assist you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in the conversation thread. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub chart: Option<ChartPayload>,
    pub chart_kind: Option<ChartKind>,
    pub chart_title: Option<String>,
    pub token_symbol: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content)
    }

    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            chart: None,
            chart_kind: None,
            chart_title: None,
            token_symbol: None,
            created_at: Utc::now(),
        }
    }

    /// An assistant message carrying a chart payload.
    pub fn assistant_chart(
        content: impl Into<String>,
        chart: ChartPayload,
        kind: ChartKind,
        title: impl Into<String>,
        token_symbol: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            chart: Some(chart),
            chart_kind: Some(kind),
            chart_title: Some(title.into()),
            token_symbol: Some(token_symbol.into()),
            created_at: Utc::now(),
        }
    }

    pub fn is_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Short clock label shown next to the message bubble.
    pub fn timestamp_label(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

/// The in-memory conversation: an append-only ordered sequence, seeded with
/// the greeting and cleared only by an explicit reset.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Restore the single greeting message.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(ChatMessage::assistant(GREETING));
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
