mod chart;
mod message;

pub use chart::{CandleBar, ChartKind, ChartPayload, PricePoint};
pub use message::{ChatMessage, Conversation, Role, GREETING};
