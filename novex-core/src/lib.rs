pub mod assistant;
pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompt;

pub use assistant::{Assistant, ERROR_BANNER, FALLBACK_MESSAGE};
pub use classifier::{classify, CHART_LEAD_IN, DEFAULT_TOKEN};
pub use config::{
    ensure_config_dir, ensure_data_dir, get_config_dir, get_data_dir, ConfigLoadError, LlmConfig,
    LoggingConfig, NovexConfig, TuiConfig,
};
pub use error::{NovexError, NovexResult};
pub use llm::{CompletionProvider, GeminiProvider, MockProvider};
pub use models::{
    CandleBar, ChartKind, ChartPayload, ChatMessage, Conversation, PricePoint, Role, GREETING,
};
