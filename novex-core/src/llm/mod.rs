mod gemini;
mod mock;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;

use async_trait::async_trait;

use crate::error::NovexResult;

/// A hosted (or simulated) generative text endpoint. One prompt in, one raw
/// text blob out; the classifier deals with whatever comes back.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> NovexResult<String>;

    async fn health_check(&self) -> NovexResult<bool> {
        Ok(true)
    }
}
