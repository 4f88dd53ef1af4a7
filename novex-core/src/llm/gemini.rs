use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::error::{NovexError, NovexResult};
use crate::llm::CompletionProvider;

const GOOGLE_AI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Text returned when the API answers without any candidate text.
pub const NO_RESPONSE_FALLBACK: &str = "No response received from the server.";

/// Client for the Google generativelanguage `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url: GOOGLE_AI_API_BASE.to_string(),
        }
    }

    /// Build a provider from configuration. The API key is required here;
    /// demo mode is the keyless path.
    pub fn from_config(config: &LlmConfig) -> NovexResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| {
                std::env::var("GEMINI_API_KEY")
                    .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                    .ok()
            })
            .ok_or(NovexError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Override the API base URL (tests point this at a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// First candidate's first text part, if the reply carried one.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> NovexResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        info!(model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(self.generate_url())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        match response.text() {
            Some(text) => {
                debug!(chars = text.len(), "Received model reply");
                Ok(text.to_string())
            }
            None => {
                debug!("Reply carried no candidate text");
                Ok(NO_RESPONSE_FALLBACK.to_string())
            }
        }
    }

    async fn health_check(&self) -> NovexResult<bool> {
        let url = format!("{}/v1beta/models?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}
