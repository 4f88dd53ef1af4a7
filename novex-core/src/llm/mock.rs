//! The demo-mode provider: no network, no key. Replies are canned and picked
//! by keyword, after a delay that stands in for a real round trip.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::NovexResult;
use crate::llm::CompletionProvider;
use crate::prompt::QUERY_MARKER;

const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Canned historical-price reply, same series the product demo ships.
const CANNED_HIST_DATA: &str = r#"```json
{
  "type": "hist_data",
  "token_name": "ETH",
  "data": [
    { "time": "1641513600000", "price": "115.20" },
    { "time": "1641427200000", "price": "112.45" },
    { "time": "1641340800000", "price": "108.30" },
    { "time": "1641254400000", "price": "105.80" },
    { "time": "1641168000000", "price": "98.75" },
    { "time": "1641081600000", "price": "102.25" },
    { "time": "1640995200000", "price": "100.50" }
  ]
}
```"#;

/// Canned candlestick reply in positional-row form.
const CANNED_CANDLESTICKS: &str = r#"```json
{
  "type": "candlestick_history",
  "token_name": "ETH",
  "data": [
    ["1641513600000", "116.90", "120.45", "115.80", "119.25", "2400000"],
    ["1641427200000", "114.85", "118.20", "113.40", "116.90", "2250000"],
    ["1641340800000", "111.45", "115.60", "110.20", "114.85", "1950000"],
    ["1641254400000", "107.30", "112.80", "106.90", "111.45", "2100000"],
    ["1641168000000", "106.75", "109.50", "104.20", "107.30", "1650000"],
    ["1641081600000", "103.45", "108.90", "102.10", "106.75", "1800000"],
    ["1640995200000", "100.50", "105.20", "99.80", "103.45", "1500000"]
  ]
}
```"#;

const CANNED_GENERAL: &str = "I appreciate your question! As your AI-powered DeFi companion, \
I'm equipped with advanced market analysis capabilities and can provide insights on trading \
strategies, yield farming opportunities, risk management, and much more. What specific aspect \
of DeFi would you like to explore together?";

pub struct MockProvider {
    delay: Duration,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }

    /// Shorten (or remove) the simulated round-trip delay. Tests use zero.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Recover the user's query from a rendered prompt. The full prompt
    /// enumerates every response type, so keyword-matching must only see the
    /// text after the query marker.
    fn query_of(prompt: &str) -> &str {
        prompt
            .rsplit(QUERY_MARKER)
            .next()
            .unwrap_or(prompt)
            .trim()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "demo"
    }

    async fn generate(&self, prompt: &str) -> NovexResult<String> {
        tokio::time::sleep(self.delay).await;

        let query = Self::query_of(prompt).to_lowercase();

        let reply = if query.contains("candlestick") {
            CANNED_CANDLESTICKS
        } else if query.contains("chart") || query.contains("price") {
            CANNED_HIST_DATA
        } else {
            CANNED_GENERAL
        };

        Ok(reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::models::ChartKind;
    use crate::prompt::render_prompt;

    fn fast_mock() -> MockProvider {
        MockProvider::with_delay(Duration::ZERO)
    }

    #[test]
    fn test_query_extraction_from_rendered_prompt() {
        let prompt = render_prompt("show me a candlestick view");
        assert_eq!(MockProvider::query_of(&prompt), "show me a candlestick view");
    }

    #[tokio::test]
    async fn test_candlestick_query_yields_candles() {
        let reply = fast_mock()
            .generate(&render_prompt("give me a candlestick breakdown"))
            .await
            .unwrap();

        let msg = classify(&reply);
        assert_eq!(msg.chart_kind, Some(ChartKind::CandlestickHistory));
        assert_eq!(msg.chart.as_ref().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_price_query_yields_hist_data() {
        let reply = fast_mock()
            .generate(&render_prompt("what is the price lately?"))
            .await
            .unwrap();

        let msg = classify(&reply);
        assert_eq!(msg.chart_kind, Some(ChartKind::HistData));
        assert_eq!(msg.chart.as_ref().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_other_queries_yield_text() {
        let reply = fast_mock()
            .generate(&render_prompt("how do I minimize fees?"))
            .await
            .unwrap();

        let msg = classify(&reply);
        assert!(!msg.is_chart());
        assert!(msg.content.contains("DeFi companion"));
    }

    #[tokio::test]
    async fn test_template_keywords_do_not_leak_into_matching() {
        // The rendered template itself mentions "price" and "candlestick";
        // only the query may trigger a chart reply.
        let reply = fast_mock()
            .generate(&render_prompt("tell me about staking"))
            .await
            .unwrap();

        assert!(!classify(&reply).is_chart());
    }
}
