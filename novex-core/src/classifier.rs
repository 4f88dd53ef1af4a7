//! The response classifier: raw model output text in, typed chat message out.
//!
//! The model is asked for JSON but replies as prose more often than not, so
//! extraction is best-effort: a fenced ```json block wins, otherwise the
//! first `{...}` span. Anything that fails to parse degrades to a plain-text
//! message. Nothing in here returns an error.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use crate::models::{ChartKind, ChartPayload, ChatMessage};

/// Token symbol used when the payload does not name one.
pub const DEFAULT_TOKEN: &str = "ETH";

/// Content line shown above a rendered chart.
pub const CHART_LEAD_IN: &str = "Here's the market analysis you requested:";

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid fence regex"))
}

/// Pull an embedded JSON object out of raw model text, if there is one.
fn extract_json(raw: &str) -> Option<&str> {
    if let Some(captures) = fence_regex().captures(raw) {
        return captures.get(1).map(|m| m.as_str());
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Classify raw model output into an assistant message.
///
/// Chart-typed payloads (`hist_data`, `candlestick_history`) become chart
/// messages with a reshaped series and a title derived from `token_name`
/// (defaulting to "ETH"). Every other payload is pretty-printed as text.
/// Absent or malformed JSON falls back to the trimmed raw text.
pub fn classify(raw: &str) -> ChatMessage {
    let Some(snippet) = extract_json(raw) else {
        return ChatMessage::assistant(raw.trim());
    };

    let parsed: Value = match serde_json::from_str(snippet) {
        Ok(value) => value,
        Err(e) => {
            debug!("Reply contained unparseable JSON ({}), keeping raw text", e);
            return ChatMessage::assistant(raw.trim());
        }
    };

    let kind = parsed
        .get("type")
        .and_then(Value::as_str)
        .and_then(ChartKind::from_type_str);

    if let Some(kind) = kind {
        let data = parsed.get("data").unwrap_or(&Value::Null);
        let payload = ChartPayload::from_value(kind, data);

        if !payload.is_empty() {
            let token = parsed
                .get("token_name")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_TOKEN);

            return ChatMessage::assistant_chart(
                CHART_LEAD_IN,
                payload,
                kind,
                kind.title_for(token),
                token,
            );
        }

        debug!("Chart-typed reply had no usable series, degrading to text");
    }

    match serde_json::to_string_pretty(&parsed) {
        Ok(pretty) => ChatMessage::assistant(pretty),
        Err(_) => ChatMessage::assistant(raw.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_plain_text_passes_through_trimmed() {
        let msg = classify("  Yield farming means staking assets for rewards.  \n");
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.content, "Yield farming means staking assets for rewards.");
        assert!(!msg.is_chart());
    }

    #[test]
    fn test_fenced_hist_data_becomes_chart() {
        let raw = r#"Here you go:
```json
{
  "type": "hist_data",
  "token_name": "SOL",
  "data": [
    { "time": "1641081600000", "price": "102.25" },
    { "time": "1640995200000", "price": "100.50" }
  ]
}
```"#;

        let msg = classify(raw);
        assert!(msg.is_chart());
        assert_eq!(msg.chart_kind, Some(ChartKind::HistData));
        assert_eq!(msg.chart.as_ref().unwrap().len(), 2);
        assert_eq!(msg.chart_title.as_deref(), Some("Price Tracking - SOL"));
        assert_eq!(msg.content, CHART_LEAD_IN);
    }

    #[test]
    fn test_missing_token_name_defaults_to_eth() {
        let raw = r#"```json
{ "type": "hist_data", "data": [ { "time": 1, "price": 2.0 } ] }
```"#;

        let msg = classify(raw);
        assert!(msg.is_chart());
        assert_eq!(msg.token_symbol.as_deref(), Some("ETH"));
        assert!(msg.chart_title.as_deref().unwrap().contains("ETH"));
    }

    #[test]
    fn test_bare_brace_span_is_extracted() {
        let raw = r#"Sure! { "type": "candlestick_history", "data": [[1, 2, 3, 0.5, 2.5, 10]] } hope that helps"#;

        let msg = classify(raw);
        assert!(msg.is_chart());
        assert_eq!(msg.chart_kind, Some(ChartKind::CandlestickHistory));
        assert_eq!(
            msg.chart_title.as_deref(),
            Some("Candlestick Analysis - ETH")
        );
    }

    #[test]
    fn test_non_chart_type_is_pretty_printed() {
        let raw = r#"```json
{"type":"price","token_name":"BTC","price":64123.5,"similar_tokens":["WBTC"]}
```"#;

        let msg = classify(raw);
        assert!(!msg.is_chart());
        // Pretty-printed, so the payload is spread over multiple lines.
        assert!(msg.content.contains("\"type\": \"price\""));
        assert!(msg.content.lines().count() > 1);
    }

    #[test]
    fn test_unknown_type_is_pretty_printed() {
        let raw = r#"{"type":"something_new","data":[1,2,3]}"#;

        let msg = classify(raw);
        assert!(!msg.is_chart());
        assert!(msg.content.contains("something_new"));
    }

    #[test]
    fn test_malformed_fenced_json_degrades_to_raw_text() {
        let raw = "```json\n{ \"type\": \"hist_data\", data: oops }\n```";

        let msg = classify(raw);
        assert!(!msg.is_chart());
        assert_eq!(msg.content, raw.trim());
    }

    #[test]
    fn test_chart_type_with_empty_data_degrades_to_text() {
        let raw = r#"```json
{ "type": "hist_data", "token_name": "ETH", "data": [] }
```"#;

        let msg = classify(raw);
        assert!(!msg.is_chart());
        assert!(msg.content.contains("hist_data"));
    }

    #[test]
    fn test_series_length_matches_input_array() {
        let raw = r#"```json
{ "type": "hist_data", "data": [
  { "time": 7, "price": 115.20 },
  { "time": 6, "price": 112.45 },
  { "time": 5, "price": 108.30 },
  { "time": 4, "price": 105.80 },
  { "time": 3, "price": 98.75 },
  { "time": 2, "price": 102.25 },
  { "time": 1, "price": 100.50 }
] }
```"#;

        let msg = classify(raw);
        assert_eq!(msg.chart.as_ref().unwrap().len(), 7);
    }

    #[test]
    fn test_fence_wins_over_brace_span() {
        let raw = r#"{"type":"general_answer"} ```json {"type":"price","price":1.0} ```"#;

        let msg = classify(raw);
        assert!(msg.content.contains("price"));
        assert!(!msg.content.contains("general_answer"));
    }
}
