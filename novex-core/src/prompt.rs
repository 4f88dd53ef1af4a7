//! The DeFi assistant prompt. One render per user turn; conversation history
//! is never sent.

/// Chain identifiers the assistant claims support for, enumerated in the
/// prompt so the model answers in terms of them.
pub const SUPPORTED_CHAINS: &[&str] = &[
    "ETH", "OP", "BSC", "OKT", "SONIC", "XLAYER", "POLYGON", "ARB", "AVAX", "ZKSYNC", "POLYZKEVM",
    "BASE", "LINEA", "FTM", "MANTLE", "CFX", "METIS", "MERLIN", "BLAST", "MANTA", "SCROLL", "CRO",
    "ZETA", "TRON", "SOL", "SUI", "TON",
];

const PROMPT_TEMPLATE: &str = r#"You are Novex AI, a DeFi Trading Assistant specializing in blockchain data and trading insights.
Respond in JSON format with clearly defined types for each response. Supported chains include:
{chains}.

Response types:
- Supported chains: { type: "supported_chains", data: string[] }
- Token price: { type: "price", token_name: string, price: number, similar_tokens: string[] }
- Trades: { type: "trades", data: { token: string, amount: number, timestamp: string }[] }
- Candlestick data: { type: "candlestick", data: { open: number, high: number, low: number, close: number, timestamp: string }[] }
- Historical data: { type: "hist_data", data: { open: number, high: number, low: number, close: number, timestamp: string }[] }
- Recent transaction: { type: "recent_transaction", data: { tx_hash: string, token: string, amount: number } }
- Total balance: { type: "total_value", token_name: "MYS", data: { total: number, currency: string } }
- Batch token prices: { type: "batch_price", data: { token: string, price: number }[] }
- Total token balance: { type: "total_token_balance", data: { token: string, balance: number }[] }
- Specific token balance: { type: "specific_token_balance", token_name: string, data: { balance: number, address: string } }
- Candlestick history: { type: "candlestick_history", data: { open: number, high: number, low: number, close: number, timestamp: string }[] }
- Token index price: { type: "token_index_price", data: { index: string, price: number } }
- Historical index price: { type: "historical_index_price", data: { index: string, price: number, timestamp: string }[] }
- Transaction history: { type: "transaction_history", data: { tx_hash: string, amount: number, timestamp: string }[] }
- Transaction details: { type: "tx_by_hash", data: { tx_hash: string, details: object } }
- General answer: { type: "general_answer", message: string }

If a token is mentioned, include "token_name" and "similar_tokens" fields.
User Query: {query}"#;

/// Marker preceding the user's query in the rendered prompt. Demo mode uses
/// it to recover the query for keyword matching.
pub const QUERY_MARKER: &str = "User Query:";

/// Render the assistant prompt for a single user query.
pub fn render_prompt(query: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{chains}", &SUPPORTED_CHAINS.join(", "))
        .replace("{query}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_query() {
        let prompt = render_prompt("show me an ETH price chart");
        assert!(prompt.ends_with("User Query: show me an ETH price chart"));
    }

    #[test]
    fn test_prompt_enumerates_chains() {
        let prompt = render_prompt("anything");
        for chain in SUPPORTED_CHAINS {
            assert!(prompt.contains(chain), "missing chain {}", chain);
        }
        assert!(!prompt.contains("{chains}"));
    }

    #[test]
    fn test_prompt_enumerates_response_types() {
        let prompt = render_prompt("anything");
        for ty in [
            "supported_chains",
            "hist_data",
            "candlestick_history",
            "general_answer",
            "tx_by_hash",
        ] {
            assert!(prompt.contains(ty), "missing response type {}", ty);
        }
    }

    #[test]
    fn test_chain_count() {
        assert_eq!(SUPPORTED_CHAINS.len(), 27);
    }
}
