//! Chart payloads: the reshaped numeric series handed to the chart renderer.
//!
//! The model is loose about how it returns series data: elements can be
//! objects or positional arrays, numbers can arrive as JSON numbers or as
//! numeric strings, and historical data sometimes comes back as full OHLC
//! bars. Reshaping accepts all of those and emits one of two typed series.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    HistData,
    CandlestickHistory,
}

impl ChartKind {
    /// Map the `type` discriminator from a model reply, if it names a chart.
    pub fn from_type_str(s: &str) -> Option<Self> {
        match s {
            "hist_data" => Some(ChartKind::HistData),
            "candlestick_history" => Some(ChartKind::CandlestickHistory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::HistData => "hist_data",
            ChartKind::CandlestickHistory => "candlestick_history",
        }
    }

    /// Human-readable chart title for a token symbol.
    pub fn title_for(&self, token: &str) -> String {
        match self {
            ChartKind::HistData => format!("Price Tracking - {}", token),
            ChartKind::CandlestickHistory => format!("Candlestick Analysis - {}", token),
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleBar {
    pub timestamp_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "series", content = "data", rename_all = "snake_case")]
pub enum ChartPayload {
    PriceSeries(Vec<PricePoint>),
    CandleSeries(Vec<CandleBar>),
}

impl ChartPayload {
    /// Reshape the `data` value of a parsed model reply into a typed series.
    ///
    /// The series is reversed to oldest-first order; upstream sources return
    /// newest-first.
    pub fn from_value(kind: ChartKind, data: &Value) -> Self {
        let rows = series_rows(data);

        match kind {
            ChartKind::HistData => {
                let mut points: Vec<PricePoint> =
                    rows.iter().filter_map(|row| parse_point(row)).collect();
                points.reverse();
                ChartPayload::PriceSeries(points)
            }
            ChartKind::CandlestickHistory => {
                let mut bars: Vec<CandleBar> =
                    rows.iter().filter_map(|row| parse_bar(row)).collect();
                bars.reverse();
                ChartPayload::CandleSeries(bars)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartPayload::PriceSeries(points) => points.len(),
            ChartPayload::CandleSeries(bars) => bars.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The newest price in the series (close price for candle bars).
    pub fn latest_price(&self) -> Option<f64> {
        match self {
            ChartPayload::PriceSeries(points) => points.last().map(|p| p.price),
            ChartPayload::CandleSeries(bars) => bars.last().map(|b| b.close),
        }
    }

    /// The price one step before the newest, for the delta indicator.
    pub fn previous_price(&self) -> Option<f64> {
        match self {
            ChartPayload::PriceSeries(points) => {
                points.len().checked_sub(2).map(|i| points[i].price)
            }
            ChartPayload::CandleSeries(bars) => bars.len().checked_sub(2).map(|i| bars[i].close),
        }
    }

    /// Change between the two newest prices, when both exist.
    pub fn price_change(&self) -> Option<f64> {
        Some(self.latest_price()? - self.previous_price()?)
    }
}

/// Locate the actual row array inside `data`. Historical replies sometimes
/// nest it as `[{"prices": [...]}]`.
fn series_rows(data: &Value) -> Vec<Value> {
    let Some(array) = data.as_array() else {
        return Vec::new();
    };

    if let Some(prices) = array
        .first()
        .and_then(|first| first.get("prices"))
        .and_then(Value::as_array)
    {
        return prices.clone();
    }

    array.clone()
}

/// Parse a numeric field that may be a JSON number or a numeric string.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_timestamp(value: &Value) -> Option<i64> {
    as_number(value).map(|n| n as i64)
}

fn field<'a>(row: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| row.get(name))
}

fn parse_point(row: &Value) -> Option<PricePoint> {
    if let Some(cells) = row.as_array() {
        // Positional form: [time, price]
        return Some(PricePoint {
            timestamp_ms: as_timestamp(cells.first()?)?,
            price: as_number(cells.get(1)?)?,
        });
    }

    let timestamp_ms = as_timestamp(field(row, &["time", "timestamp"])?)?;

    // OHLC-shaped historical rows carry the price in `close`.
    let price = field(row, &["price", "close"]).and_then(as_number)?;

    Some(PricePoint {
        timestamp_ms,
        price,
    })
}

fn parse_bar(row: &Value) -> Option<CandleBar> {
    if let Some(cells) = row.as_array() {
        // Positional form: [time, open, high, low, close, volume]
        return Some(CandleBar {
            timestamp_ms: as_timestamp(cells.first()?)?,
            open: as_number(cells.get(1)?)?,
            high: as_number(cells.get(2)?)?,
            low: as_number(cells.get(3)?)?,
            close: as_number(cells.get(4)?)?,
            volume: cells.get(5).and_then(as_number).unwrap_or(0.0),
        });
    }

    Some(CandleBar {
        timestamp_ms: as_timestamp(field(row, &["timestamp", "time"])?)?,
        open: as_number(row.get("open")?)?,
        high: as_number(row.get("high")?)?,
        low: as_number(row.get("low")?)?,
        close: as_number(row.get("close")?)?,
        volume: row.get("volume").and_then(as_number).unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chart_kind_from_type_str() {
        assert_eq!(
            ChartKind::from_type_str("hist_data"),
            Some(ChartKind::HistData)
        );
        assert_eq!(
            ChartKind::from_type_str("candlestick_history"),
            Some(ChartKind::CandlestickHistory)
        );
        assert_eq!(ChartKind::from_type_str("general_answer"), None);
        assert_eq!(ChartKind::from_type_str("price"), None);
    }

    #[test]
    fn test_chart_kind_titles() {
        assert_eq!(
            ChartKind::HistData.title_for("SOL"),
            "Price Tracking - SOL"
        );
        assert_eq!(
            ChartKind::CandlestickHistory.title_for("ETH"),
            "Candlestick Analysis - ETH"
        );
    }

    #[test]
    fn test_price_points_from_objects_with_string_numbers() {
        let data = json!([
            { "time": "1641081600000", "price": "102.25" },
            { "time": "1640995200000", "price": "100.50" }
        ]);

        let payload = ChartPayload::from_value(ChartKind::HistData, &data);
        assert_eq!(payload.len(), 2);

        // Reversed to oldest-first.
        let ChartPayload::PriceSeries(points) = &payload else {
            panic!("expected price series");
        };
        assert_eq!(points[0].timestamp_ms, 1640995200000);
        assert_eq!(points[0].price, 100.50);
        assert_eq!(points[1].price, 102.25);
    }

    #[test]
    fn test_price_points_from_ohlc_rows_use_close() {
        let data = json!([
            { "timestamp": 1641081600000i64, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5 }
        ]);

        let payload = ChartPayload::from_value(ChartKind::HistData, &data);
        assert_eq!(payload.latest_price(), Some(1.5));
    }

    #[test]
    fn test_price_points_from_nested_prices() {
        let data = json!([
            { "prices": [
                { "time": "1641081600000", "price": "102.25" },
                { "time": "1640995200000", "price": "100.50" }
            ]}
        ]);

        let payload = ChartPayload::from_value(ChartKind::HistData, &data);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.latest_price(), Some(102.25));
    }

    #[test]
    fn test_candles_from_positional_rows() {
        let data = json!([
            ["1641081600000", "103.45", "108.90", "102.10", "106.75", "1800000"],
            ["1640995200000", "100.50", "105.20", "99.80", "103.45", "1500000"]
        ]);

        let payload = ChartPayload::from_value(ChartKind::CandlestickHistory, &data);
        assert_eq!(payload.len(), 2);

        let ChartPayload::CandleSeries(bars) = &payload else {
            panic!("expected candle series");
        };
        assert_eq!(bars[0].timestamp_ms, 1640995200000);
        assert_eq!(bars[0].open, 100.50);
        assert_eq!(bars[1].close, 106.75);
        assert_eq!(bars[1].volume, 1800000.0);
    }

    #[test]
    fn test_candles_from_objects_without_volume() {
        let data = json!([
            { "timestamp": "1640995200000", "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5 }
        ]);

        let payload = ChartPayload::from_value(ChartKind::CandlestickHistory, &data);
        let ChartPayload::CandleSeries(bars) = &payload else {
            panic!("expected candle series");
        };
        assert_eq!(bars[0].volume, 0.0);
    }

    #[test]
    fn test_unparseable_rows_are_skipped() {
        let data = json!([
            { "time": 1640995200000i64, "price": 100.5 },
            { "note": "no numbers here" },
            "garbage"
        ]);

        let payload = ChartPayload::from_value(ChartKind::HistData, &data);
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_non_array_data_is_empty() {
        let payload = ChartPayload::from_value(ChartKind::HistData, &json!({"data": 42}));
        assert!(payload.is_empty());
        assert!(payload.latest_price().is_none());
        assert!(payload.price_change().is_none());
    }

    #[test]
    fn test_price_change() {
        let data = json!([
            { "time": 2, "price": 115.20 },
            { "time": 1, "price": 112.45 }
        ]);

        let payload = ChartPayload::from_value(ChartKind::HistData, &data);
        let change = payload.price_change().unwrap();
        assert!((change - 2.75).abs() < 1e-9);
    }
}
