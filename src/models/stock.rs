//! Stock quotes, analysis and price history.

use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "SEK".to_string()
}

fn default_volume_ratio() -> f64 {
    1.0
}

/// A quote as shown on a stock card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistStock {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default = "default_volume_ratio")]
    pub volume_vs_avg: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub signal_score: Option<i32>,
    #[serde(default)]
    pub signal_type: Option<String>,
    /// Set when upstream could not produce a quote for this item.
    #[serde(default)]
    pub error: Option<String>,
}

impl WatchlistStock {
    /// Short market badge (`OMX Stockholm` is shown as `OMX`).
    pub fn market_badge(&self) -> &str {
        if self.market == "OMX Stockholm" {
            "OMX"
        } else {
            &self.market
        }
    }

    /// Volume is notably above its average.
    pub fn has_high_volume(&self) -> bool {
        self.volume_vs_avg > 1.5
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// `/api/stocks/watchlist` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchlistResponse {
    #[serde(default)]
    pub stocks: Vec<WatchlistStock>,
}

/// `/api/stocks/all` payload: one page of the filtered list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockList {
    #[serde(default)]
    pub stocks: Vec<WatchlistStock>,
    #[serde(default)]
    pub total: u32,
}

/// A market-cap bucket usable as a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapSize {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

/// `/api/stocks/caps` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapSizes {
    #[serde(default)]
    pub caps: Vec<CapSize>,
}

/// `/api/stocks/top-movers` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMovers {
    #[serde(default)]
    pub gainers: Vec<WatchlistStock>,
    #[serde(default)]
    pub losers: Vec<WatchlistStock>,
}

/// Detailed quote for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub volume: u64,
    #[serde(default = "default_volume_ratio")]
    pub volume_vs_avg: f64,
    #[serde(default)]
    pub high_52w: Option<f64>,
    #[serde(default)]
    pub low_52w: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Computed technical signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// News sentiment roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSummary {
    #[serde(default)]
    pub count: u32,
    #[serde(default = "NewsSummary::neutral")]
    pub sentiment: String,
    #[serde(default)]
    pub score: f64,
}

impl NewsSummary {
    fn neutral() -> String {
        "neutral".to_string()
    }
}

impl Default for NewsSummary {
    fn default() -> Self {
        Self {
            count: 0,
            sentiment: Self::neutral(),
            score: 0.0,
        }
    }
}

/// Congressional trading around one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongressActivity {
    pub has_congress_activity: bool,
    pub sentiment: Option<String>,
    pub sentiment_description: Option<String>,
    pub total_trades: u32,
    pub buys: u32,
    pub sells: u32,
    pub politicians_involved: Vec<String>,
}

/// `/api/stocks/{symbol}/analysis` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub stock_data: StockInfo,
    #[serde(default)]
    pub unusual_activity: Vec<String>,
    #[serde(default)]
    pub news_summary: NewsSummary,
    #[serde(default)]
    pub recent_headlines: Vec<String>,
    #[serde(default)]
    pub congress_activity: CongressActivity,
    #[serde(default)]
    pub signal: Signal,
    #[serde(default)]
    pub timestamp: String,
}

/// One candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvRecord {
    /// Trading day, `YYYY-MM-DD`.
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl OhlcvRecord {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// `/api/stocks/{symbol}/history` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub data: Vec<OhlcvRecord>,
}

impl PriceHistory {
    /// Lowest low and highest high across the series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.data.iter().fold(None, |range, candle| match range {
            None => Some((candle.low, candle.high)),
            Some((low, high)) => Some((low.min(candle.low), high.max(candle.high))),
        })
    }
}
