//! Congressional trading disclosures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One disclosed transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongressTrade {
    pub chamber: String,
    pub politician: String,
    pub party: String,
    pub state: String,
    pub ticker: String,
    pub asset: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub transaction_date: String,
    pub disclosure_date: String,
}

impl CongressTrade {
    pub fn is_purchase(&self) -> bool {
        self.kind.to_lowercase().contains("purchase") || self.kind.eq_ignore_ascii_case("buy")
    }
}

/// `/api/congress/recent` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongressTrades {
    pub trades: Vec<CongressTrade>,
    pub total: u32,
}

/// `/api/congress/stats` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongressStats {
    pub period_days: u32,
    pub total_trades: u32,
    pub buys: u32,
    pub sells: u32,
    pub buy_sell_ratio: f64,
    pub top_tickers: Vec<(String, u32)>,
    pub top_politicians: Vec<(String, u32)>,
    pub party_breakdown: BTreeMap<String, u32>,
    pub timestamp: String,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_stats_tuples() {
        let stats: CongressStats = serde_json::from_value(json!({
            "period_days": 30,
            "total_trades": 12,
            "buys": 8,
            "sells": 4,
            "buy_sell_ratio": 2.0,
            "top_tickers": [["NVDA", 5], ["MSFT", 3]],
            "top_politicians": [["Nancy Pelosi", 4]],
            "party_breakdown": {"D": 7, "R": 5},
            "timestamp": "2026-01-05T10:00:00"
        }))
        .unwrap();

        assert_eq!(stats.top_tickers[0], ("NVDA".to_string(), 5));
        assert_eq!(stats.party_breakdown.get("R"), Some(&5));
        assert!(stats.error.is_none());
    }

    #[test]
    fn test_trade_direction() {
        let trade: CongressTrade =
            serde_json::from_value(json!({"ticker": "NVDA", "type": "Purchase"})).unwrap();
        assert!(trade.is_purchase());

        let trade: CongressTrade =
            serde_json::from_value(json!({"ticker": "NVDA", "type": "Sale (Full)"})).unwrap();
        assert!(!trade.is_purchase());
    }
}
