//! Rocket (daytrading pick) history and the buy-at-open simulation.

use serde::{Deserialize, Serialize};

/// Outcome of one pick on one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketResult {
    pub symbol: String,
    pub name: String,
    pub morning_price: f64,
    pub evening_price: f64,
    pub change_percent: f64,
}

impl RocketResult {
    pub fn is_winner(&self) -> bool {
        self.change_percent >= 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketDaySummary {
    pub winners: u32,
    pub losers: u32,
    pub total_return_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketDay {
    pub date: String,
    pub rockets: Vec<RocketResult>,
    pub summary: RocketDaySummary,
}

/// Best or worst single pick of the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestPick {
    pub symbol: String,
    pub name: String,
    pub date: String,
    pub change_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketStats {
    pub total_picks: u32,
    pub total_days: u32,
    pub total_winners: u32,
    pub total_losers: u32,
    pub win_rate: f64,
    pub avg_return: f64,
    pub total_return: f64,
    pub best_pick: Option<BestPick>,
    pub worst_pick: Option<BestPick>,
}

/// `/api/briefings/rockets/history` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketHistory {
    pub history: Vec<RocketDay>,
    pub stats: RocketStats,
}

impl RocketHistory {
    pub fn is_empty(&self) -> bool {
        self.stats.total_picks == 0 && self.history.is_empty()
    }
}

/// One simulated round trip, bought at the morning price and sold at close.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTrade {
    pub date: String,
    pub symbol: String,
    pub name: String,
    pub morning_price: f64,
    pub evening_price: f64,
    pub change_percent: f64,
    pub profit_1000: f64,
    pub profit_10000: f64,
    pub cumulative_1000: f64,
    pub cumulative_10000: f64,
}

/// Running result for the 1 000 kr and 10 000 kr stakes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTotals {
    pub start_1000: f64,
    pub end_1000: f64,
    pub profit_1000: f64,
    pub start_10000: f64,
    pub end_10000: f64,
    pub profit_10000: f64,
    pub return_percent: f64,
    #[serde(alias = "total_trades")]
    pub trade_count: u32,
}

impl SimulationTotals {
    pub fn is_profit(&self) -> bool {
        self.profit_1000 >= 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTrack {
    pub trades: Vec<SimulationTrade>,
    pub totals: SimulationTotals,
}

/// `/api/briefings/rockets/simulation` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Simulation {
    pub rocket_1: SimulationTrack,
    pub rocket_2: SimulationTrack,
    pub combined: SimulationTrack,
}

impl Simulation {
    pub fn has_trades(&self) -> bool {
        !self.rocket_1.trades.is_empty() || !self.rocket_2.trades.is_empty()
    }
}
