//! Market climate: indices, internal signal mix and the economic calendar.

use serde::{Deserialize, Serialize};

/// Direction of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    #[serde(other)]
    Neutral,
}

impl Trend {
    pub fn inverted(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Neutral => Self::Neutral,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Neutral => "–",
        }
    }
}

/// A market index quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketIndex {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_price: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub currency: String,
}

impl MarketIndex {
    /// Volatility indices read upside down: a rise is bad news.
    pub fn is_volatility(&self) -> bool {
        self.symbol == "^VIX"
    }

    pub fn display_symbol(&self) -> &str {
        self.symbol.trim_start_matches('^')
    }
}

/// How the watched universe's signals are spread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalDistribution {
    pub total_stocks: u32,
    pub buy: u32,
    pub sell: u32,
    pub watch: u32,
    pub hold: u32,
    pub avoid: u32,
}

impl SignalDistribution {
    /// Share of the universe in one bucket, in percent.
    pub fn share(&self, count: u32) -> f64 {
        if self.total_stocks == 0 {
            0.0
        } else {
            f64::from(count) / f64::from(self.total_stocks) * 100.0
        }
    }
}

/// Aggregate internal signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalSignals {
    pub signal_distribution: SignalDistribution,
    pub avg_change_percent: f64,
    pub high_volume_count: u32,
    /// bullish, bearish or neutral.
    pub overall_sentiment: String,
}

/// Expected market impact of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Hög",
            Self::Medium => "Medel",
            Self::Low => "Låg",
        }
    }
}

/// An upcoming economic or corporate event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarEvent {
    pub id: String,
    pub date: String,
    pub title: String,
    pub category: String,
    pub source: String,
    pub impact: Impact,
    pub days_until: i64,
    pub is_active: bool,
}

impl CalendarEvent {
    /// Swedish label for the event category.
    pub fn category_label(&self) -> &str {
        match self.category.as_str() {
            "rate_decision" => "Räntebesked",
            "macro_data" => "Makrodata",
            "earnings_season" => "Rapportsäsong",
            "earnings_report" => "Rapport",
            "annual_meeting" => "Stämma",
            "dividend" => "Utdelning",
            "employment" => "Arbetsmarknad",
            "gdp" => "BNP",
            other => other,
        }
    }
}

/// `/api/climate/overview` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateOverview {
    pub indices: Vec<MarketIndex>,
    pub signals: InternalSignals,
    pub events: Vec<CalendarEvent>,
    pub timestamp: String,
}

impl ClimateOverview {
    /// First event that has not passed yet.
    pub fn next_event(&self) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.days_until >= 0)
    }
}
