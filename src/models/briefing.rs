//! Morning and evening briefings.

use serde::{Deserialize, Serialize};

/// Which briefing of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BriefingKind {
    #[default]
    Morning,
    Evening,
}

impl BriefingKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Morning => "Morgonbrief",
            Self::Evening => "Kvällsbrief",
        }
    }

    /// Scheduled publication time, Stockholm local.
    pub fn scheduled_at(&self) -> &'static str {
        match self {
            Self::Morning => "08:15",
            Self::Evening => "17:15",
        }
    }
}

/// A short alert shown in the highlight strip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub stock: String,
    pub signal: Option<String>,
    pub alert: Option<String>,
    pub reasons: Vec<String>,
}

/// A per-stock recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefingRecommendation {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    /// BUY, SELL, HOLD, WATCH or AVOID.
    #[serde(default)]
    pub action: String,
    /// HIGH, MEDIUM or LOW.
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub news_sentiment: String,
    #[serde(default)]
    pub congress_signal: Option<String>,
}

/// Notable congressional trading in a watched ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongressNotable {
    pub ticker: String,
    pub sentiment: String,
    pub description: String,
    pub total_trades: u32,
}

/// A morning daytrading pick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketPick {
    pub symbol: String,
    pub name: String,
    pub morning_price: f64,
    pub signal_score: i32,
    pub rocket_score: i32,
    pub reasons: Vec<String>,
    pub volume_vs_avg: f64,
    pub news_sentiment: String,
}

/// Evening follow-up of a morning pick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketFollowup {
    #[serde(flatten)]
    pub pick: RocketPick,
    pub current_price: Option<f64>,
    pub day_change_percent: Option<f64>,
    /// TARGET_HIT, PROFIT, FLAT, SMALL_LOSS, STOP_LOSS or NO_DATA.
    pub status: String,
    pub recommendation: String,
    pub message: String,
}

impl RocketFollowup {
    pub fn has_data(&self) -> bool {
        self.status != "NO_DATA" && self.day_change_percent.is_some()
    }
}

/// A generated briefing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Briefing {
    #[serde(rename = "type")]
    pub kind: BriefingKind,
    pub generated_at: String,
    pub market_status: String,
    pub summary: String,
    pub highlights: Vec<Highlight>,
    pub recommendations: Vec<BriefingRecommendation>,
    pub congress_notable: Vec<CongressNotable>,
    pub rocket_picks: Vec<RocketPick>,
    pub rocket_followup: Vec<RocketFollowup>,
    pub disclaimer: String,
    pub error: Option<String>,
}

impl Briefing {
    /// Nothing generated yet; the backend is still producing it.
    pub fn is_pending(&self) -> bool {
        self.error.is_some() || (self.summary.is_empty() && self.recommendations.is_empty())
    }
}
