//! Data transfer objects returned by the briefing API.
//!
//! These are immutable snapshots decoded straight from JSON. Every optional
//! field has a serde default so a partially populated payload still renders.

mod briefing;
mod climate;
mod congress;
mod rockets;
mod stock;

pub use briefing::{
    Briefing, BriefingKind, BriefingRecommendation, CongressNotable, Highlight, RocketFollowup,
    RocketPick,
};
pub use climate::{
    CalendarEvent, ClimateOverview, Impact, InternalSignals, MarketIndex, SignalDistribution,
    Trend,
};
pub use congress::{CongressStats, CongressTrade, CongressTrades};
pub use rockets::{
    BestPick, RocketDay, RocketDaySummary, RocketHistory, RocketResult, RocketStats, Simulation,
    SimulationTotals, SimulationTrack, SimulationTrade,
};
pub use stock::{
    CapSize, CapSizes, CongressActivity, NewsSummary, OhlcvRecord, PriceHistory, Signal,
    StockAnalysis, StockInfo, StockList, TopMovers, WatchlistResponse, WatchlistStock,
};
