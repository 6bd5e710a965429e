//! One constructor per API resource, each with its refresh policy.

use super::{RefreshPolicy, Resource};
use crate::api::{DEFAULT_MIN_AMOUNT, Endpoint, StockFilter};
use crate::models::{
    Briefing, CapSizes, ClimateOverview, CongressStats, CongressTrades, PriceHistory,
    RocketHistory, Simulation, StockAnalysis, StockList, TopMovers, WatchlistResponse,
};

const BRIEFING: RefreshPolicy = RefreshPolicy::every(300);
const QUOTES: RefreshPolicy = RefreshPolicy::every(60);
const CONGRESS: RefreshPolicy = RefreshPolicy::every(600);
const CLIMATE: RefreshPolicy = RefreshPolicy::every(600).without_focus_revalidation();
const ONCE: RefreshPolicy = RefreshPolicy::once();

pub fn morning_briefing() -> Resource<Briefing> {
    Resource::new(Endpoint::MorningBriefing, BRIEFING)
}

pub fn evening_briefing() -> Resource<Briefing> {
    Resource::new(Endpoint::EveningBriefing, BRIEFING)
}

pub fn latest_briefing() -> Resource<Briefing> {
    Resource::new(Endpoint::LatestBriefing, BRIEFING)
}

pub fn watchlist() -> Resource<WatchlistResponse> {
    Resource::new(Endpoint::Watchlist, QUOTES)
}

pub fn all_stocks(filter: StockFilter) -> Resource<StockList> {
    Resource::new(Endpoint::AllStocks(filter), QUOTES)
}

pub fn top_movers() -> Resource<TopMovers> {
    Resource::new(Endpoint::TopMovers, QUOTES)
}

pub fn cap_sizes() -> Resource<CapSizes> {
    Resource::new(Endpoint::CapSizes, ONCE)
}

/// `None` for a blank symbol: there is nothing to fetch.
pub fn stock_analysis(symbol: &str) -> Option<Resource<StockAnalysis>> {
    let symbol = symbol.trim();
    (!symbol.is_empty()).then(|| {
        Resource::new(
            Endpoint::StockAnalysis {
                symbol: symbol.to_string(),
            },
            QUOTES,
        )
    })
}

/// `None` for a blank symbol.
pub fn stock_history(symbol: &str, days: u32) -> Option<Resource<PriceHistory>> {
    let symbol = symbol.trim();
    (!symbol.is_empty()).then(|| {
        Resource::new(
            Endpoint::StockHistory {
                symbol: symbol.to_string(),
                days,
            },
            ONCE,
        )
    })
}

pub fn congress_stats(days: u32) -> Resource<CongressStats> {
    Resource::new(Endpoint::CongressStats { days }, CONGRESS)
}

/// Trades of at least `min_amount`, defaulting to the smallest disclosure band above $1,000.
pub fn congress_trades(days: u32, min_amount: Option<&str>) -> Resource<CongressTrades> {
    Resource::new(
        Endpoint::CongressTrades {
            days,
            min_amount: min_amount.unwrap_or(DEFAULT_MIN_AMOUNT).to_string(),
        },
        CONGRESS,
    )
}

pub fn market_climate() -> Resource<ClimateOverview> {
    Resource::new(Endpoint::ClimateOverview, CLIMATE)
}

pub fn rocket_history(days: u32) -> Resource<RocketHistory> {
    Resource::new(Endpoint::RocketHistory { days }, ONCE)
}

pub fn simulation(days: u32) -> Resource<Simulation> {
    Resource::new(Endpoint::Simulation { days }, ONCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_polling_intervals() {
        let secs = |policy: RefreshPolicy| policy.interval.map(|d| d.as_secs());

        assert_eq!(secs(morning_briefing().policy()), Some(300));
        assert_eq!(secs(latest_briefing().policy()), Some(300));
        assert_eq!(secs(watchlist().policy()), Some(60));
        assert_eq!(secs(all_stocks(StockFilter::default()).policy()), Some(60));
        assert_eq!(secs(top_movers().policy()), Some(60));
        assert_eq!(secs(congress_stats(30).policy()), Some(600));
        assert_eq!(secs(congress_trades(30, None).policy()), Some(600));
        assert_eq!(secs(market_climate().policy()), Some(600));
        assert_eq!(cap_sizes().policy().interval, None);
        assert_eq!(rocket_history(30).policy().interval, None);
        assert_eq!(simulation(30).policy().interval, None);
        assert_eq!(
            stock_history("ABB.ST", 90).map(|r| r.policy().interval),
            Some(None)
        );
        assert_eq!(
            stock_analysis("ABB.ST").and_then(|r| r.policy().interval),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn test_only_climate_skips_focus_revalidation() {
        assert!(!market_climate().policy().revalidate_on_focus);
        assert!(watchlist().policy().revalidate_on_focus);
        assert!(cap_sizes().policy().revalidate_on_focus);
    }

    #[test]
    fn test_keys_include_query() {
        assert_eq!(
            congress_trades(7, None).key(),
            "/api/congress/recent?days=7&min_amount=%241%2C001%20-"
        );
        assert_ne!(
            all_stocks(StockFilter::default()).key(),
            all_stocks(StockFilter::default().page(1)).key()
        );
    }

    #[test]
    fn test_blank_symbol_has_no_resource() {
        assert!(stock_analysis("  ").is_none());
        assert!(stock_history("", 30).is_none());
    }
}
