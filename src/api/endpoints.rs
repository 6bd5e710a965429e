//! Paths of the briefing REST API.

use std::fmt;

/// Default minimum trade size for the congress trade list.
pub const DEFAULT_MIN_AMOUNT: &str = "$1,001 -";

/// Filter and page for `/api/stocks/all`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockFilter {
    /// Market-cap bucket id; `None` means all caps.
    pub cap: Option<String>,
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u32,
    pub sort_by: String,
    pub sort_desc: bool,
}

impl Default for StockFilter {
    fn default() -> Self {
        Self {
            cap: None,
            search: None,
            limit: 30,
            offset: 0,
            sort_by: "change_percent".to_string(),
            sort_desc: true,
        }
    }
}

impl StockFilter {
    /// Filter for a zero-based page of `limit` items.
    pub fn page(mut self, page: u32) -> Self {
        self.offset = page.saturating_mul(self.limit);
        self
    }

    pub fn cap(mut self, cap: Option<impl Into<String>>) -> Self {
        self.cap = cap.map(Into::into);
        self
    }

    /// Blank searches are dropped from the query.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.search = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    fn query(&self) -> String {
        let mut params = Vec::with_capacity(6);
        if let Some(cap) = &self.cap {
            params.push(format!("cap={}", urlencoding::encode(cap)));
        }
        if let Some(search) = &self.search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        params.push(format!("limit={}", self.limit));
        params.push(format!("offset={}", self.offset));
        params.push(format!("sort_by={}", urlencoding::encode(&self.sort_by)));
        params.push(format!("sort_desc={}", self.sort_desc));
        params.join("&")
    }
}

/// Every GET endpoint the dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MorningBriefing,
    EveningBriefing,
    LatestBriefing,
    RocketHistory { days: u32 },
    Simulation { days: u32 },
    ClimateOverview,
    CongressStats { days: u32 },
    CongressTrades { days: u32, min_amount: String },
    Watchlist,
    AllStocks(StockFilter),
    TopMovers,
    CapSizes,
    StockAnalysis { symbol: String },
    StockHistory { symbol: String, days: u32 },
}

impl Endpoint {
    /// Path relative to the API base URL, with the query string percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Self::MorningBriefing => "/api/briefings/morning".to_string(),
            Self::EveningBriefing => "/api/briefings/evening".to_string(),
            Self::LatestBriefing => "/api/briefings/latest".to_string(),
            Self::RocketHistory { days } => format!("/api/briefings/rockets/history?days={days}"),
            Self::Simulation { days } => format!("/api/briefings/rockets/simulation?days={days}"),
            Self::ClimateOverview => "/api/climate/overview".to_string(),
            Self::CongressStats { days } => format!("/api/congress/stats?days={days}"),
            Self::CongressTrades { days, min_amount } => format!(
                "/api/congress/recent?days={days}&min_amount={}",
                urlencoding::encode(min_amount)
            ),
            Self::Watchlist => "/api/stocks/watchlist".to_string(),
            Self::AllStocks(filter) => format!("/api/stocks/all?{}", filter.query()),
            Self::TopMovers => "/api/stocks/top-movers".to_string(),
            Self::CapSizes => "/api/stocks/caps".to_string(),
            Self::StockAnalysis { symbol } => {
                format!("/api/stocks/{}/analysis", urlencoding::encode(symbol))
            }
            Self::StockHistory { symbol, days } => format!(
                "/api/stocks/{}/history?days={days}",
                urlencoding::encode(symbol)
            ),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_congress_trades_encodes_min_amount() {
        let endpoint = Endpoint::CongressTrades {
            days: 30,
            min_amount: DEFAULT_MIN_AMOUNT.to_string(),
        };
        assert_eq!(
            endpoint.path(),
            "/api/congress/recent?days=30&min_amount=%241%2C001%20-"
        );
    }

    #[test]
    fn test_symbol_is_percent_encoded() {
        let endpoint = Endpoint::StockHistory {
            symbol: "BRK/B".to_string(),
            days: 90,
        };
        assert_eq!(endpoint.path(), "/api/stocks/BRK%2FB/history?days=90");
        assert_eq!(
            Endpoint::StockAnalysis { symbol: "VOLV-B.ST".to_string() }.to_string(),
            "/api/stocks/VOLV-B.ST/analysis"
        );
    }

    #[test]
    fn test_all_stocks_query() {
        let filter = StockFilter::default().cap(Some("large")).search("volvo b").page(2);
        assert_eq!(
            Endpoint::AllStocks(filter).path(),
            "/api/stocks/all?cap=large&search=volvo%20b&limit=30&offset=60&sort_by=change_percent&sort_desc=true"
        );
    }

    #[test]
    fn test_blank_search_and_no_cap_are_omitted() {
        let filter = StockFilter::default().cap(None::<String>).search("  ");
        assert_eq!(
            Endpoint::AllStocks(filter).path(),
            "/api/stocks/all?limit=30&offset=0&sort_by=change_percent&sort_desc=true"
        );
    }

    #[test]
    fn test_simulation_path() {
        assert_eq!(
            Endpoint::Simulation { days: 30 }.path(),
            "/api/briefings/rockets/simulation?days=30"
        );
    }
}
