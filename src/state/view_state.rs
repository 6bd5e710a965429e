//! Local state owned by individual views.

use crate::api::StockFilter;

/// Period shown by the price chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartRange {
    Week,
    Month,
    #[default]
    Quarter,
    HalfYear,
    Year,
}

impl ChartRange {
    pub const ALL: [ChartRange; 5] = [
        ChartRange::Week,
        ChartRange::Month,
        ChartRange::Quarter,
        ChartRange::HalfYear,
        ChartRange::Year,
    ];

    pub fn days(&self) -> u32 {
        match self {
            ChartRange::Week => 7,
            ChartRange::Month => 30,
            ChartRange::Quarter => 90,
            ChartRange::HalfYear => 180,
            ChartRange::Year => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartRange::Week => "1V",
            ChartRange::Month => "1M",
            ChartRange::Quarter => "3M",
            ChartRange::HalfYear => "6M",
            ChartRange::Year => "1Å",
        }
    }

    /// Step through the ranges, clamping at both ends.
    pub fn step(self, delta: i32) -> Self {
        let index = Self::ALL.iter().position(|r| *r == self).unwrap_or(2);
        Self::ALL[step_index(index, delta, Self::ALL.len())]
    }
}

/// Move `index` by `delta` within `0..len`, clamping at both ends.
pub fn step_index(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = index as i64 + i64::from(delta);
    moved.clamp(0, len as i64 - 1) as usize
}

/// Dashboard filter, search and paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    /// Selected market-cap bucket; `None` is "Alla".
    pub cap: Option<String>,
    /// Committed search query.
    pub search: String,
    /// Zero-based page.
    pub page: u32,
    pub per_page: u32,
    /// Selected card on the current page.
    pub selected: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            cap: None,
            search: String::new(),
            page: 0,
            per_page: 30,
            selected: 0,
        }
    }
}

impl DashboardState {
    pub fn with_per_page(per_page: usize) -> Self {
        Self {
            per_page: u32::try_from(per_page).unwrap_or(30).max(1),
            ..Self::default()
        }
    }

    /// Query for the page currently on screen.
    pub fn filter(&self) -> StockFilter {
        StockFilter::default()
            .limit(self.per_page)
            .cap(self.cap.clone())
            .search(self.search.clone())
            .page(self.page)
    }

    /// Changing the filter starts over from the first page.
    pub fn set_cap(&mut self, cap: Option<String>) {
        if self.cap != cap {
            self.cap = cap;
            self.page = 0;
            self.selected = 0;
        }
    }

    pub fn set_search(&mut self, query: &str) {
        let query = query.trim();
        if self.search != query {
            self.search = query.to_string();
            self.page = 0;
            self.selected = 0;
        }
    }

    pub fn total_pages(&self, total: u32) -> u32 {
        total.div_ceil(self.per_page)
    }

    pub fn next_page(&mut self, total: u32) {
        if self.page + 1 < self.total_pages(total) {
            self.page += 1;
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.selected = 0;
        }
    }
}

/// Look-back windows offered by the congress view.
pub const CONGRESS_DAYS: [u32; 4] = [7, 30, 60, 90];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CongressState {
    pub days: u32,
    pub selected: usize,
}

impl Default for CongressState {
    fn default() -> Self {
        Self {
            days: 30,
            selected: 0,
        }
    }
}

impl CongressState {
    pub fn with_days(days: u32) -> Self {
        Self {
            days: if CONGRESS_DAYS.contains(&days) { days } else { 30 },
            selected: 0,
        }
    }

    pub fn step_days(&mut self, delta: i32) {
        let index = CONGRESS_DAYS
            .iter()
            .position(|d| *d == self.days)
            .unwrap_or(1);
        self.days = CONGRESS_DAYS[step_index(index, delta, CONGRESS_DAYS.len())];
        self.selected = 0;
    }
}

/// Stock detail: which symbol, which chart period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    pub symbol: String,
    pub range: ChartRange,
    pub scroll: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chart_range_steps_and_clamps() {
        assert_eq!(ChartRange::default().days(), 90);
        assert_eq!(ChartRange::Quarter.step(1), ChartRange::HalfYear);
        assert_eq!(ChartRange::Year.step(1), ChartRange::Year);
        assert_eq!(ChartRange::Week.step(-1), ChartRange::Week);
        assert_eq!(ChartRange::Year.label(), "1Å");
    }

    #[test]
    fn test_dashboard_paging() {
        let mut dashboard = DashboardState::default();
        assert_eq!(dashboard.total_pages(61), 3);

        dashboard.next_page(61);
        dashboard.next_page(61);
        dashboard.next_page(61);
        assert_eq!(dashboard.page, 2);
        assert_eq!(dashboard.filter().offset, 60);

        dashboard.set_search("volvo");
        assert_eq!(dashboard.page, 0);

        dashboard.prev_page();
        assert_eq!(dashboard.page, 0);
    }

    #[test]
    fn test_cap_change_resets_page() {
        let mut dashboard = DashboardState::default();
        dashboard.page = 4;
        dashboard.set_cap(Some("mid".to_string()));
        assert_eq!(dashboard.page, 0);
        assert_eq!(dashboard.filter().cap.as_deref(), Some("mid"));
    }

    #[test]
    fn test_congress_days_cycle() {
        let mut congress = CongressState::with_days(45);
        assert_eq!(congress.days, 30);
        congress.step_days(1);
        assert_eq!(congress.days, 60);
        congress.step_days(5);
        assert_eq!(congress.days, 90);
        congress.step_days(-10);
        assert_eq!(congress.days, 7);
    }

    #[test]
    fn test_step_index_on_empty() {
        assert_eq!(step_index(3, 1, 0), 0);
        assert_eq!(step_index(0, -1, 4), 0);
        assert_eq!(step_index(2, 1, 4), 3);
    }
}
