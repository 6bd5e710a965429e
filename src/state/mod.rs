//! State management for Nordpuls.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Remote data is not
//! copied into the store: views read it from the [`ResourceCache`] through
//! the resource key their local state currently selects.

mod app_state;
mod view_state;

pub use app_state::{AppState, InputMode, View};
pub use view_state::{
    CONGRESS_DAYS, ChartRange, CongressState, DashboardState, DetailState, step_index,
};

use crate::config::{Config, KeyBindings};
use crate::models::{
    Briefing, CapSizes, ClimateOverview, CongressStats, CongressTrades, PriceHistory,
    RocketHistory, Simulation, StockAnalysis, StockList, TopMovers, WatchlistResponse,
};
use crate::resource::{self, Query, Resource, ResourceCache, SubscriptionSet};
use crate::ui::Theme;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Navigation
    SetView(View),
    Back,
    OpenSelected,
    OpenStock(String),

    // Search input
    SetInputMode(InputMode),
    InputChar(char),
    InputBackspace,
    SubmitSearch,
    CancelSearch,

    // Movement
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    NextPage,
    PrevPage,
    /// Previous cap filter, congress window or chart range.
    PrevOption,
    /// Next cap filter, congress window or chart range.
    NextOption,

    // UI
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Data
    RefreshAll,
    FocusGained,
    /// A mounted resource finished a fetch attempt.
    ResourceSettled(String),

    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    shown_at: Option<Instant>,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
}

impl Notification {
    fn with_level(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            shown_at: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Info, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(message, NotificationLevel::Warning, 5)
    }

    fn is_expired(&self) -> bool {
        self.shown_at
            .is_some_and(|at| at.elapsed() >= Duration::from_secs(self.duration_secs))
    }
}

/// API reachability as shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Online,
    Offline,
}

/// The global state store.
pub struct Store {
    /// Application state.
    pub app: AppState,
    pub dashboard: DashboardState,
    pub congress: CongressState,
    pub detail: DetailState,
    /// Days of rocket history and simulation shown.
    pub rocket_days: u32,
    /// Selected row per list view (the dashboard keeps its own).
    pub selected: HashMap<View, usize>,
    /// Scroll offset per text-heavy view.
    pub scroll: HashMap<View, u16>,
    /// Remote data, keyed by resource.
    pub cache: ResourceCache,
    pub theme: Theme,
    pub keybindings: KeyBindings,
    pub show_status_bar: bool,
    pub show_help_bar: bool,
    subscriptions: SubscriptionSet,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("app", &self.app)
            .field("dashboard", &self.dashboard)
            .field("congress", &self.congress)
            .field("detail", &self.detail)
            .field("mounted", &self.subscriptions.keys())
            .finish()
    }
}

impl Store {
    /// Create a new store. Settled resources are reported back on `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>, cache: ResourceCache, config: &Config) -> Self {
        let subscriptions = SubscriptionSet::new(cache.clone(), move |key| {
            let _ = action_tx.send(Action::ResourceSettled(key.to_string()));
        });

        Self {
            app: AppState::new(),
            dashboard: DashboardState::with_per_page(config.ui.stocks_per_page),
            congress: CongressState::with_days(config.ui.congress_days),
            detail: DetailState::default(),
            rocket_days: config.ui.rocket_days.max(1),
            selected: HashMap::new(),
            scroll: HashMap::new(),
            cache,
            theme: Theme::from_config(&config.theme),
            keybindings: config.keybindings.clone(),
            show_status_bar: config.ui.show_status_bar,
            show_help_bar: config.ui.show_help_bar,
            subscriptions,
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => self.set_view(view),
            Action::Back => self.back(),
            Action::OpenSelected => {
                if let Some(symbol) = self.selected_symbol() {
                    self.open_stock(symbol);
                }
            }
            Action::OpenStock(symbol) => self.open_stock(symbol),

            // Search input
            Action::SetInputMode(mode) => {
                if mode == InputMode::Search {
                    if self.app.current_view != View::Dashboard {
                        return;
                    }
                    let current = self.dashboard.search.clone();
                    self.app.set_input(&current);
                }
                self.app.input_mode = mode;
            }
            Action::InputChar(c) => self.app.push_char(c),
            Action::InputBackspace => self.app.pop_char(),
            Action::SubmitSearch => {
                let query = self.app.input_buffer.clone();
                self.dashboard.set_search(&query);
                self.app.input_mode = InputMode::Normal;
                self.app.clear_input();
            }
            Action::CancelSearch => {
                self.app.input_mode = InputMode::Normal;
                self.app.clear_input();
            }

            // Movement
            Action::ScrollUp => self.move_by(-1),
            Action::ScrollDown => self.move_by(1),
            Action::PageUp => self.move_by(-10),
            Action::PageDown => self.move_by(10),
            Action::GoToTop => self.move_by(i32::MIN / 2),
            Action::GoToBottom => self.move_by(i32::MAX / 2),
            Action::NextPage => {
                if self.app.current_view == View::Dashboard {
                    let total = self.stocks().data.map_or(0, |list| list.total);
                    self.dashboard.next_page(total);
                }
            }
            Action::PrevPage => {
                if self.app.current_view == View::Dashboard {
                    self.dashboard.prev_page();
                }
            }
            Action::PrevOption => self.step_option(-1),
            Action::NextOption => self.step_option(1),

            // UI
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(mut notification) => {
                notification.shown_at = Some(Instant::now());
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => self.app.notification = None,
            Action::Tick => {
                self.app.now = chrono::Utc::now();
                if self.app.notification.as_ref().is_some_and(Notification::is_expired) {
                    self.app.notification = None;
                }
            }

            // Data
            Action::RefreshAll => {
                let woken = self.cache.revalidate_all();
                tracing::info!(resources = woken, "Manual refresh");
                let notification = match self.connection() {
                    Connection::Online => Notification::info("Uppdaterar…"),
                    Connection::Offline => Notification::warning("Ingen anslutning, försöker igen…"),
                };
                self.reduce(Action::ShowNotification(notification));
            }
            Action::FocusGained => {
                let woken = self.cache.focus_gained();
                tracing::debug!(resources = woken, "Revalidating on focus");
            }
            Action::ResourceSettled(key) => {
                tracing::trace!(key, "Resource settled");
                self.clamp_selection();
            }

            Action::Quit => self.app.should_quit = true,
        }
    }

    fn set_view(&mut self, view: View) {
        if view == View::StockDetail && self.detail.symbol.is_empty() {
            return;
        }
        if view != self.app.current_view {
            tracing::debug!(from = ?self.app.current_view, to = ?view, "Switching view");
        }
        if self.app.current_view.is_tab() {
            self.app.previous_view = Some(self.app.current_view);
        }
        self.app.current_view = view;
        self.app.input_mode = InputMode::Normal;
    }

    fn back(&mut self) {
        if self.app.show_help {
            self.app.show_help = false;
        } else if self.app.notification.is_some() {
            self.app.notification = None;
        } else if self.app.current_view == View::StockDetail {
            let previous = self.app.previous_view.unwrap_or_default();
            self.app.current_view = previous;
        }
    }

    fn open_stock(&mut self, symbol: String) {
        let symbol = symbol.trim().to_string();
        if symbol.is_empty() {
            return;
        }
        if self.detail.symbol != symbol {
            self.detail = DetailState {
                symbol,
                ..DetailState::default()
            };
        }
        self.set_view(View::StockDetail);
    }

    /// Symbols of the rows the current view lets the user select, in display order.
    pub fn selectable_symbols(&self) -> Vec<String> {
        match self.app.current_view {
            View::Dashboard => self
                .stocks()
                .data
                .map(|list| list.stocks.iter().map(|s| s.symbol.clone()).collect())
                .unwrap_or_default(),
            View::Watchlist => self
                .cache
                .query(&resource::watchlist())
                .data
                .map(|w| w.stocks.iter().map(|s| s.symbol.clone()).collect())
                .unwrap_or_default(),
            View::MorningBrief | View::EveningBrief => self
                .briefing()
                .data
                .map(|b| b.recommendations.iter().map(|r| r.symbol.clone()).collect())
                .unwrap_or_default(),
            View::Rockets => self
                .rocket_history()
                .data
                .map(|h| {
                    h.history
                        .iter()
                        .flat_map(|day| day.rockets.iter().map(|r| r.symbol.clone()))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Index of the highlighted row in the current view.
    pub fn selected_index(&self) -> usize {
        match self.app.current_view {
            View::Dashboard => self.dashboard.selected,
            view => self.selected.get(&view).copied().unwrap_or(0),
        }
    }

    pub fn selected_symbol(&self) -> Option<String> {
        self.selectable_symbols()
            .into_iter()
            .nth(self.selected_index())
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll
            .get(&self.app.current_view)
            .copied()
            .unwrap_or(0)
    }

    fn move_by(&mut self, delta: i32) {
        let view = self.app.current_view;
        let len = self.selectable_symbols().len();
        if len > 0 {
            let index = step_index(self.selected_index(), delta, len);
            self.set_selected(index);
        } else {
            let offset = i64::from(self.scroll_offset()) + i64::from(delta);
            let offset = u16::try_from(offset.clamp(0, i64::from(u16::MAX))).unwrap_or(0);
            if view == View::StockDetail {
                self.detail.scroll = offset;
            }
            self.scroll.insert(view, offset);
        }
    }

    fn set_selected(&mut self, index: usize) {
        match self.app.current_view {
            View::Dashboard => self.dashboard.selected = index,
            view => {
                self.selected.insert(view, index);
            }
        }
    }

    /// Keep the selection inside the list after data changes underneath it.
    fn clamp_selection(&mut self) {
        let len = self.selectable_symbols().len();
        if len > 0 && self.selected_index() >= len {
            self.set_selected(len - 1);
        }
    }

    fn step_option(&mut self, delta: i32) {
        match self.app.current_view {
            View::Dashboard => {
                let mut options: Vec<Option<String>> = vec![None];
                if let Some(caps) = self.cache.query(&resource::cap_sizes()).data {
                    options.extend(caps.caps.iter().map(|c| Some(c.id.clone())));
                }
                let current = options
                    .iter()
                    .position(|o| *o == self.dashboard.cap)
                    .unwrap_or(0);
                let next = options[step_index(current, delta, options.len())].clone();
                self.dashboard.set_cap(next);
            }
            View::Congress => {
                self.congress.step_days(delta);
                self.scroll.remove(&View::Congress);
            }
            View::StockDetail => self.detail.range = self.detail.range.step(delta),
            _ => {}
        }
    }

    /// Mount exactly the resources the current view shows; everything else is unmounted.
    pub fn sync_subscriptions(&mut self) {
        let mut mount = self.subscriptions.begin();
        match self.app.current_view {
            View::Dashboard => {
                mount
                    .watch(&resource::latest_briefing())
                    .watch(&resource::top_movers())
                    .watch(&resource::cap_sizes())
                    .watch(&resource::all_stocks(self.dashboard.filter()));
            }
            View::MorningBrief => {
                mount.watch(&resource::morning_briefing());
            }
            View::EveningBrief => {
                mount.watch(&resource::evening_briefing());
            }
            View::Rockets => {
                mount.watch(&resource::rocket_history(self.rocket_days));
            }
            View::Simulator => {
                mount.watch(&resource::simulation(self.rocket_days));
            }
            View::Congress => {
                mount
                    .watch(&resource::congress_stats(self.congress.days))
                    .watch(&resource::congress_trades(self.congress.days, None));
            }
            View::Climate => {
                mount.watch(&resource::market_climate());
            }
            View::Watchlist => {
                mount.watch(&resource::watchlist());
            }
            View::StockDetail => {
                if let Some(analysis) = resource::stock_analysis(&self.detail.symbol) {
                    mount.watch(&analysis);
                }
                if let Some(history) =
                    resource::stock_history(&self.detail.symbol, self.detail.range.days())
                {
                    mount.watch(&history);
                }
            }
        }
    }

    /// Keys of the currently mounted resources.
    pub fn mounted_keys(&self) -> Vec<&str> {
        self.subscriptions.keys()
    }

    /// Offline as soon as a mounted resource fails to reach the API.
    pub fn connection(&self) -> Connection {
        let failing = self.cache.failing_keys();
        if self
            .subscriptions
            .keys()
            .iter()
            .any(|key| failing.iter().any(|f| f == key))
        {
            Connection::Offline
        } else {
            Connection::Online
        }
    }

    pub fn is_loading(&self) -> bool {
        self.cache.is_fetching()
    }

    fn query<T: Send + Sync + 'static>(&self, resource: &Resource<T>) -> Query<T> {
        self.cache.query(resource)
    }

    pub fn stocks(&self) -> Query<StockList> {
        self.query(&resource::all_stocks(self.dashboard.filter()))
    }

    pub fn top_movers(&self) -> Query<TopMovers> {
        self.query(&resource::top_movers())
    }

    pub fn caps(&self) -> Query<CapSizes> {
        self.query(&resource::cap_sizes())
    }

    pub fn latest_briefing(&self) -> Query<Briefing> {
        self.query(&resource::latest_briefing())
    }

    /// Briefing of the current brief view (morning unless on the evening view).
    pub fn briefing(&self) -> Query<Briefing> {
        match self.app.current_view {
            View::EveningBrief => self.query(&resource::evening_briefing()),
            _ => self.query(&resource::morning_briefing()),
        }
    }

    pub fn watchlist(&self) -> Query<WatchlistResponse> {
        self.query(&resource::watchlist())
    }

    pub fn rocket_history(&self) -> Query<RocketHistory> {
        self.query(&resource::rocket_history(self.rocket_days))
    }

    pub fn simulation(&self) -> Query<Simulation> {
        self.query(&resource::simulation(self.rocket_days))
    }

    pub fn congress_stats(&self) -> Query<CongressStats> {
        self.query(&resource::congress_stats(self.congress.days))
    }

    pub fn congress_trades(&self) -> Query<CongressTrades> {
        self.query(&resource::congress_trades(self.congress.days, None))
    }

    pub fn climate(&self) -> Query<ClimateOverview> {
        self.query(&resource::market_climate())
    }

    pub fn analysis(&self) -> Query<StockAnalysis> {
        resource::stock_analysis(&self.detail.symbol)
            .map(|r| self.query(&r))
            .unwrap_or_default()
    }

    pub fn history(&self) -> Query<PriceHistory> {
        resource::stock_history(&self.detail.symbol, self.detail.range.days())
            .map(|r| self.query(&r))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn store_with(mock: MockTransport) -> (Store, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cache = ResourceCache::new(Arc::new(mock));
        (Store::new(tx, cache, &Config::default()), rx)
    }

    #[test]
    fn test_open_and_back() {
        let (mut store, _rx) = store_with(MockTransport::new());
        store.reduce(Action::SetView(View::Congress));
        store.reduce(Action::OpenStock("NVDA".to_string()));
        assert_eq!(store.app.current_view, View::StockDetail);
        assert_eq!(store.detail.symbol, "NVDA");

        store.reduce(Action::NextOption);
        assert_eq!(store.detail.range, ChartRange::HalfYear);

        store.reduce(Action::Back);
        assert_eq!(store.app.current_view, View::Congress);
    }

    #[test]
    fn test_detail_without_symbol_is_ignored() {
        let (mut store, _rx) = store_with(MockTransport::new());
        store.reduce(Action::SetView(View::StockDetail));
        assert_eq!(store.app.current_view, View::Dashboard);
    }

    #[test]
    fn test_search_submit_updates_filter() {
        let (mut store, _rx) = store_with(MockTransport::new());
        store.dashboard.page = 3;
        store.reduce(Action::SetInputMode(InputMode::Search));
        for c in "sand".chars() {
            store.reduce(Action::InputChar(c));
        }
        store.reduce(Action::InputBackspace);
        store.reduce(Action::SubmitSearch);

        assert_eq!(store.dashboard.search, "san");
        assert_eq!(store.dashboard.page, 0);
        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.app.input_buffer.is_empty());
    }

    #[test]
    fn test_search_only_on_dashboard() {
        let (mut store, _rx) = store_with(MockTransport::new());
        store.reduce(Action::SetView(View::Climate));
        store.reduce(Action::SetInputMode(InputMode::Search));
        assert_eq!(store.app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_congress_window_changes_resource_key() {
        let (mut store, _rx) = store_with(MockTransport::new());
        store.reduce(Action::SetView(View::Congress));
        store.reduce(Action::PrevOption);
        assert_eq!(store.congress.days, 7);
        assert!(store.congress_stats().data.is_none());
    }

    #[tokio::test]
    async fn test_sync_mounts_only_current_view() {
        let mut mock = MockTransport::new();
        mock.expect_get_json().returning(|_| Ok(json!({})));
        let (mut store, _rx) = store_with(mock);

        store.reduce(Action::SetView(View::Congress));
        store.sync_subscriptions();
        assert_eq!(
            store.mounted_keys(),
            vec![
                "/api/congress/recent?days=30&min_amount=%241%2C001%20-",
                "/api/congress/stats?days=30",
            ]
        );

        store.reduce(Action::SetView(View::Climate));
        store.sync_subscriptions();
        assert_eq!(store.mounted_keys(), vec!["/api/climate/overview"]);
    }

    #[tokio::test]
    async fn test_selection_follows_watchlist_data() {
        let mut mock = MockTransport::new();
        mock.expect_get_json().returning(|_| {
            Ok(json!({"stocks": [
                {"symbol": "ABB.ST", "name": "ABB"},
                {"symbol": "SAND.ST", "name": "Sandvik"}
            ]}))
        });
        let (mut store, _rx) = store_with(mock);
        store.reduce(Action::SetView(View::Watchlist));
        store.cache.fetch(&resource::watchlist()).await.unwrap();

        store.reduce(Action::GoToBottom);
        assert_eq!(store.selected_symbol().as_deref(), Some("SAND.ST"));

        store.reduce(Action::OpenSelected);
        assert_eq!(store.app.current_view, View::StockDetail);
        assert_eq!(store.detail.symbol, "SAND.ST");
    }

    #[test]
    fn test_notification_dismissed_by_back() {
        let (mut store, _rx) = store_with(MockTransport::new());
        store.reduce(Action::ShowNotification(Notification::warning("Kunde inte ansluta")));
        assert!(store.app.notification.is_some());
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_some());
        store.reduce(Action::Back);
        assert!(store.app.notification.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_while_offline_warns() {
        let mut mock = MockTransport::new();
        mock.expect_get_json()
            .returning(|_| Err(crate::Error::request(503, "Service Unavailable")));
        let (mut store, _rx) = store_with(mock);

        store.reduce(Action::SetView(View::Climate));
        store.sync_subscriptions();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.connection(), Connection::Offline);

        store.reduce(Action::RefreshAll);
        let level = store.app.notification.as_ref().map(|n| n.level);
        assert_eq!(level, Some(NotificationLevel::Warning));
    }
}
