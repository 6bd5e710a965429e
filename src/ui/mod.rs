//! UI rendering using ratatui.
//!
//! The frame is a header, the tab bar, one page for the current view and a
//! key hint line. Help and notifications are drawn on top.

mod layout;
mod pages;
mod theme;
mod widgets;

pub use layout::{Layout, centered_rect, columns};
pub use pages::{
    BriefingPage, ClimatePage, CongressPage, DashboardPage, RocketsPage, SimulatorPage,
    StockDetailPage, WatchlistPage,
};
pub use theme::Theme;
pub use widgets::{HelpBar, HelpPanel, StatusBar, TabBar};

use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area(), store.show_status_bar, store.show_help_bar);

        if store.show_status_bar {
            StatusBar::render(frame, layout.status_area, store);
        }
        TabBar::render(frame, layout.tab_area, store);

        let area = layout.main_area;
        match store.app.current_view {
            View::Dashboard => DashboardPage::render(frame, area, store),
            View::MorningBrief | View::EveningBrief => BriefingPage::render(frame, area, store),
            View::Rockets => RocketsPage::render(frame, area, store),
            View::Simulator => SimulatorPage::render(frame, area, store),
            View::Congress => CongressPage::render(frame, area, store),
            View::Climate => ClimatePage::render(frame, area, store),
            View::Watchlist => WatchlistPage::render(frame, area, store),
            View::StockDetail => StockDetailPage::render(frame, area, store),
        }

        if store.show_help_bar {
            HelpBar::render(frame, layout.help_bar_area, store);
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), store);
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification, &store.theme);
        }
    }
}
