//! TUI widgets.

mod help;
mod notifications;
mod price_chart;
mod signal_badge;
mod skeleton;
mod status_bar;
mod stock_card;
mod tab_bar;
mod tiles;

pub use help::{HelpBar, HelpPanel};
pub use notifications::{CONNECTION_ERROR, render_banner, render_notification};
pub use price_chart::PriceChart;
pub use signal_badge::SignalBadge;
pub use skeleton::Skeleton;
pub use status_bar::StatusBar;
pub use stock_card::StockGrid;
pub use tab_bar::TabBar;
pub use tiles::{Tile, Tiles};
