//! One renderer per view.
//!
//! Pages read remote data through the store's query accessors and decide
//! per section between content, a loading skeleton and an error banner.

mod briefing;
mod climate;
mod congress;
mod dashboard;
mod rockets;
mod simulator;
mod stock_detail;
mod watchlist;

pub use briefing::BriefingPage;
pub use climate::ClimatePage;
pub use congress::CongressPage;
pub use dashboard::DashboardPage;
pub use rockets::RocketsPage;
pub use simulator::SimulatorPage;
pub use stock_detail::StockDetailPage;
pub use watchlist::WatchlistPage;

use super::Theme;
use super::widgets::{CONNECTION_ERROR, Skeleton, render_banner};
use crate::error::Error;
use crate::resource::Query;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

/// What a section can show for its query.
pub(crate) enum Section<'a, T> {
    Ready(&'a T),
    Loading,
    Failed(&'a Error),
}

/// Data wins over an error: the last good value stays on screen while the
/// header reports the connection problem.
pub(crate) fn section<T>(query: &Query<T>) -> Section<'_, T> {
    match (query.data.as_deref(), query.error.as_deref()) {
        (Some(data), _) => Section::Ready(data),
        (None, Some(error)) => Section::Failed(error),
        (None, None) => Section::Loading,
    }
}

/// Draw the placeholder for a section that has no data.
pub(crate) fn render_pending<T>(
    frame: &mut Frame,
    area: Rect,
    section: &Section<'_, T>,
    block: Block<'_>,
    theme: &Theme,
) {
    match section {
        Section::Failed(error) => {
            let detail = error.to_string();
            render_banner(frame, area, CONNECTION_ERROR, Some(&detail), theme);
        }
        _ => Skeleton::render(frame, area, block, theme),
    }
}

/// A scrollable text page.
pub(crate) fn render_lines(
    frame: &mut Frame,
    area: Rect,
    lines: Vec<Line<'static>>,
    block: Block<'_>,
    scroll: u16,
) {
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

pub(crate) fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), theme.heading()))
}

/// Currency implied by a ticker: Stockholm listings trade in SEK.
pub(crate) fn currency_for(symbol: &str) -> &'static str {
    if symbol.ends_with(".ST") { "SEK" } else { "USD" }
}

/// Explanatory line shown when a section has no entries.
pub(crate) fn empty(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), theme.dim()))
}
