//! The fixed watchlist as a quote table.

use super::{Section, empty, render_pending, section};
use crate::market::{Tone, change_tone, format_change, format_price, format_volume};
use crate::models::WatchlistStock;
use crate::state::Store;
use crate::ui::Theme;
use crate::ui::widgets::SignalBadge;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

pub struct WatchlistPage;

impl WatchlistPage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let query = store.watchlist();

        let watchlist = match section(&query) {
            Section::Ready(watchlist) => watchlist,
            pending => return render_pending(frame, area, &pending, theme.block("Bevakning"), theme),
        };

        let block = theme.block(format!("Bevakning ({})", watchlist.stocks.len()));
        if watchlist.stocks.is_empty() {
            let paragraph = Paragraph::new(empty("Bevakningslistan är tom.", theme)).block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(
            ["Symbol", "Namn", "Marknad", "Pris", "Idag", "Volym", "Signal"]
                .map(|h| Cell::from(h).style(theme.heading().fg(theme.warning))),
        )
        .bottom_margin(1);

        let rows = watchlist.stocks.iter().map(|stock| Self::row(stock, theme));
        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Min(16),
                Constraint::Length(8),
                Constraint::Length(16),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(16),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme.selected())
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(store.selected_index()));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn row(stock: &WatchlistStock, theme: &Theme) -> Row<'static> {
        let symbol = Cell::from(stock.symbol.clone()).style(theme.text().add_modifier(Modifier::BOLD));

        if stock.is_degraded() {
            return Row::new(vec![
                symbol,
                Cell::from(Line::from(vec![
                    Span::styled(format!("{}  ", stock.name), theme.dim()),
                    theme.span("Kunde inte hämta data", Tone::Negative),
                ])),
            ]);
        }

        let tone = change_tone(stock.change_percent);
        let volume_tone = if stock.has_high_volume() { Tone::Warning } else { Tone::Muted };
        let signal = match &stock.signal_type {
            Some(kind) => Line::from(SignalBadge::spans(kind, None, theme)),
            None => Line::from(""),
        };

        Row::new(vec![
            symbol,
            Cell::from(stock.name.clone()).style(theme.text()),
            Cell::from(stock.market_badge().to_string()).style(theme.dim()),
            Cell::from(format_price(stock.current_price, &stock.currency)).style(theme.text()),
            Cell::from(format_change(stock.change_percent)).style(theme.toned(tone)),
            Cell::from(format_volume(stock.volume_vs_avg)).style(theme.toned(volume_tone)),
            Cell::from(signal),
        ])
    }
}
