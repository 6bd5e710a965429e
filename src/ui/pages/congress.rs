//! US congressional trading: aggregate statistics and recent disclosures.

use super::{Section, empty, heading, render_lines, render_pending, section};
use crate::market::{Tone, format_timestamp};
use crate::models::{CongressStats, CongressTrade, CongressTrades};
use crate::state::{CONGRESS_DAYS, Store};
use crate::ui::Theme;
use crate::ui::widgets::{Tile, Tiles};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

const TOP_TICKERS: usize = 10;
const RECENT_TRADES: usize = 50;
const BAR_WIDTH: usize = 20;

pub struct CongressPage;

impl CongressPage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let days = store.congress.days;

        let [selector_area, tiles_area, body_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(Tiles::HEIGHT),
                Constraint::Min(3),
            ])
            .areas(area);

        frame.render_widget(Paragraph::new(Self::selector(days, theme)), selector_area);

        let block = theme.block(format!("Kongresshandel - senaste {days} dagarna"));
        let query = store.congress_stats();
        let stats = match section(&query) {
            Section::Ready(stats) => stats,
            pending => {
                let body = tiles_area.union(body_area);
                return render_pending(frame, body, &pending, block, theme);
            }
        };

        if stats.error.is_some() {
            let lines = vec![Line::from(theme.span("Kunde inte hämta kongressdata.", Tone::Negative))];
            return render_lines(frame, tiles_area.union(body_area), lines, block, 0);
        }

        Tiles::render(frame, tiles_area, &Self::tiles(stats), theme);

        let trades = store.congress_trades();
        let lines = Self::lines(stats, trades.data.as_deref(), theme);
        render_lines(frame, body_area, lines, block, store.scroll_offset());
    }

    /// `7d [30d] 60d 90d` with the active window highlighted.
    pub fn selector(active: u32, theme: &Theme) -> Line<'static> {
        let mut spans = vec![Span::styled("Period: ", theme.dim())];
        for days in CONGRESS_DAYS {
            if days == active {
                spans.push(Span::styled(format!("[{days}d]"), theme.heading()));
            } else {
                spans.push(Span::styled(format!(" {days}d "), theme.dim()));
            }
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("  ←/→ byt period", theme.dim()));
        Line::from(spans)
    }

    pub fn tiles(stats: &CongressStats) -> Vec<Tile> {
        let ratio_tone = if stats.buy_sell_ratio > 1.2 {
            Tone::Positive
        } else if stats.buy_sell_ratio < 0.8 {
            Tone::Negative
        } else {
            Tone::Warning
        };
        vec![
            Tile::new("Totalt", stats.total_trades.to_string(), Tone::Neutral).caption("transaktioner"),
            Tile::new("Köp", stats.buys.to_string(), Tone::Positive),
            Tile::new("Sälj", stats.sells.to_string(), Tone::Negative),
            Tile::new("Köp/Sälj ratio", format!("{:.2}", stats.buy_sell_ratio), ratio_tone),
        ]
    }

    pub fn lines(stats: &CongressStats, trades: Option<&CongressTrades>, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if stats.total_trades == 0 {
            lines.push(empty("Inga transaktioner under perioden.", theme));
            return lines;
        }

        lines.push(heading("Partifördelning", theme));
        let mut parties = vec![Span::raw("  ")];
        for (party, count) in &stats.party_breakdown {
            let (label, tone) = party_style(party);
            parties.push(theme.span(format!("{label}: {count}   "), tone));
        }
        lines.push(Line::from(parties));

        lines.push(Line::from(""));
        lines.push(heading("Mest handlade aktier", theme));
        let max = stats.top_tickers.first().map_or(1, |(_, count)| (*count).max(1));
        for (ticker, count) in stats.top_tickers.iter().take(TOP_TICKERS) {
            let filled = (*count as usize * BAR_WIDTH).div_ceil(max as usize);
            lines.push(Line::from(vec![
                Span::styled(format!("  {ticker:<8}"), theme.text().add_modifier(Modifier::BOLD)),
                Span::styled("█".repeat(filled), theme.toned(Tone::Neutral)),
                Span::styled(format!(" {count}"), theme.dim()),
            ]));
        }

        if !stats.top_politicians.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Mest aktiva politiker", theme));
            for (politician, count) in &stats.top_politicians {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {politician}"), theme.text()),
                    Span::styled(format!("  {count} transaktioner"), theme.dim()),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(heading("Senaste transaktioner", theme));
        match trades {
            None => lines.push(empty("Hämtar transaktioner...", theme)),
            Some(trades) if trades.trades.is_empty() => {
                lines.push(empty("Inga transaktioner att visa.", theme));
            }
            Some(trades) => {
                lines.push(Line::from(Span::styled(
                    format!(
                        "  {:<24}{:<7}{:<8}{:<6}{:<26}{}",
                        "Politiker", "Parti", "Ticker", "Typ", "Belopp", "Datum"
                    ),
                    theme.heading().fg(theme.warning),
                )));
                for trade in trades.trades.iter().take(RECENT_TRADES) {
                    lines.push(trade_line(trade, theme));
                }
            }
        }

        if !stats.timestamp.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Uppdaterad: {}", format_timestamp(&stats.timestamp)),
                theme.dim(),
            )));
        }
        lines
    }
}

fn party_style(party: &str) -> (&str, Tone) {
    match party {
        "D" => ("Demokrater", Tone::Neutral),
        "R" => ("Republikaner", Tone::Negative),
        "I" => ("Oberoende", Tone::Warning),
        other => (other, Tone::Muted),
    }
}

fn trade_line(trade: &CongressTrade, theme: &Theme) -> Line<'static> {
    let (kind, tone) = if trade.is_purchase() {
        ("Köp", Tone::Positive)
    } else {
        ("Sälj", Tone::Negative)
    };
    let date: String = trade.transaction_date.chars().take(10).collect();
    let politician: String = trade.politician.chars().take(22).collect();
    Line::from(vec![
        Span::styled(format!("  {politician:<24}"), theme.text()),
        theme.span(format!("{:<7}", trade.party), party_style(&trade.party).1),
        Span::styled(
            format!("{:<8}", trade.ticker),
            theme.text().add_modifier(Modifier::BOLD),
        ),
        theme.span(format!("{kind:<6}"), tone),
        Span::styled(format!("{:<26}", trade.amount), theme.dim()),
        Span::styled(date, theme.dim()),
    ])
}
