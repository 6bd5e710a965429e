//! Investment simulator: buy each rocket at the morning price, sell at close.

use super::{Section, empty, heading, render_lines, render_pending, section};
use crate::market::{Tone, change_tone, format_kr, format_price, format_signed_percent, short_symbol};
use crate::models::{Simulation, SimulationTotals, SimulationTrack, SimulationTrade};
use crate::state::Store;
use crate::ui::Theme;
use crate::ui::widgets::{Tile, Tiles};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
};

pub struct SimulatorPage;

impl SimulatorPage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let days = store.rocket_days;
        let query = store.simulation();

        let simulation = match section(&query) {
            Section::Ready(simulation) => simulation,
            pending => {
                return render_pending(frame, area, &pending, theme.block("Investeringssimulator"), theme);
            }
        };

        if !simulation.has_trades() {
            let lines = vec![empty(
                "Inga avslutade trades ännu. Simuleringen fylls på efter varje kvällsbrief.",
                theme,
            )];
            return render_lines(frame, area, lines, theme.block("Investeringssimulator"), 0);
        }

        let [tiles_area, body_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(Tiles::HEIGHT), Constraint::Min(3)])
            .areas(area);

        Tiles::render(frame, tiles_area, &Self::tiles(&simulation.combined.totals), theme);
        let lines = Self::lines(simulation, days, theme);
        render_lines(
            frame,
            body_area,
            lines,
            theme.block("Investeringssimulator"),
            store.scroll_offset(),
        );
    }

    /// Combined result for both stakes across the two rockets.
    pub fn tiles(totals: &SimulationTotals) -> Vec<Tile> {
        let tone = if totals.is_profit() { Tone::Positive } else { Tone::Negative };
        vec![
            Tile::new(
                format!("{} investerat", format_kr(totals.start_1000)),
                format_kr(totals.end_1000),
                tone,
            )
            .caption(format!("{} kr", signed_kr(totals.profit_1000))),
            Tile::new(
                format!("{} investerat", format_kr(totals.start_10000)),
                format_kr(totals.end_10000),
                tone,
            )
            .caption(format!("{} kr", signed_kr(totals.profit_10000))),
            Tile::new(
                "Avkastning",
                format_signed_percent(totals.return_percent, 2),
                change_tone(totals.return_percent),
            )
            .caption(format!("{} trades", totals.trade_count)),
        ]
    }

    pub fn lines(simulation: &Simulation, days: u32, theme: &Theme) -> Vec<Line<'static>> {
        let trades = simulation.combined.totals.trade_count.max(
            (simulation.rocket_1.trades.len() + simulation.rocket_2.trades.len()) as u32,
        );
        let mut lines = vec![Line::from(Span::styled(
            format!("Baserat på {trades} trades under de senaste {days} dagarna"),
            theme.dim(),
        ))];

        for (title, track) in [("Kursraket #1", &simulation.rocket_1), ("Kursraket #2", &simulation.rocket_2)] {
            lines.push(Line::from(""));
            lines.extend(track_lines(title, track, theme));
        }
        lines
    }
}

fn track_lines(title: &str, track: &SimulationTrack, theme: &Theme) -> Vec<Line<'static>> {
    let totals = &track.totals;
    let tone = if totals.is_profit() { Tone::Positive } else { Tone::Negative };
    let mut lines = vec![
        heading(title, theme),
        Line::from(vec![
            Span::styled(format!("{} → ", format_kr(totals.start_1000)), theme.dim()),
            theme.span(format_kr(totals.end_1000), tone),
            Span::styled(format!("   {} → ", format_kr(totals.start_10000)), theme.dim()),
            theme.span(format_kr(totals.end_10000), tone),
            Span::raw("   "),
            theme.span(
                format_signed_percent(totals.return_percent, 2),
                change_tone(totals.return_percent),
            ),
        ]),
    ];

    if track.trades.is_empty() {
        lines.push(empty("Inga trades.", theme));
        return lines;
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Trade-historik", theme.text().add_modifier(Modifier::BOLD))));
    lines.push(Line::from(Span::styled(
        format!(
            "{:<11}{:<10}{:>14}{:>14}{:>9}{:>11}{:>13}",
            "Datum", "Aktie", "Köp", "Sälj", "Idag", "Vinst", "Kapital"
        ),
        theme.heading().fg(theme.warning),
    )));
    for trade in &track.trades {
        lines.push(trade_line(trade, theme));
    }
    lines
}

fn trade_line(trade: &SimulationTrade, theme: &Theme) -> Line<'static> {
    let tone = change_tone(trade.change_percent);
    Line::from(vec![
        Span::styled(format!("{:<11}", trade.date), theme.dim()),
        Span::styled(
            format!("{:<10}", short_symbol(&trade.symbol)),
            theme.text().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "{:>14}{:>14}",
                format_price(trade.morning_price, "SEK"),
                format_price(trade.evening_price, "SEK")
            ),
            theme.text(),
        ),
        theme.span(format!("{:>9}", format_signed_percent(trade.change_percent, 2)), tone),
        theme.span(format!("{:>11}", format!("{} kr", signed_kr(trade.profit_1000))), tone),
        Span::styled(format!("{:>13}", format_kr(trade.cumulative_1000)), theme.text()),
    ])
}

/// `+20` / `-15`, grouped like [`format_kr`] but without the suffix.
fn signed_kr(value: f64) -> String {
    let formatted = format_kr(value);
    let digits = formatted.trim_end_matches(" kr");
    if value >= 0.0 {
        format!("+{digits}")
    } else {
        digits.to_string()
    }
}
