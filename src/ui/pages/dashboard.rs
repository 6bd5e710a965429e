//! Dashboard: signals, top movers and the filterable stock grid.

use super::{Section, render_pending, section};
use crate::market::{Tone, change_tone, format_signed_percent, leading_action, short_symbol, signal_tone};
use crate::models::{Briefing, CapSizes, TopMovers, WatchlistStock};
use crate::state::{DashboardState, InputMode, Store};
use crate::ui::Theme;
use crate::ui::layout::columns;
use crate::ui::widgets::StockGrid;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

const STRIP_LEN: usize = 5;

pub struct DashboardPage;

impl DashboardPage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let briefing = store.latest_briefing();
        let movers = store.top_movers();

        let strip = briefing
            .data
            .as_deref()
            .filter(|b| b.error.is_none() && !b.highlights.is_empty());
        let movers = movers.data.as_deref();

        let [strip_area, movers_area, filter_area, info_area, grid_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if strip.is_some() { 3 } else { 0 }),
                Constraint::Length(if movers.is_some() { 2 + STRIP_LEN as u16 } else { 0 }),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
            ])
            .areas(area);

        if let Some(briefing) = strip {
            let paragraph = Paragraph::new(Self::strip_line(briefing, theme))
                .block(theme.block("Senaste signaler"));
            frame.render_widget(paragraph, strip_area);
        }

        if let Some(movers) = movers {
            Self::render_movers(frame, movers_area, movers, theme);
        }

        let caps = store.caps();
        frame.render_widget(
            Paragraph::new(Self::filter_line(store, caps.data.as_deref())),
            filter_area,
        );

        let query = store.stocks();
        match section(&query) {
            Section::Ready(list) => {
                let info = Self::results_line(
                    &store.dashboard,
                    list.stocks.len(),
                    list.total,
                    caps.data.as_deref(),
                );
                frame.render_widget(Paragraph::new(Span::styled(info, theme.dim())), info_area);
                if list.stocks.is_empty() {
                    frame.render_widget(
                        Paragraph::new(Span::styled("Inga aktier matchar filtret.", theme.dim())),
                        grid_area,
                    );
                } else {
                    let selected = Some(store.dashboard.selected);
                    StockGrid::render(frame, grid_area, &list.stocks, selected, theme);
                }
            }
            pending => render_pending(frame, grid_area, &pending, theme.block("Aktier"), theme),
        }
    }

    /// Up to five highlights with their signal or alert.
    pub fn strip_line(briefing: &Briefing, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();
        for highlight in briefing.highlights.iter().take(STRIP_LEN) {
            spans.push(Span::styled(
                highlight.stock.clone(),
                theme.text().add_modifier(Modifier::BOLD),
            ));
            if let Some(signal) = &highlight.signal {
                spans.push(Span::raw(" "));
                spans.push(theme.span(
                    signal.clone(),
                    signal_tone(leading_action(signal)),
                ));
            }
            if let Some(alert) = &highlight.alert {
                spans.push(theme.span(format!(" ⚠ {alert}"), Tone::Warning));
            }
            spans.push(Span::raw("   "));
        }
        Line::from(spans)
    }

    fn render_movers(frame: &mut Frame, area: Rect, movers: &TopMovers, theme: &Theme) {
        let halves = columns(area, 2);
        let sides = [
            ("Dagens vinnare", &movers.gainers),
            ("Dagens förlorare", &movers.losers),
        ];
        for ((title, stocks), half) in sides.into_iter().zip(halves) {
            let lines: Vec<Line> = stocks
                .iter()
                .take(STRIP_LEN)
                .map(|stock| Self::mover_line(stock, theme))
                .collect();
            frame.render_widget(Paragraph::new(lines).block(theme.block(title)), half);
        }
    }

    pub fn mover_line(stock: &WatchlistStock, theme: &Theme) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{:<10}", short_symbol(&stock.symbol)),
                theme.text().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<20} ", truncate(&stock.name, 20)), theme.dim()),
            theme.span(
                format_signed_percent(stock.change_percent, 1),
                change_tone(stock.change_percent),
            ),
        ])
    }

    fn filter_line(store: &Store, caps: Option<&CapSizes>) -> Line<'static> {
        let theme = &store.theme;
        let dashboard = &store.dashboard;

        let search = if store.app.input_mode == InputMode::Search {
            Span::styled(format!(" Sök: {}▏ ", store.app.input_buffer), theme.heading())
        } else if dashboard.search.is_empty() {
            Span::styled(" Sök aktie... ", theme.dim())
        } else {
            Span::styled(format!(" Sök: {} ", dashboard.search), theme.text())
        };

        let mut spans = vec![search, Span::raw("│ ")];
        let chip = |label: String, active: bool| {
            if active {
                Span::styled(format!("[{label}]"), theme.heading())
            } else {
                Span::styled(format!(" {label} "), theme.dim())
            }
        };
        spans.push(chip("Alla".to_string(), dashboard.cap.is_none()));
        for cap in caps.map(|c| c.caps.as_slice()).unwrap_or_default() {
            spans.push(Span::raw(" "));
            spans.push(chip(
                format!("{} ({})", cap.name, cap.count),
                dashboard.cap.as_deref() == Some(cap.id.as_str()),
            ));
        }
        Line::from(spans)
    }

    /// `Visar 30 av 412 aktier i Large Cap matchande "vol"  ·  Sida 1 av 14`
    pub fn results_line(
        dashboard: &DashboardState,
        shown: usize,
        total: u32,
        caps: Option<&CapSizes>,
    ) -> String {
        let mut info = format!("Visar {shown} av {total} aktier");
        if let Some(cap) = &dashboard.cap {
            let name = caps
                .and_then(|c| c.caps.iter().find(|c| &c.id == cap))
                .map_or_else(|| cap_label(cap).to_string(), |c| c.name.clone());
            info.push_str(&format!(" i {name}"));
        }
        if !dashboard.search.is_empty() {
            info.push_str(&format!(" matchande \"{}\"", dashboard.search));
        }
        let pages = dashboard.total_pages(total);
        if pages > 1 {
            info.push_str(&format!("  ·  Sida {} av {pages}", dashboard.page + 1));
        }
        info
    }
}

/// Fallback names for the known cap buckets.
fn cap_label(id: &str) -> &str {
    match id {
        "large" => "Large Cap",
        "mid" => "Mid Cap",
        "small" => "Small Cap",
        "first_north" => "First North",
        "us" => "US Market",
        other => other,
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
