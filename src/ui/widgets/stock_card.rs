//! Stock cards and the grid that lays them out.

use crate::market::{Tone, change_tone, format_change, format_price, format_volume};
use crate::models::WatchlistStock;
use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// A single quote card.
pub struct StockCard;

impl StockCard {
    pub const HEIGHT: u16 = 6;
    pub const MIN_WIDTH: u16 = 28;

    pub fn lines(stock: &WatchlistStock, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        if stock.is_degraded() {
            return vec![
                Line::from(Span::styled(stock.name.clone(), theme.dim())),
                Line::from(theme.span("Kunde inte hämta data", Tone::Negative)),
            ];
        }

        let badge = stock.market_badge().to_string();
        let symbol = stock.symbol.to_uppercase();
        let gap = usize::from(width)
            .saturating_sub(symbol.chars().count() + badge.chars().count())
            .max(1);

        let tone = change_tone(stock.change_percent);
        let mut movement = vec![theme.span(
            format!("{} {}", trend_arrow(tone), format_change(stock.change_percent)),
            tone,
        )];
        if stock.has_high_volume() {
            movement.push(Span::raw("  "));
            movement.push(theme.span(
                format!("{} vol", format_volume(stock.volume_vs_avg)),
                Tone::Warning,
            ));
        }

        vec![
            Line::from(vec![
                Span::styled(symbol, theme.dim()),
                Span::raw(" ".repeat(gap)),
                Span::styled(badge, theme.dim()),
            ]),
            Line::from(Span::styled(stock.name.clone(), theme.text())),
            Line::from(Span::styled(
                format_price(stock.current_price, &stock.currency),
                theme.text().add_modifier(Modifier::BOLD),
            )),
            Line::from(movement),
        ]
    }

    pub fn render(frame: &mut Frame, area: Rect, stock: &WatchlistStock, selected: bool, theme: &Theme) {
        let border = if selected { theme.accent } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);

        let mut paragraph = Paragraph::new(Self::lines(stock, inner.width, theme)).block(block);
        if selected {
            paragraph = paragraph.style(Style::default().bg(theme.selection));
        }
        frame.render_widget(paragraph, area);
    }
}

/// Arrow for a change tone.
pub(crate) fn trend_arrow(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "▲",
        Tone::Negative => "▼",
        _ => "–",
    }
}

/// Cards in as many columns as fit, scrolled to keep the selection visible.
pub struct StockGrid;

impl StockGrid {
    pub fn columns(width: u16) -> usize {
        usize::from((width / StockCard::MIN_WIDTH).max(1))
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        stocks: &[WatchlistStock],
        selected: Option<usize>,
        theme: &Theme,
    ) {
        let cols = Self::columns(area.width);
        let visible_rows = usize::from((area.height / StockCard::HEIGHT).max(1));
        let selected_row = selected.unwrap_or(0) / cols;
        let first_row = selected_row.saturating_sub(visible_rows - 1);
        let card_width = area.width / cols as u16;

        for (i, stock) in stocks.iter().enumerate().skip(first_row * cols) {
            let row = i / cols - first_row;
            if row >= visible_rows {
                break;
            }
            let col = i % cols;
            let y = area.y + row as u16 * StockCard::HEIGHT;
            let height = StockCard::HEIGHT.min(area.bottom().saturating_sub(y));
            let card = Rect {
                x: area.x + col as u16 * card_width,
                y,
                width: card_width,
                height,
            };
            StockCard::render(frame, card, stock, selected == Some(i), theme);
        }
    }
}
