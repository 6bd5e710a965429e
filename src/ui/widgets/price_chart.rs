//! Candlestick chart with a period selector.

use crate::market::Tone;
use crate::models::PriceHistory;
use crate::resource::Query;
use crate::state::ChartRange;
use crate::ui::Theme;
use crate::ui::widgets::Skeleton;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Paragraph,
        canvas::{Canvas, Line as Segment, Rectangle},
    },
};

pub struct PriceChart;

impl PriceChart {
    /// `1V 1M [3M] 6M 1Å` with the active period highlighted.
    pub fn selector(active: ChartRange, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();
        for range in ChartRange::ALL {
            let label = range.label();
            if range == active {
                spans.push(Span::styled(format!("[{label}]"), theme.heading()));
            } else {
                spans.push(Span::styled(format!(" {label} "), theme.dim()));
            }
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("  ←/→ period", theme.dim()));
        Line::from(spans)
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        history: &Query<PriceHistory>,
        range: ChartRange,
        theme: &Theme,
    ) {
        let block = theme.block(format!("Kurs {}", range.label()));
        let inner = block.inner(area);
        frame.render_widget(block.clone(), area);

        let [selector_area, chart_area, volume_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .areas(inner);

        frame.render_widget(Paragraph::new(Self::selector(range, theme)), selector_area);

        let Some(history) = history.data.as_deref() else {
            if history.error.is_some() {
                frame.render_widget(
                    Paragraph::new(theme.span("Kunde inte hämta kursdata", Tone::Negative)),
                    chart_area,
                );
            } else {
                let lines = Skeleton::lines(chart_area.width, usize::from(chart_area.height), theme);
                frame.render_widget(Paragraph::new(lines), chart_area);
            }
            return;
        };

        let Some((low, high)) = history.price_range() else {
            frame.render_widget(
                Paragraph::new(Span::styled("Ingen kurshistorik", theme.dim())),
                chart_area,
            );
            return;
        };

        let pad = ((high - low) * 0.05).max(0.01);
        let count = history.data.len() as f64;
        let (up, down) = (theme.positive, theme.negative);

        let candles = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, count])
            .y_bounds([low - pad, high + pad])
            .paint(|ctx| {
                for (i, candle) in history.data.iter().enumerate() {
                    let x = i as f64 + 0.5;
                    let color = if candle.is_bullish() { up } else { down };
                    ctx.draw(&Segment::new(x, candle.low, x, candle.high, color));
                    let body_low = candle.open.min(candle.close);
                    ctx.draw(&Rectangle {
                        x: x - 0.3,
                        y: body_low,
                        width: 0.6,
                        height: (candle.open - candle.close).abs(),
                        color,
                    });
                }
            });
        frame.render_widget(candles, chart_area);

        let peak = history.data.iter().map(|c| c.volume).max().unwrap_or(0).max(1) as f64;
        let volume = Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, count])
            .y_bounds([0.0, peak])
            .paint(|ctx| {
                for (i, candle) in history.data.iter().enumerate() {
                    let x = i as f64 + 0.5;
                    let color = if candle.is_bullish() { up } else { down };
                    ctx.draw(&Segment::new(x, 0.0, x, candle.volume as f64, color));
                }
            });
        frame.render_widget(volume, volume_area);

        if let (Some(first), Some(last)) = (history.data.first(), history.data.last()) {
            let caption = Line::from(vec![
                Span::styled(first.time.clone(), theme.dim()),
                Span::raw(" → "),
                Span::styled(last.time.clone(), theme.dim().add_modifier(Modifier::ITALIC)),
            ]);
            let caption_area = Rect {
                y: selector_area.y,
                x: selector_area.x + selector_area.width.saturating_sub(caption.width() as u16),
                width: (caption.width() as u16).min(selector_area.width),
                height: 1,
            };
            frame.render_widget(Paragraph::new(caption), caption_area);
        }
    }
}
