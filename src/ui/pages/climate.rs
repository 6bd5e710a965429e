//! Market climate: indices, the internal signal mix and the event calendar.

use super::{Section, empty, heading, render_lines, render_pending, section};
use crate::market::{
    Tone, change_tone, format_change, format_countdown, format_price, format_signed_percent,
    format_timestamp, impact_tone, inverted_change_tone, sentiment_tone, signal_tone,
};
use crate::models::{CalendarEvent, ClimateOverview, InternalSignals, MarketIndex};
use crate::state::Store;
use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
};

const DISTRIBUTION_WIDTH: usize = 40;
const UPCOMING_EVENTS: usize = 12;

pub struct ClimatePage;

impl ClimatePage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let block = theme.block("Aktieklimat");
        let query = store.climate();

        match section(&query) {
            Section::Ready(climate) => {
                render_lines(frame, area, Self::lines(climate, theme), block, store.scroll_offset());
            }
            pending => render_pending(frame, area, &pending, block, theme),
        }
    }

    pub fn lines(climate: &ClimateOverview, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![heading("Marknadsindex", theme)];
        if climate.indices.is_empty() {
            lines.push(empty("Inga indexdata tillgängliga.", theme));
        }
        for index in &climate.indices {
            lines.push(index_line(index, theme));
        }

        lines.push(Line::from(""));
        lines.push(heading("Signalöversikt", theme));
        lines.extend(signal_lines(&climate.signals, theme));

        lines.push(Line::from(""));
        lines.push(heading("Nästa event", theme));
        match climate.next_event() {
            Some(event) => lines.push(Line::from(vec![
                Span::styled(event.title.clone(), theme.text().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}  ", event.date), theme.dim()),
                theme.span(
                    format!("Påverkan: {}", event.impact.label()),
                    impact_tone(event.impact.as_str()),
                ),
                Span::styled(format!("  ({})", format_countdown(event.days_until)), theme.heading()),
            ])),
            None => lines.push(empty("Inga kommande events.", theme)),
        }

        lines.push(Line::from(""));
        lines.push(heading("Kommande events", theme));
        if climate.events.is_empty() {
            lines.push(empty("Kalendern är tom.", theme));
        } else {
            lines.push(Line::from(Span::styled(
                format!("  {:<12}{:<12}{:<44}{:<8}{}", "Datum", "Om", "Event", "Påverkan", "Kategori"),
                theme.heading().fg(theme.warning),
            )));
            for event in climate.events.iter().take(UPCOMING_EVENTS) {
                lines.push(event_line(event, theme));
            }
        }

        if !climate.timestamp.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Uppdaterad: {}", format_timestamp(&climate.timestamp)),
                theme.dim(),
            )));
        }
        lines
    }
}

fn index_line(index: &MarketIndex, theme: &Theme) -> Line<'static> {
    let tone = if index.is_volatility() {
        inverted_change_tone(index.change_percent)
    } else {
        change_tone(index.change_percent)
    };
    let currency = if index.currency.is_empty() { "USD" } else { index.currency.as_str() };
    Line::from(vec![
        Span::styled(
            format!("  {:<8}", index.display_symbol()),
            theme.text().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<24}", index.name), theme.dim()),
        Span::styled(format!("{:>14}  ", format_price(index.current_price, currency)), theme.text()),
        theme.span(format!("{} {}", index.trend.arrow(), format_change(index.change_percent)), tone),
    ])
}

fn signal_lines(signals: &InternalSignals, theme: &Theme) -> Vec<Line<'static>> {
    let sentiment = match signals.overall_sentiment.as_str() {
        "bullish" => "Positivt",
        "bearish" => "Negativt",
        _ => "Neutralt",
    };
    let distribution = &signals.signal_distribution;

    let mut lines = vec![Line::from(vec![
        Span::styled("  Sentiment: ", theme.dim()),
        theme.span(sentiment, sentiment_tone(&signals.overall_sentiment)),
        Span::styled("   Snittförändring: ", theme.dim()),
        theme.span(
            format_signed_percent(signals.avg_change_percent, 2),
            change_tone(signals.avg_change_percent),
        ),
        Span::styled("   Hög volym: ", theme.dim()),
        theme.span(signals.high_volume_count.to_string(), Tone::Warning),
        Span::styled("   Analyserade: ", theme.dim()),
        Span::styled(distribution.total_stocks.to_string(), theme.text()),
    ])];

    let buckets = [
        ("BUY", distribution.buy),
        ("WATCH", distribution.watch),
        ("HOLD", distribution.hold),
        ("AVOID", distribution.avoid.saturating_add(distribution.sell)),
    ];

    let mut bar = vec![Span::raw("  ")];
    for (action, count) in buckets {
        let width = (distribution.share(count) / 100.0 * DISTRIBUTION_WIDTH as f64).round() as usize;
        // Counts come from the server and may exceed the total.
        let width = width.min(DISTRIBUTION_WIDTH);
        bar.push(theme.span("█".repeat(width), signal_tone(action)));
    }
    lines.push(Line::from(bar));

    let mut legend = vec![Span::raw("  ")];
    for (action, count) in buckets {
        legend.push(theme.span(
            format!("{action} {count} ({:.0}%)   ", distribution.share(count)),
            signal_tone(action),
        ));
    }
    lines.push(Line::from(legend));
    lines
}

fn event_line(event: &CalendarEvent, theme: &Theme) -> Line<'static> {
    let title: String = event.title.chars().take(42).collect();
    let mut countdown = Span::styled(format!("{:<12}", format_countdown(event.days_until)), theme.dim());
    if event.is_active {
        countdown = countdown.style(theme.heading());
    }
    Line::from(vec![
        Span::styled(format!("  {:<12}", event.date), theme.dim()),
        countdown,
        Span::styled(format!("{title:<44}"), theme.text()),
        theme.span(format!("{:<8}", event.impact.label()), impact_tone(event.impact.as_str())),
        Span::styled(event.category_label().to_string(), theme.dim()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignalDistribution;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn overview() -> ClimateOverview {
        serde_json::from_value(json!({
            "indices": [
                {"symbol": "^VIX", "name": "Volatilitetsindex", "current_price": 18.2, "change_percent": 4.0, "trend": "up"},
                {"symbol": "^OMX", "name": "OMX Stockholm 30", "current_price": 2450.0, "change_percent": 0.8, "trend": "up", "currency": "SEK"}
            ],
            "signals": {
                "signal_distribution": {"total_stocks": 10, "buy": 5, "watch": 2, "hold": 2, "avoid": 1},
                "avg_change_percent": 0.4,
                "high_volume_count": 3,
                "overall_sentiment": "bullish"
            },
            "events": [
                {"id": "1", "date": "2026-01-02", "title": "KPI december", "category": "macro_data", "impact": "medium", "days_until": -1},
                {"id": "2", "date": "2026-01-05", "title": "Riksbankens räntebesked", "category": "rate_decision", "impact": "high", "days_until": 1}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_vix_rise_is_negative() {
        let theme = Theme::default();
        let climate = overview();
        let vix = index_line(&climate.indices[0], &theme);
        let omx = index_line(&climate.indices[1], &theme);
        assert_eq!(vix.spans[3].style.fg, Some(theme.negative));
        assert_eq!(omx.spans[3].style.fg, Some(theme.positive));
        assert_eq!(vix.spans[0].content, "  VIX     ");
    }

    #[test]
    fn test_next_event_skips_past() {
        let lines = ClimatePage::lines(&overview(), &Theme::default());
        let rendered: Vec<String> = lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(rendered.contains(&"Riksbankens räntebesked  2026-01-05  Påverkan: Hög  (Imorgon)".to_string()));
        assert!(rendered.iter().any(|l| l.contains("Sentiment: Positivt")));
        assert!(rendered.iter().any(|l| l.contains("BUY 5 (50%)")));
    }

    #[test]
    fn test_oversized_counts_stay_bounded() {
        let signals = InternalSignals {
            signal_distribution: SignalDistribution {
                total_stocks: 4,
                avoid: u32::MAX,
                sell: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let lines = signal_lines(&signals, &Theme::default());
        let bar: usize = lines[1].spans.iter().map(|s| s.content.chars().filter(|c| *c == '█').count()).sum();
        assert_eq!(bar, DISTRIBUTION_WIDTH);
        let legend: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(legend.contains(&format!("AVOID {}", u32::MAX)));
    }

    #[test]
    fn test_empty_calendar() {
        let lines = ClimatePage::lines(&ClimateOverview::default(), &Theme::default());
        let rendered: Vec<String> = lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(rendered.contains(&"Inga kommande events.".to_string()));
        assert!(rendered.contains(&"Kalendern är tom.".to_string()));
    }
}
