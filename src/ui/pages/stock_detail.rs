//! Stock detail: quote header, key metrics, chart and the analysis text.

use super::{Section, empty, heading, render_lines, render_pending, section};
use crate::market::{
    Tone, change_tone, format_change, format_market_cap, format_price, format_timestamp,
    format_volume, leading_action, sentiment_tone,
};
use crate::models::{CongressActivity, StockAnalysis};
use crate::state::Store;
use crate::ui::Theme;
use crate::ui::widgets::{PriceChart, SignalBadge};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

pub struct StockDetailPage;

impl StockDetailPage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let symbol = &store.detail.symbol;
        let query = store.analysis();

        let analysis = match section(&query) {
            Section::Ready(analysis) => analysis,
            pending => return render_pending(frame, area, &pending, theme.block(symbol.clone()), theme),
        };

        let [header_area, chart_area, body_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Percentage(45),
                Constraint::Min(5),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Self::header_lines(analysis, theme)).block(theme.block(symbol.clone())),
            header_area,
        );
        PriceChart::render(frame, chart_area, &store.history(), store.detail.range, theme);
        render_lines(
            frame,
            body_area,
            Self::body_lines(analysis, theme),
            theme.block("Analys"),
            store.detail.scroll,
        );
    }

    /// Name, badge, price and the metric row.
    pub fn header_lines(analysis: &StockAnalysis, theme: &Theme) -> Vec<Line<'static>> {
        let quote = &analysis.stock_data;
        let name = if analysis.name.is_empty() { &quote.name } else { &analysis.name };

        let mut title = vec![
            Span::styled(analysis.symbol.clone(), theme.text().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {name}  "), theme.dim()),
        ];
        if !analysis.signal.kind.is_empty() {
            title.extend(SignalBadge::spans(leading_action(&analysis.signal.kind), None, theme));
            title.push(Span::styled(format!("  poäng {}", analysis.signal.score), theme.dim()));
        }

        if let Some(error) = &quote.error {
            return vec![
                Line::from(title),
                Line::from(theme.span(format!("Kunde inte hämta kursdata: {error}"), Tone::Negative)),
            ];
        }

        let volume_tone = (quote.volume_vs_avg > 1.5).then_some(Tone::Warning);
        let metric = |label: &str, value: String, tone: Option<Tone>| {
            vec![
                Span::styled(format!("{label}: "), theme.dim()),
                match tone {
                    Some(tone) => theme.span(value, tone),
                    None => Span::styled(value, theme.text()),
                },
                Span::raw("   "),
            ]
        };
        let optional = |value: Option<f64>| {
            value.map_or_else(|| "N/A".to_string(), |v| format_price(v, &quote.currency))
        };

        let mut metrics = Vec::new();
        metrics.extend(metric("Volym vs snitt", format_volume(quote.volume_vs_avg), volume_tone));
        metrics.extend(metric("52v Hög", optional(quote.high_52w), None));
        metrics.extend(metric("52v Låg", optional(quote.low_52w), None));
        metrics.extend(metric("Börsvärde", format_market_cap(quote.market_cap), None));

        vec![
            Line::from(title),
            Line::from(vec![
                Span::styled(
                    format_price(quote.current_price, &quote.currency),
                    theme.text().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                theme.span(format_change(quote.change_percent), change_tone(quote.change_percent)),
            ]),
            Line::from(metrics),
        ]
    }

    pub fn body_lines(analysis: &StockAnalysis, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![heading("Signalanalys", theme)];
        if analysis.signal.reasons.is_empty() {
            lines.push(empty("Inga signaler just nu.", theme));
        }
        for reason in &analysis.signal.reasons {
            lines.push(Line::from(Span::styled(format!("  • {reason}"), theme.text())));
        }

        if !analysis.unusual_activity.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Ovanlig aktivitet", theme));
            for activity in &analysis.unusual_activity {
                lines.push(Line::from(theme.span(format!("  ⚠ {activity}"), Tone::Warning)));
            }
        }

        lines.push(Line::from(""));
        lines.push(heading("Nyheter", theme));
        let news = &analysis.news_summary;
        if news.count == 0 && analysis.recent_headlines.is_empty() {
            lines.push(empty("Inga nyheter hittades.", theme));
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} artiklar, sentiment ", news.count), theme.dim()),
                theme.span(news.sentiment.clone(), sentiment_tone(&news.sentiment)),
                Span::styled(format!(" ({:+.2})", news.score), theme.dim()),
            ]));
            for headline in &analysis.recent_headlines {
                lines.push(Line::from(Span::styled(format!("  - {headline}"), theme.text())));
            }
        }

        lines.push(Line::from(""));
        lines.push(heading("Kongresshandel", theme));
        lines.extend(congress_lines(&analysis.congress_activity, theme));

        if !analysis.timestamp.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Analys: {}", format_timestamp(&analysis.timestamp)),
                theme.dim(),
            )));
        }
        lines
    }
}

fn congress_lines(activity: &CongressActivity, theme: &Theme) -> Vec<Line<'static>> {
    if !activity.has_congress_activity {
        return vec![empty("Ingen kongressaktivitet senaste 90 dagarna.", theme)];
    }

    let sentiment = activity.sentiment.as_deref().unwrap_or("neutral");
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("  {} transaktioner: ", activity.total_trades), theme.dim()),
        theme.span(format!("{} köp", activity.buys), Tone::Positive),
        Span::styled(" / ", theme.dim()),
        theme.span(format!("{} sälj", activity.sells), Tone::Negative),
        Span::raw("  "),
        theme.span(
            activity
                .sentiment_description
                .clone()
                .unwrap_or_else(|| sentiment.to_string()),
            sentiment_tone(sentiment),
        ),
    ])];
    if !activity.politicians_involved.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  Politiker: {}", activity.politicians_involved.join(", ")),
            theme.text(),
        )));
    }
    lines
}
