//! Morning and evening briefing.

use super::{Section, currency_for, heading, render_lines, render_pending, section};
use crate::market::{
    Tone, change_tone, format_change, format_price, format_timestamp, format_volume,
    sentiment_tone,
};
use crate::models::{Briefing, BriefingKind, BriefingRecommendation, RocketFollowup, RocketPick};
use crate::state::{Store, View};
use crate::ui::Theme;
use crate::ui::widgets::SignalBadge;
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
};

pub struct BriefingPage;

impl BriefingPage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let kind = match store.app.current_view {
            View::EveningBrief => BriefingKind::Evening,
            _ => BriefingKind::Morning,
        };
        let theme = &store.theme;
        let block = theme.block(kind.title());
        let query = store.briefing();

        match section(&query) {
            Section::Ready(briefing) => {
                let lines = Self::lines(briefing, kind, store.selected_index(), theme);
                render_lines(frame, area, lines, block, store.scroll_offset());
            }
            pending => render_pending(frame, area, &pending, block, theme),
        }
    }

    pub fn lines(
        briefing: &Briefing,
        kind: BriefingKind,
        selected: usize,
        theme: &Theme,
    ) -> Vec<Line<'static>> {
        let subtitle = match kind {
            BriefingKind::Morning => "Inför börsöppning",
            BriefingKind::Evening => "Inför börsstängning",
        };
        let mut lines = vec![Line::from(vec![
            Span::styled(kind.title(), theme.heading()),
            Span::styled(
                format!("  {} CET - {subtitle}", kind.scheduled_at()),
                theme.dim(),
            ),
        ])];

        if briefing.is_pending() {
            let what = match kind {
                BriefingKind::Morning => "Morgonbriefen",
                BriefingKind::Evening => "Kvällsbriefen",
            };
            lines.push(Line::from(""));
            lines.push(Line::from(theme.span(
                format!("{what} genereras... Första gången kan ta upp till 30 sekunder."),
                Tone::Warning,
            )));
            return lines;
        }

        if !briefing.generated_at.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Genererad: {}", format_timestamp(&briefing.generated_at)),
                theme.dim(),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(briefing.summary.clone(), theme.text())));

        if !briefing.highlights.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading(
                match kind {
                    BriefingKind::Morning => "Viktiga signaler",
                    BriefingKind::Evening => "Dagens signaler",
                },
                theme,
            ));
            for highlight in &briefing.highlights {
                let note = highlight
                    .signal
                    .as_deref()
                    .or(highlight.alert.as_deref())
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled(format!("• {}", highlight.stock), theme.text().add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" - {note}"), theme.dim()),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(heading(
            match kind {
                BriefingKind::Morning => "Rekommendationer",
                BriefingKind::Evening => "Kvällsanalys",
            },
            theme,
        ));
        for (i, rec) in briefing.recommendations.iter().enumerate() {
            lines.extend(recommendation(rec, i == selected, theme));
        }

        if kind == BriefingKind::Morning && !briefing.rocket_picks.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Dagens kursraketer", theme));
            for pick in &briefing.rocket_picks {
                lines.extend(rocket_pick(pick, theme));
            }
        }

        if kind == BriefingKind::Evening && !briefing.rocket_followup.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Så gick kursraketerna", theme));
            for followup in &briefing.rocket_followup {
                lines.push(rocket_followup(followup, theme));
            }
        }

        if !briefing.congress_notable.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Kongressnoteringar", theme));
            for notable in &briefing.congress_notable {
                lines.push(Line::from(vec![
                    Span::styled(
                        notable.ticker.clone(),
                        theme.toned(sentiment_tone(&notable.sentiment)).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" - {} ({} transaktioner)", notable.description, notable.total_trades),
                        theme.text(),
                    ),
                ]));
            }
        }

        if !briefing.disclaimer.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                briefing.disclaimer.clone(),
                theme.dim().add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }
}

fn recommendation(rec: &BriefingRecommendation, selected: bool, theme: &Theme) -> Vec<Line<'static>> {
    let marker = if selected { "▶ " } else { "  " };
    let mut title = vec![
        Span::styled(marker, theme.heading()),
        Span::styled(rec.symbol.clone(), theme.text().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}  ", rec.name), theme.dim()),
    ];
    title.extend(SignalBadge::spans(&rec.action, Some(&rec.confidence), theme));

    let mut title = Line::from(title);
    if selected {
        title = title.style(theme.selected());
    }

    let mut lines = vec![
        Line::from(""),
        title,
        Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format_price(rec.price, currency_for(&rec.symbol)),
                theme.text().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            theme.span(format_change(rec.change_percent), change_tone(rec.change_percent)),
        ]),
    ];
    for reason in &rec.reasons {
        lines.push(Line::from(Span::styled(format!("    - {reason}"), theme.dim())));
    }

    let mut footer = vec![
        Span::styled("    Nyhetssentiment: ", theme.dim()),
        theme.span(rec.news_sentiment.clone(), sentiment_tone(&rec.news_sentiment)),
    ];
    if let Some(congress) = &rec.congress_signal {
        footer.push(Span::styled(format!("   Kongress: {congress}"), theme.dim()));
    }
    lines.push(Line::from(footer));
    lines
}

fn rocket_pick(pick: &RocketPick, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("  {}", pick.symbol), theme.text().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}  ", pick.name), theme.dim()),
        Span::styled(format_price(pick.morning_price, "SEK"), theme.text()),
        Span::styled(format!("  Raketpoäng {}", pick.rocket_score), theme.heading()),
        Span::styled(
            format!("  {} vol", format_volume(pick.volume_vs_avg)),
            theme.toned(if pick.volume_vs_avg > 1.5 { Tone::Warning } else { Tone::Muted }),
        ),
    ])];
    for reason in &pick.reasons {
        lines.push(Line::from(Span::styled(format!("    - {reason}"), theme.dim())));
    }
    lines
}

fn rocket_followup(followup: &RocketFollowup, theme: &Theme) -> Line<'static> {
    let pick = &followup.pick;
    let mut spans = vec![Span::styled(
        format!("  {} ", pick.symbol),
        theme.text().add_modifier(Modifier::BOLD),
    )];

    match (followup.has_data(), followup.current_price, followup.day_change_percent) {
        (true, Some(price), Some(change)) => {
            spans.push(Span::styled(
                format!(
                    "{} → {}  ",
                    format_price(pick.morning_price, "SEK"),
                    format_price(price, "SEK")
                ),
                theme.text(),
            ));
            spans.push(theme.span(format_change(change), change_tone(change)));
            spans.push(Span::styled(format!("  {}", followup.message), theme.dim()));
        }
        _ => spans.push(Span::styled(followup.message.clone(), theme.dim())),
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_pending_briefing_shows_generating_message() {
        let lines = BriefingPage::lines(&Briefing::default(), BriefingKind::Evening, 0, &Theme::default());
        assert!(text(&lines).contains("Kvällsbriefen genereras..."));
    }

    #[test]
    fn test_morning_briefing_sections() {
        let briefing: Briefing = serde_json::from_value(json!({
            "type": "morning",
            "generated_at": "2024-01-05T07:15:00Z",
            "summary": "Blandad öppning väntas.",
            "highlights": [{"stock": "ABB", "signal": "BUY"}],
            "recommendations": [{
                "symbol": "ABB.ST", "name": "ABB", "action": "BUY", "confidence": "HIGH",
                "price": 450.0, "change_percent": 1.5, "reasons": ["MACD korsning"],
                "news_sentiment": "positive"
            }],
            "rocket_picks": [{"symbol": "SINCH.ST", "name": "Sinch", "morning_price": 30.0, "rocket_score": 8}],
            "congress_notable": [{"ticker": "NVDA", "sentiment": "bullish", "description": "Flera köp", "total_trades": 4}],
            "disclaimer": "Inte finansiell rådgivning."
        }))
        .unwrap();

        let rendered = text(&BriefingPage::lines(&briefing, BriefingKind::Morning, 0, &Theme::default()));
        assert!(rendered.contains("Genererad: 5 jan. 08:15"));
        assert!(rendered.contains("• ABB - BUY"));
        assert!(rendered.contains("▶ ABB.ST  ABB  [BUY (HIGH)]"));
        assert!(rendered.contains("450,00 SEK  +1.50%"));
        assert!(rendered.contains("Raketpoäng 8"));
        assert!(rendered.contains("NVDA - Flera köp (4 transaktioner)"));
        assert!(rendered.contains("Inte finansiell rådgivning."));
    }

    #[test]
    fn test_followup_without_data_shows_message() {
        let followup = RocketFollowup {
            status: "NO_DATA".to_string(),
            message: "Ingen kursdata".to_string(),
            ..RocketFollowup::default()
        };
        let line = rocket_followup(&followup, &Theme::default());
        assert!(text(&[line]).ends_with("Ingen kursdata"));
    }
}
