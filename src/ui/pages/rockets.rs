//! Rocket history: how the daily picks closed.

use super::{Section, empty, heading, render_lines, render_pending, section};
use crate::market::{Tone, change_tone, format_price, format_signed_percent, short_symbol};
use crate::models::{BestPick, RocketHistory, RocketResult, RocketStats};
use crate::state::Store;
use crate::ui::Theme;
use crate::ui::widgets::{Tile, Tiles};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
};

pub struct RocketsPage;

impl RocketsPage {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let title = format!("Raket-historik ({} dagar)", store.rocket_days);
        let query = store.rocket_history();

        let history = match section(&query) {
            Section::Ready(history) => history,
            pending => return render_pending(frame, area, &pending, theme.block(title), theme),
        };

        if history.is_empty() {
            let lines = vec![empty(
                "Ingen rakethistorik ännu. Första raketarna valdes idag - kom tillbaka efter kvällsbriefet för att se resultatet!",
                theme,
            )];
            return render_lines(frame, area, lines, theme.block(title), 0);
        }

        let [tiles_area, body_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(Tiles::HEIGHT), Constraint::Min(3)])
            .areas(area);

        Tiles::render(frame, tiles_area, &Self::tiles(&history.stats, store.rocket_days), theme);
        let lines = Self::lines(history, store.selected_index(), theme);
        render_lines(frame, body_area, lines, theme.block(title), store.scroll_offset());
    }

    pub fn tiles(stats: &RocketStats, days: u32) -> Vec<Tile> {
        let win_tone = if stats.win_rate >= 50.0 { Tone::Positive } else { Tone::Negative };
        vec![
            Tile::new("Totalt", stats.total_picks.to_string(), Tone::Neutral)
                .caption(format!("raketer ({days} dagar)")),
            Tile::new("Träffsäkerhet", format!("{:.0}%", stats.win_rate), win_tone)
                .caption(format!("{}W / {}L", stats.total_winners, stats.total_losers)),
            Tile::new(
                "Snittavkastning",
                format_signed_percent(stats.avg_return, 2),
                change_tone(stats.avg_return),
            )
            .caption("per raket"),
            Tile::new(
                "Total avkastning",
                format_signed_percent(stats.total_return, 1),
                change_tone(stats.total_return),
            )
            .caption("summerat"),
        ]
    }

    /// Best/worst pick followed by one block per day, newest first as delivered.
    pub fn lines(history: &RocketHistory, selected: usize, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if let Some(best) = &history.stats.best_pick {
            lines.push(extreme_line("Bästa raket", best, theme));
        }
        if let Some(worst) = &history.stats.worst_pick {
            lines.push(extreme_line("Sämsta raket", worst, theme));
        }
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }

        lines.push(heading("Daglig historik", theme));
        let mut index = 0;
        for day in &history.history {
            let summary = &day.summary;
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(day.date.clone(), theme.text().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}W / {}L  ", summary.winners, summary.losers), theme.dim()),
                theme.span(
                    format_signed_percent(summary.total_return_percent, 2),
                    change_tone(summary.total_return_percent),
                ),
            ]));
            for rocket in &day.rockets {
                lines.push(result_line(rocket, index == selected, theme));
                index += 1;
            }
        }
        lines
    }
}

fn extreme_line(label: &str, pick: &BestPick, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.dim()),
        Span::styled(
            short_symbol(&pick.symbol).to_string(),
            theme.text().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ({})  ", pick.name, pick.date), theme.dim()),
        theme.span(
            format_signed_percent(pick.change_percent, 2),
            change_tone(pick.change_percent),
        ),
    ])
}

fn result_line(rocket: &RocketResult, selected: bool, theme: &Theme) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let outcome = if rocket.is_winner() { "✓" } else { "✗" };
    let line = Line::from(vec![
        Span::styled(marker, theme.heading()),
        theme.span(format!("{outcome} "), change_tone(rocket.change_percent)),
        Span::styled(
            format!("{:<10}", short_symbol(&rocket.symbol)),
            theme.text().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "{} → {}  ",
                format_price(rocket.morning_price, "SEK"),
                format_price(rocket.evening_price, "SEK")
            ),
            theme.text(),
        ),
        theme.span(
            format_signed_percent(rocket.change_percent, 2),
            change_tone(rocket.change_percent),
        ),
    ]);
    if selected { line.style(theme.selected()) } else { line }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_win_rate_tone_switches_at_half() {
        let stats = RocketStats {
            total_picks: 10,
            win_rate: 50.0,
            total_winners: 5,
            total_losers: 5,
            ..RocketStats::default()
        };
        let tiles = RocketsPage::tiles(&stats, 30);
        assert_eq!(tiles[0].caption.as_deref(), Some("raketer (30 dagar)"));
        assert_eq!(tiles[1].value, "50%");
        assert_eq!(tiles[1].tone, Tone::Positive);

        let stats = RocketStats { win_rate: 49.0, ..stats };
        assert_eq!(RocketsPage::tiles(&stats, 30)[1].tone, Tone::Negative);
    }

    #[test]
    fn test_selection_marks_flattened_rocket() {
        let history: RocketHistory = serde_json::from_value(json!({
            "history": [
                {"date": "2026-01-06", "summary": {"winners": 1, "losers": 1, "total_return_percent": 1.2},
                 "rockets": [
                    {"symbol": "SINCH.ST", "morning_price": 30.0, "evening_price": 31.0, "change_percent": 3.33},
                    {"symbol": "EVO.ST", "morning_price": 1000.0, "evening_price": 979.0, "change_percent": -2.1}
                 ]},
                {"date": "2026-01-05", "summary": {"winners": 1, "losers": 0, "total_return_percent": 0.5},
                 "rockets": [
                    {"symbol": "ABB.ST", "morning_price": 400.0, "evening_price": 402.0, "change_percent": 0.5}
                 ]}
            ],
            "stats": {"total_picks": 3, "best_pick": {"symbol": "SINCH.ST", "name": "Sinch", "date": "2026-01-06", "change_percent": 3.33}}
        }))
        .unwrap();

        let rendered = text(&RocketsPage::lines(&history, 2, &Theme::default()));
        assert!(rendered.contains("Bästa raket: SINCH Sinch (2026-01-06)  +3.33%"));
        assert!(rendered.contains("2026-01-06  1W / 1L  +1.20%"));
        assert!(rendered.contains("  ✗ EVO       1 000,00 SEK → 979,00 SEK  -2.10%"));
        assert!(rendered.contains("▶ ✓ ABB"));
    }
}
