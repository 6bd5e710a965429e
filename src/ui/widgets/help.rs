//! Help panel and the one-line key hint bar.

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::state::{InputMode, Store, View};
use crate::ui::Theme;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    fn section(title: &str, theme: &Theme) -> [Line<'static>; 2] {
        [
            Line::from(Span::styled(
                title.to_string(),
                theme.heading().fg(theme.warning),
            )),
            Line::from(""),
        ]
    }

    fn entry(key: &str, description: &str, theme: &Theme) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {key:<8}"), theme.heading()),
            Span::styled(description.to_string(), theme.text()),
        ])
    }

    pub fn lines(store: &Store) -> Vec<Line<'static>> {
        let theme = &store.theme;
        let keys = &store.keybindings;

        let mut lines = Vec::new();
        lines.extend(Self::section("Navigering", theme));
        lines.push(Self::entry(&format!("{}/↓", keys.down), "Nästa rad", theme));
        lines.push(Self::entry(&format!("{}/↑", keys.up), "Föregående rad", theme));
        lines.push(Self::entry(&format!("{}/←", keys.left), "Föregående filter/period", theme));
        lines.push(Self::entry(&format!("{}/→", keys.right), "Nästa filter/period", theme));
        lines.push(Self::entry("Tab", "Nästa flik", theme));
        lines.push(Self::entry(&keys.select, "Öppna aktie", theme));
        lines.push(Self::entry(&keys.back, "Tillbaka", theme));
        lines.push(Line::from(""));

        lines.extend(Self::section("Vyer", theme));
        let tab_keys = [
            &keys.dashboard,
            &keys.morning,
            &keys.evening,
            &keys.rockets,
            &keys.simulator,
            &keys.congress,
            &keys.climate,
            &keys.watchlist,
        ];
        for (key, view) in tab_keys.into_iter().zip(View::TABS) {
            lines.push(Self::entry(key, view.title(), theme));
        }
        lines.push(Line::from(""));

        lines.extend(Self::section("Dashboard", theme));
        lines.push(Self::entry(&keys.search, "Sök aktie", theme));
        lines.push(Self::entry(
            &format!("{}/{}", keys.next_page, keys.prev_page),
            "Nästa/föregående sida",
            theme,
        ));
        lines.push(Line::from(""));

        lines.extend(Self::section("Övrigt", theme));
        lines.push(Self::entry(&keys.refresh, "Uppdatera", theme));
        lines.push(Self::entry(&keys.help, "Visa/dölj hjälp", theme));
        lines.push(Self::entry(&keys.quit, "Avsluta", theme));
        lines
    }

    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(Self::lines(store))
            .block(store.theme.block("Hjälp"))
            .style(store.theme.text());

        frame.render_widget(help, popup_area);
    }
}

/// Key hints for the current view.
pub struct HelpBar;

impl HelpBar {
    pub fn hints(store: &Store) -> Vec<(String, &'static str)> {
        let keys = &store.keybindings;
        if store.app.input_mode == InputMode::Search {
            return vec![
                ("Enter".to_string(), "sök"),
                ("Esc".to_string(), "avbryt"),
            ];
        }

        let mut hints = match store.app.current_view {
            View::Dashboard => vec![
                (keys.search.clone(), "sök"),
                ("←/→".to_string(), "segment"),
                (format!("{}/{}", keys.next_page, keys.prev_page), "sida"),
                (keys.select.clone(), "öppna"),
            ],
            View::Watchlist | View::MorningBrief | View::EveningBrief | View::Rockets => {
                vec![(keys.select.clone(), "öppna")]
            }
            View::Congress => vec![("←/→".to_string(), "period")],
            View::StockDetail => vec![
                ("←/→".to_string(), "period"),
                (keys.back.clone(), "tillbaka"),
            ],
            View::Simulator | View::Climate => Vec::new(),
        };
        hints.push((keys.refresh.clone(), "uppdatera"));
        hints.push((keys.quit.clone(), "avsluta"));
        hints
    }

    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let mut spans = vec![Span::raw(" ")];
        for (key, label) in Self::hints(store) {
            spans.push(Span::styled(key, theme.heading().remove_modifier(Modifier::BOLD)));
            spans.push(Span::styled(format!(" {label}   "), theme.dim()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
