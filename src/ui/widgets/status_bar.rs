//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::market::{market_status_at, stockholm_clock};
use crate::state::{Connection, Store};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    pub fn line(store: &Store) -> Line<'static> {
        let theme = &store.theme;

        let connection_status = match store.connection() {
            Connection::Online => Span::styled("● Ansluten", Style::default().fg(theme.positive)),
            Connection::Offline => {
                Span::styled("○ Ingen anslutning", Style::default().fg(theme.negative))
            }
        };

        let market = market_status_at(store.app.now);

        let loading = if store.is_loading() {
            Span::styled(
                " Uppdaterar… ",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" ? hjälp ", theme.dim());

        let left_content = vec![
            Span::styled(" Nordpuls ", theme.heading()),
            Span::raw(" | "),
            connection_status,
            Span::raw(" | "),
            Span::styled("OMX Stockholm: ", theme.text()),
            Span::styled(market.label, theme.toned(market.tone)),
            Span::raw(" | "),
            Span::styled(format!("{} CET", stockholm_clock(store.app.now)), theme.text()),
            loading,
        ];

        let mut spans = left_content;
        spans.push(help_hint);
        Line::from(spans)
    }

    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let mut line = Self::line(store);

        // Pad so the help hint sits on the right edge
        if let Some(hint) = line.spans.pop() {
            let used = line.width() + hint.width();
            let padding = usize::from(area.width).saturating_sub(used);
            line.spans.push(Span::raw(" ".repeat(padding)));
            line.spans.push(hint);
        }

        let paragraph = Paragraph::new(line).style(Style::default().bg(store.theme.selection));
        frame.render_widget(paragraph, area);
    }
}
