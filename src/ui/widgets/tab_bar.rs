//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{Store, View};

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let theme = &store.theme;
        let bindings = &store.keybindings;
        let keys = [
            &bindings.dashboard,
            &bindings.morning,
            &bindings.evening,
            &bindings.rockets,
            &bindings.simulator,
            &bindings.congress,
            &bindings.climate,
            &bindings.watchlist,
        ];
        let active = store.app.current_view.tab().or(store.app.previous_view);

        let mut spans = vec![Span::raw(" ")];
        for (key, view) in keys.into_iter().zip(View::TABS) {
            let name_style = if active == Some(view) {
                theme.heading().add_modifier(Modifier::UNDERLINED)
            } else {
                theme.text()
            };

            spans.push(Span::styled(format!("[{key}] "), theme.dim()));
            spans.push(Span::styled(view.title(), name_style));
            spans.push(Span::raw("  "));
        }

        if store.app.current_view == View::StockDetail {
            spans.push(Span::styled(
                format!("› {}", store.detail.symbol),
                theme.heading(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
