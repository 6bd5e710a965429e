//! Application-level state.

use super::Notification;
use chrono::{DateTime, Utc};

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    MorningBrief,
    EveningBrief,
    Rockets,
    Simulator,
    Congress,
    Climate,
    Watchlist,
    StockDetail,
}

impl View {
    /// Views reachable from the tab bar, in order.
    pub const TABS: [View; 8] = [
        View::Dashboard,
        View::MorningBrief,
        View::EveningBrief,
        View::Rockets,
        View::Simulator,
        View::Congress,
        View::Climate,
        View::Watchlist,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::MorningBrief => "Morgonbrief",
            View::EveningBrief => "Kvällsbrief",
            View::Rockets => "Raket-historik",
            View::Simulator => "Simulator",
            View::Congress => "Kongresshandel",
            View::Climate => "Klimat",
            View::Watchlist => "Bevakning",
            View::StockDetail => "Aktie",
        }
    }

    /// The tab that is highlighted while this view is shown.
    pub fn tab(&self) -> Option<View> {
        match self {
            View::StockDetail => None,
            other => Some(*other),
        }
    }

    pub fn is_tab(&self) -> bool {
        self.tab().is_some()
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// View to return to from the stock detail.
    pub previous_view: Option<View>,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Current search input.
    pub input_buffer: String,
    /// Cursor position in input buffer, in characters.
    pub cursor_position: usize,
    /// Wall clock as of the last tick; drives the header clock and market status.
    pub now: DateTime<Utc>,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self {
            now: Utc::now(),
            ..Default::default()
        }
    }

    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Search
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Replace the buffer and put the cursor at the end.
    pub fn set_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.cursor_position = text.chars().count();
    }

    /// Add a character at the cursor.
    pub fn push_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_position);
        self.input_buffer.insert(at, c);
        self.cursor_position += 1;
    }

    /// Remove the character before the cursor.
    pub fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index(self.cursor_position);
            self.input_buffer.remove(at);
        }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input_buffer
            .char_indices()
            .nth(chars)
            .map_or(self.input_buffer.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_handles_multibyte_chars() {
        let mut app = AppState::new();
        for c in "Ålö".chars() {
            app.push_char(c);
        }
        assert_eq!(app.input_buffer, "Ålö");
        app.pop_char();
        assert_eq!(app.input_buffer, "Ål");
        assert_eq!(app.cursor_position, 2);

        app.set_input("sand");
        app.push_char('v');
        assert_eq!(app.input_buffer, "sandv");
    }

    #[test]
    fn test_detail_has_no_tab() {
        assert_eq!(View::StockDetail.tab(), None);
        assert!(View::TABS.iter().all(View::is_tab));
        assert_eq!(View::Climate.title(), "Klimat");
    }
}
