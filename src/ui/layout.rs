//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Header with app name, connection and market status (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Key hints (bottom), zero-height when hidden.
    pub help_bar_area: Rect,
    /// Notification area (overlaid on the bottom of the main area).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_status_bar: bool, show_help_bar: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::from(show_status_bar)), // Status bar
                Constraint::Length(1),                          // Tab bar
                Constraint::Min(0),                             // Main content
                Constraint::Length(u16::from(show_help_bar)),   // Help bar
            ])
            .split(area);

        let main_area = chunks[2];
        let width = main_area.width.min(60);
        let height = 3.min(main_area.height);
        let notification_area = Rect {
            x: main_area.x + main_area.width.saturating_sub(width),
            y: main_area.y + main_area.height.saturating_sub(height),
            width,
            height,
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            main_area,
            help_bar_area: chunks[3],
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Split `area` into `count` equal columns.
pub fn columns(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count as u32); count])
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bars_take_no_space() {
        let layout = Layout::new(Rect::new(0, 0, 100, 40), false, false);
        assert_eq!(layout.status_area.height, 0);
        assert_eq!(layout.help_bar_area.height, 0);
        assert_eq!(layout.main_area.height, 39);
    }

    #[test]
    fn test_notification_fits_tiny_terminal() {
        let layout = Layout::new(Rect::new(0, 0, 20, 4), true, true);
        assert!(layout.notification_area.width <= 20);
        assert!(layout.notification_area.height <= layout.main_area.height);
    }
}
