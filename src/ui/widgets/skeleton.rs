//! Loading placeholders.

use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// Widths of successive placeholder bars, as a share of the area.
const PATTERN: [u16; 4] = [40, 100, 75, 60];

/// Dimmed bars shown while a section has nothing to display yet.
pub struct Skeleton;

impl Skeleton {
    pub fn lines(width: u16, rows: usize, theme: &Theme) -> Vec<Line<'static>> {
        (0..rows)
            .map(|row| {
                if row % 2 == 1 {
                    return Line::from("");
                }
                let share = PATTERN[(row / 2) % PATTERN.len()];
                let len = usize::from(width.saturating_mul(share) / 100).max(1);
                Line::from(Span::styled("░".repeat(len), theme.dim()))
            })
            .collect()
    }

    pub fn render(frame: &mut Frame, area: Rect, block: Block<'_>, theme: &Theme) {
        let inner = block.inner(area);
        let lines = Self::lines(inner.width, usize::from(inner.height), theme);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
