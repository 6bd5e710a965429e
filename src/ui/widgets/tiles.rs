//! Row of headline figures.

use super::super::layout::columns;
use crate::market::Tone;
use crate::ui::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// One figure with its label and an optional caption below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub label: String,
    pub value: String,
    pub tone: Tone,
    pub caption: Option<String>,
}

impl Tile {
    pub fn new(label: impl Into<String>, value: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone,
            caption: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

pub struct Tiles;

impl Tiles {
    /// Rows a tile row needs, borders included.
    pub const HEIGHT: u16 = 5;

    pub fn render(frame: &mut Frame, area: Rect, tiles: &[Tile], theme: &Theme) {
        for (tile, cell) in tiles.iter().zip(columns(area, tiles.len())) {
            let mut lines = vec![
                Line::from(Span::styled(tile.label.clone(), theme.dim())),
                Line::from(Span::styled(
                    tile.value.clone(),
                    theme.toned(tile.tone).add_modifier(Modifier::BOLD),
                )),
            ];
            if let Some(caption) = &tile.caption {
                lines.push(Line::from(Span::styled(caption.clone(), theme.dim())));
            }

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.dim().fg(theme.border));
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(block),
                cell,
            );
        }
    }
}
