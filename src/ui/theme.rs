//! Terminal colors resolved from the theme configuration.

use crate::config::ThemeConfig;
use crate::market::Tone;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};
use std::str::FromStr;

/// Resolved color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    /// Resolve each configured color, falling back to the default palette
    /// entry when a value does not parse.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let pick = |name: &str, value: &str, fallback: &str| {
            Color::from_str(value).unwrap_or_else(|_| {
                tracing::warn!(name, value, "Unrecognised theme color, using default");
                Color::from_str(fallback).unwrap_or(Color::Reset)
            })
        };

        Self {
            accent: pick("accent", &config.accent, &defaults.accent),
            positive: pick("positive", &config.positive, &defaults.positive),
            negative: pick("negative", &config.negative, &defaults.negative),
            warning: pick("warning", &config.warning, &defaults.warning),
            neutral: pick("neutral", &config.neutral, &defaults.neutral),
            muted: pick("muted", &config.muted, &defaults.muted),
            background: pick("background", &config.background, &defaults.background),
            foreground: pick("foreground", &config.foreground, &defaults.foreground),
            border: pick("border", &config.border, &defaults.border),
            selection: pick("selection", &config.selection, &defaults.selection),
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Warning => self.warning,
            Tone::Neutral => self.neutral,
            Tone::Muted => self.muted,
        }
    }

    pub fn toned(&self, tone: Tone) -> Style {
        Style::default().fg(self.tone(tone))
    }

    /// Text in a tone, e.g. a price change.
    pub fn span<'a>(&self, text: impl Into<std::borrow::Cow<'a, str>>, tone: Tone) -> Span<'a> {
        Span::styled(text, self.toned(tone))
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }

    /// Bordered panel with a padded title.
    pub fn block<'a>(&self, title: impl Into<String>) -> Block<'a> {
        Block::default()
            .title(Span::styled(format!(" {} ", title.into()), self.heading()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border))
    }
}
