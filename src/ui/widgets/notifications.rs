//! Notification and error banner rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::state::{Notification, NotificationLevel};
use crate::ui::Theme;

/// Shown in a section whose resource cannot be reached.
pub const CONNECTION_ERROR: &str = "Kunde inte ansluta till API:et.";

/// Render a notification popup.
pub fn render_notification(
    frame: &mut Frame,
    area: Rect,
    notification: &Notification,
    theme: &Theme,
) {
    frame.render_widget(Clear, area);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Info => (theme.accent, "ℹ"),
        NotificationLevel::Warning => (theme.warning, "⚠"),
    };

    let content = Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(border_color)),
        Span::raw(notification.message.as_str()),
    ]);

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        )
        .style(theme.text().bg(theme.background));

    frame.render_widget(paragraph, area);
}

/// Render an inline error banner; `detail` is appended dimmed when given.
pub fn render_banner(frame: &mut Frame, area: Rect, message: &str, detail: Option<&str>, theme: &Theme) {
    let mut spans = vec![
        Span::styled(
            "✗ ",
            Style::default()
                .fg(theme.negative)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(message.to_string(), Style::default().fg(theme.negative)),
    ];
    if let Some(detail) = detail {
        spans.push(Span::styled(format!("  ({detail})"), theme.dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.negative)),
        );

    frame.render_widget(paragraph, area);
}
