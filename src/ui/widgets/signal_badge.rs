//! Recommendation badge.

use crate::market::{leading_action, signal_tone};
use crate::ui::Theme;
use ratatui::{style::Modifier, text::Span};

/// `[BUY (HIGH)]` colored by the action's tone.
pub struct SignalBadge;

impl SignalBadge {
    /// Spans for a badge. `action` may carry a qualifier (`"BUY (stark)"`);
    /// only the first word picks the color.
    pub fn spans(action: &str, confidence: Option<&str>, theme: &Theme) -> Vec<Span<'static>> {
        let style = theme
            .toned(signal_tone(leading_action(action)))
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![Span::styled(format!("[{action}"), style)];
        if let Some(confidence) = confidence.filter(|c| !c.is_empty()) {
            spans.push(Span::styled(format!(" ({confidence})"), theme.dim()));
        }
        spans.push(Span::styled("]", style));
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_badge_text_and_tone() {
        let theme = Theme::default();
        let spans = SignalBadge::spans("BUY (stark)", Some("HIGH"), &theme);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[BUY (stark) (HIGH)]");
        assert_eq!(spans[0].style.fg, Some(theme.positive));
    }

    #[test]
    fn test_unknown_action_is_neutral() {
        let theme = Theme::default();
        let spans = SignalBadge::spans("HOLD", None, &theme);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].style.fg, Some(theme.neutral));
    }
}
