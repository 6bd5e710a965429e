//! Semantic tones for changes, signals and impact levels.

/// A semantic color class. The UI theme maps each tone to a terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    #[default]
    Neutral,
    Muted,
}

/// Tone for a percent change: zero is neutral.
pub fn change_tone(percent: f64) -> Tone {
    if percent > 0.0 {
        Tone::Positive
    } else if percent < 0.0 {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Tone for instruments where a rise is bad news (volatility indices).
pub fn inverted_change_tone(percent: f64) -> Tone {
    match change_tone(percent) {
        Tone::Positive => Tone::Negative,
        Tone::Negative => Tone::Positive,
        _ => Tone::Muted,
    }
}

/// Tone for a recommendation action. Unknown actions fall back to neutral.
pub fn signal_tone(action: &str) -> Tone {
    match action {
        "BUY" => Tone::Positive,
        "SELL" | "AVOID" => Tone::Negative,
        "WATCH" => Tone::Warning,
        _ => Tone::Neutral,
    }
}

/// Tone for a calendar event impact level.
pub fn impact_tone(impact: &str) -> Tone {
    match impact {
        "high" => Tone::Negative,
        "medium" => Tone::Warning,
        _ => Tone::Muted,
    }
}

/// Tone for a news or congress sentiment word.
pub fn sentiment_tone(sentiment: &str) -> Tone {
    match sentiment.to_ascii_lowercase().as_str() {
        "positive" | "bullish" => Tone::Positive,
        "negative" | "bearish" => Tone::Negative,
        "neutral" => Tone::Warning,
        _ => Tone::Muted,
    }
}

/// First word of a signal type, e.g. `"BUY (stark)"` -> `"BUY"`.
pub fn leading_action(signal_type: &str) -> &str {
    signal_type.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_tone() {
        assert_eq!(change_tone(0.0), Tone::Neutral);
        assert_eq!(change_tone(-0.0), Tone::Neutral);
        assert_eq!(change_tone(0.01), Tone::Positive);
        assert_eq!(change_tone(-3.2), Tone::Negative);
        assert_eq!(change_tone(f64::MAX), Tone::Positive);
        assert_eq!(change_tone(f64::MIN), Tone::Negative);
    }

    #[test]
    fn test_inverted_change_tone() {
        assert_eq!(inverted_change_tone(2.0), Tone::Negative);
        assert_eq!(inverted_change_tone(-2.0), Tone::Positive);
        assert_eq!(inverted_change_tone(0.0), Tone::Muted);
    }

    #[test]
    fn test_signal_tone() {
        assert_eq!(signal_tone("BUY"), Tone::Positive);
        assert_eq!(signal_tone("SELL"), signal_tone("AVOID"));
        assert_eq!(signal_tone("WATCH"), Tone::Warning);
        assert_eq!(signal_tone("HOLD"), Tone::Neutral);
        assert_eq!(signal_tone(""), Tone::Neutral);
        assert_eq!(signal_tone("köp?!"), Tone::Neutral);
    }

    #[test]
    fn test_impact_tone() {
        assert_eq!(impact_tone("high"), Tone::Negative);
        assert_eq!(impact_tone("medium"), Tone::Warning);
        assert_eq!(impact_tone("low"), Tone::Muted);
        assert_eq!(impact_tone("unknown"), Tone::Muted);
    }

    #[test]
    fn test_sentiment_tone() {
        assert_eq!(sentiment_tone("positive"), Tone::Positive);
        assert_eq!(sentiment_tone("Bearish"), Tone::Negative);
        assert_eq!(sentiment_tone("neutral"), Tone::Warning);
        assert_eq!(sentiment_tone(""), Tone::Muted);
    }

    #[test]
    fn test_leading_action() {
        assert_eq!(leading_action("BUY (stark)"), "BUY");
        assert_eq!(leading_action("WATCH"), "WATCH");
        assert_eq!(leading_action(""), "");
    }
}
