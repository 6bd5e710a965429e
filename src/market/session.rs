//! OMX Stockholm session resolution.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use super::tone::Tone;

/// Timezone of the exchange all session rules are expressed in.
pub const EXCHANGE_TZ: Tz = chrono_tz::Europe::Stockholm;

/// Continuous trading starts at 09:00 local time.
pub const OPEN_MINUTE: u32 = 9 * 60;

/// Continuous trading ends at 17:30 local time.
pub const CLOSE_MINUTE: u32 = 17 * 60 + 30;

/// Trading session of the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    PreOpen,
    Open,
    Closed,
}

impl Session {
    /// Wire code, matching the `market_status` field in briefings.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PreOpen => "pre_open",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Swedish display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PreOpen => "Förmarknad",
            Self::Open => "Öppen",
            Self::Closed => "Stängt",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::PreOpen => Tone::Warning,
            Self::Open => Tone::Positive,
            Self::Closed => Tone::Negative,
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Resolved market status: session, label and tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketStatus {
    pub session: Session,
    pub label: &'static str,
    pub tone: Tone,
}

impl From<Session> for MarketStatus {
    fn from(session: Session) -> Self {
        Self {
            session,
            label: session.label(),
            tone: session.tone(),
        }
    }
}

/// Market status right now.
pub fn market_status() -> MarketStatus {
    market_status_at(Utc::now())
}

/// Market status at the given instant.
///
/// Only the exchange-local wall clock matters; the caller's own timezone
/// never enters the calculation.
pub fn market_status_at(now: DateTime<Utc>) -> MarketStatus {
    let local = now.with_timezone(&EXCHANGE_TZ);

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return Session::Closed.into();
    }

    let minutes = local.hour() * 60 + local.minute();
    let session = if minutes < OPEN_MINUTE {
        Session::PreOpen
    } else if minutes < CLOSE_MINUTE {
        Session::Open
    } else {
        Session::Closed
    };

    session.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stockholm(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        EXCHANGE_TZ
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_saturday_is_closed_all_day() {
        // 2026-01-03 is a Saturday.
        for hour in [0, 8, 10, 12, 18, 23] {
            let status = market_status_at(stockholm(2026, 1, 3, hour, 0));
            assert_eq!(status.session, Session::Closed);
        }
    }

    #[test]
    fn test_sunday_is_closed() {
        let status = market_status_at(stockholm(2026, 1, 4, 10, 0));
        assert_eq!(status.session, Session::Closed);
        assert_eq!(status.label, "Stängt");
    }

    #[test]
    fn test_weekday_sessions() {
        // 2026-01-05 is a Monday.
        assert_eq!(
            market_status_at(stockholm(2026, 1, 5, 8, 0)).session,
            Session::PreOpen
        );
        assert_eq!(
            market_status_at(stockholm(2026, 1, 5, 10, 0)).session,
            Session::Open
        );
        assert_eq!(
            market_status_at(stockholm(2026, 1, 5, 18, 0)).session,
            Session::Closed
        );
    }

    #[test]
    fn test_session_boundaries() {
        assert_eq!(
            market_status_at(stockholm(2026, 1, 5, 8, 59)).session,
            Session::PreOpen
        );
        assert_eq!(
            market_status_at(stockholm(2026, 1, 5, 9, 0)).session,
            Session::Open
        );
        assert_eq!(
            market_status_at(stockholm(2026, 1, 5, 17, 29)).session,
            Session::Open
        );
        assert_eq!(
            market_status_at(stockholm(2026, 1, 5, 17, 30)).session,
            Session::Closed
        );
    }

    #[test]
    fn test_uses_exchange_time_not_utc() {
        // 08:30 UTC in July is 10:30 in Stockholm (CEST).
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 8, 30, 0).unwrap();
        assert_eq!(market_status_at(now).session, Session::Open);

        // 07:30 UTC in January is 08:30 in Stockholm (CET).
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 7, 30, 0).unwrap();
        assert_eq!(market_status_at(now).session, Session::PreOpen);

        // Friday 23:30 UTC is already Saturday in Stockholm.
        let now = Utc.with_ymd_and_hms(2026, 1, 9, 23, 30, 0).unwrap();
        assert_eq!(market_status_at(now).session, Session::Closed);
    }

    #[test]
    fn test_status_carries_label_and_tone() {
        let status = market_status_at(stockholm(2026, 1, 5, 10, 0));
        assert_eq!(status.label, "Öppen");
        assert_eq!(status.tone, Tone::Positive);
        assert_eq!(status.session.code(), "open");

        let status = market_status_at(stockholm(2026, 1, 5, 7, 0));
        assert_eq!(status.label, "Förmarknad");
        assert_eq!(status.tone, Tone::Warning);
    }
}
