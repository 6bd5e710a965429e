//! Number, currency and timestamp formatting.
//!
//! Every function here is total: edge values (zero, negative, missing,
//! unparseable) produce a display string instead of an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::session::EXCHANGE_TZ;

const SWEDISH_MONTHS: [&str; 12] = [
    "jan.", "feb.", "mars", "apr.", "maj", "juni", "juli", "aug.", "sep.", "okt.", "nov.", "dec.",
];

/// Round a float to two decimals, half away from zero.
///
/// Non-finite input rounds to zero.
pub fn to_cents(value: f64) -> Decimal {
    round_to(value, 2)
}

fn round_to(value: f64, decimals: u32) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Split a rounded value into (negative, integer digits, fraction digits).
fn fixed_parts(value: f64, decimals: u32) -> (bool, String, String) {
    let rounded = round_to(value, decimals);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    match text.split_once('.') {
        Some((int, frac)) => (negative, int.to_string(), frac.to_string()),
        None => (negative, text, String::new()),
    }
}

/// Insert `separator` between groups of three digits.
pub fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Format a price in its currency's convention.
///
/// USD uses a leading `$` and US grouping (`$1,234.56`); every other
/// currency uses Swedish grouping with a trailing code (`1 234,56 SEK`).
pub fn format_price(price: f64, currency: &str) -> String {
    let (negative, int, frac) = fixed_parts(price, 2);
    let sign = if negative { "-" } else { "" };

    if currency == "USD" {
        format!("${sign}{}.{frac}", group_digits(&int, ','))
    } else {
        format!("{sign}{},{frac} {currency}", group_digits(&int, ' '))
    }
}

/// Format a percent change: `+` prefix only for positive values, two decimals.
pub fn format_change(percent: f64) -> String {
    // Normalize -0.0 so it never renders as "-0.00%".
    let percent = if percent == 0.0 { 0.0 } else { percent };
    let sign = if percent > 0.0 { "+" } else { "" };
    format!("{sign}{percent:.2}%")
}

/// Format a percentage where zero also gets a `+` (win/return tiles).
pub fn format_signed_percent(value: f64, decimals: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.decimals$}%")
}

/// Format a volume-vs-average ratio, e.g. `1.5x`.
pub fn format_volume(ratio: f64) -> String {
    format!("{ratio:.1}x")
}

/// Format a market capitalisation with T/B/M suffixes.
pub fn format_market_cap(cap: Option<f64>) -> String {
    let cap = match cap {
        Some(cap) if cap != 0.0 && cap.is_finite() => cap,
        _ => return "N/A".to_string(),
    };

    if cap >= 1e12 {
        format!("{:.1}T", cap / 1e12)
    } else if cap >= 1e9 {
        format!("{:.1}B", cap / 1e9)
    } else if cap >= 1e6 {
        format!("{:.1}M", cap / 1e6)
    } else {
        let (negative, int, _) = fixed_parts(cap, 0);
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}", group_digits(&int, ','))
    }
}

/// Format whole kronor, e.g. `10 000 kr`.
pub fn format_kr(value: f64) -> String {
    let (negative, int, _) = fixed_parts(value, 0);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{} kr", group_digits(&int, ' '))
}

/// Convert an ISO-8601 instant to a short Stockholm date and time
/// (`5 jan. 14:05`). Unparseable input is returned unchanged.
pub fn format_timestamp(iso: &str) -> String {
    match parse_instant(iso) {
        Some(instant) => {
            let local = instant.with_timezone(&EXCHANGE_TZ);
            format!(
                "{} {} {:02}:{:02}",
                local.day(),
                SWEDISH_MONTHS[local.month0() as usize],
                local.hour(),
                local.minute()
            )
        }
        None => iso.to_string(),
    }
}

/// Naive timestamps are exchange-local; date-only values are UTC midnight.
fn parse_instant(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(iso) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = iso.parse::<NaiveDateTime>() {
        return EXCHANGE_TZ
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc));
    }
    if let Ok(date) = iso.parse::<NaiveDate>() {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Human countdown to a calendar event.
pub fn format_countdown(days: i64) -> String {
    match days {
        0 => "Idag".to_string(),
        1 => "Imorgon".to_string(),
        d if d < 0 => format!("{} dagar sedan", d.abs()),
        d => format!("{d} dagar"),
    }
}

/// Wall-clock time in Stockholm, `HH:MM:SS`.
pub fn stockholm_clock(now: DateTime<Utc>) -> String {
    now.with_timezone(&EXCHANGE_TZ).format("%H:%M:%S").to_string()
}

/// Drop the `.ST` suffix Stockholm tickers carry.
pub fn short_symbol(symbol: &str) -> &str {
    symbol.strip_suffix(".ST").unwrap_or(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_price_sek() {
        assert_eq!(format_price(210.5, "SEK"), "210,50 SEK");
        assert_eq!(format_price(1234567.891, "SEK"), "1 234 567,89 SEK");
        assert_eq!(format_price(0.0, "SEK"), "0,00 SEK");
        assert_eq!(format_price(-12.345, "EUR"), "-12,35 EUR");
    }

    #[test]
    fn test_format_price_usd() {
        assert_eq!(format_price(1234.5, "USD"), "$1,234.50");
        assert_eq!(format_price(0.0, "USD"), "$0.00");
        assert_eq!(format_price(-3.1, "USD"), "$-3.10");
    }

    #[test]
    fn test_format_price_never_panics_on_non_finite() {
        assert_eq!(format_price(f64::NAN, "SEK"), "0,00 SEK");
        assert_eq!(format_price(f64::INFINITY, "USD"), "$0.00");
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(1.005), dec!(1.01));
        assert_eq!(to_cents(-2.5), dec!(-2.50));
        assert_eq!(to_cents(210.5), dec!(210.50));
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(0.0), "0.00%");
        assert_eq!(format_change(-0.0), "0.00%");
        assert_eq!(format_change(1.234), "+1.23%");
        assert_eq!(format_change(-2.5), "-2.50%");
        assert_eq!(format_change(12.0), "+12.00%");
    }

    #[test]
    fn test_format_change_sign_and_decimals() {
        for x in [-100.0, -1.0, -0.004, 0.0, 0.004, 0.5, 99.999] {
            let s = format_change(x);
            assert_eq!(s.starts_with('+'), x > 0.0, "sign of {s}");
            let digits = s.trim_end_matches('%').split('.').nth(1).unwrap();
            assert_eq!(digits.len(), 2, "decimals of {s}");
        }
    }

    #[test]
    fn test_format_signed_percent() {
        assert_eq!(format_signed_percent(0.0, 1), "+0.0%");
        assert_eq!(format_signed_percent(3.14, 1), "+3.1%");
        assert_eq!(format_signed_percent(-1.25, 2), "-1.25%");
    }

    #[test]
    fn test_format_market_cap() {
        assert_eq!(format_market_cap(None), "N/A");
        assert_eq!(format_market_cap(Some(0.0)), "N/A");
        assert_eq!(format_market_cap(Some(f64::NAN)), "N/A");
        assert_eq!(format_market_cap(Some(f64::INFINITY)), "N/A");
        assert_eq!(format_market_cap(Some(f64::NEG_INFINITY)), "N/A");
        assert_eq!(format_market_cap(Some(999.0)), "999");
        assert_eq!(format_market_cap(Some(12_345.0)), "12,345");
        assert_eq!(format_market_cap(Some(2_500_000.0)), "2.5M");
        assert_eq!(format_market_cap(Some(1_500_000_000.0)), "1.5B");
        assert_eq!(format_market_cap(Some(3_200_000_000_000.0)), "3.2T");
    }

    #[test]
    fn test_format_volume_and_kr() {
        assert_eq!(format_volume(1.46), "1.5x");
        assert_eq!(format_kr(10_000.0), "10 000 kr");
        assert_eq!(format_kr(1049.6), "1 050 kr");
        assert_eq!(format_kr(-250.0), "-250 kr");
        assert_eq!(format_kr(0.2), "0 kr");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ','), "1");
        assert_eq!(group_digits("123", ','), "123");
        assert_eq!(group_digits("1234", ','), "1,234");
        assert_eq!(group_digits("1234567", ' '), "1 234 567");
    }

    #[test]
    fn test_format_timestamp() {
        // CET in winter, CEST in summer.
        assert_eq!(format_timestamp("2026-01-05T13:05:00Z"), "5 jan. 14:05");
        assert_eq!(format_timestamp("2026-07-01T10:00:00+00:00"), "1 juli 12:00");
        // Naive timestamps are already Stockholm time.
        assert_eq!(format_timestamp("2026-10-19T08:15:30.123456"), "19 okt. 08:15");
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp("not-a-date"), "not-a-date");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "Idag");
        assert_eq!(format_countdown(1), "Imorgon");
        assert_eq!(format_countdown(5), "5 dagar");
        assert_eq!(format_countdown(-3), "3 dagar sedan");
    }

    #[test]
    fn test_stockholm_clock() {
        let now = Utc.with_ymd_and_hms(2026, 1, 5, 7, 4, 9).unwrap();
        assert_eq!(stockholm_clock(now), "08:04:09");
    }

    #[test]
    fn test_short_symbol() {
        assert_eq!(short_symbol("ABB.ST"), "ABB");
        assert_eq!(short_symbol("NVDA"), "NVDA");
    }
}
