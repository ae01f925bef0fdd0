//! Display formatting shared by the composer and the renderer.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat};
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_GLYPH: &str = "₹";

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a calendar date from `YYYY-MM-DD` or an ISO-8601 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// "January 5, 2025".
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Long form of a date string; empty when the string is not a date.
pub fn long_date_str(value: &str) -> String {
    parse_date(value).map(long_date).unwrap_or_default()
}

/// Today's date in long form.
pub fn today_long() -> String {
    long_date(Local::now().date_naive())
}

/// Midnight UTC of `date` as an ISO-8601 timestamp with milliseconds.
pub fn iso_timestamp(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Whole-unit amount, fraction truncated: "₹600,000".
pub fn currency_whole(amount: Decimal) -> String {
    let mut whole = amount.trunc();
    whole.rescale(0);
    with_glyph(whole)
}

/// Two-decimal amount: "₹53,000.00".
pub fn currency_cents(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    with_glyph(rounded)
}

fn with_glyph(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = amount.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits.as_str(), None),
    };

    let mut out = format!("{sign}{CURRENCY_GLYPH}{}", group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Insert a comma every three digits from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Canonical month name for user input such as "march" or "Mar".
pub fn normalize_month(value: &str) -> Option<&'static str> {
    let value = value.trim().to_lowercase();
    if value.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .find(|m| {
            let m = m.to_lowercase();
            m == value || (value.len() == 3 && m.starts_with(&value))
        })
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(long_date(date), "January 5, 2025");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 17);
        assert_eq!(parse_date("2025-03-17"), expected);
        assert_eq!(parse_date("2025-03-17T00:00:00.000Z"), expected);
        assert_eq!(parse_date("2025-03-17T08:30:00"), expected);
        assert_eq!(parse_date("17/03/2025"), None);
        assert_eq!(long_date_str(""), "");
    }

    #[test]
    fn test_iso_timestamp() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(iso_timestamp(date), "2025-01-05T00:00:00.000Z");
    }

    #[test]
    fn test_currency_whole_truncates() {
        assert_eq!(currency_whole(Decimal::from(600000)), "₹600,000");
        assert_eq!(currency_whole(Decimal::from_str("1234.99").unwrap()), "₹1,234");
        assert_eq!(currency_whole(Decimal::from(999)), "₹999");
        assert_eq!(currency_whole(Decimal::ZERO), "₹0");
    }

    #[test]
    fn test_currency_cents() {
        assert_eq!(currency_cents(Decimal::from(53000)), "₹53,000.00");
        assert_eq!(currency_cents(Decimal::from_str("1234567.005").unwrap()), "₹1,234,567.01");
        assert_eq!(currency_cents(Decimal::from(-1500)), "-₹1,500.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("100000"), "100,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month("march"), Some("March"));
        assert_eq!(normalize_month(" Dec "), Some("December"));
        assert_eq!(normalize_month("Ma"), None);
        assert_eq!(normalize_month("Smarch"), None);
    }
}
