//! Cell-level parsing with named fallbacks.

use rust_decimal::Decimal;

use opexhub_shared::YearMonth;

/// Sentinel month for rows whose posting date cannot be parsed.
///
/// Rows are never dropped for a bad date; they are parked on this month so
/// operators can find and fix them.
pub const FALLBACK_MONTH: &str = "999912";

fn fallback_month() -> YearMonth {
    YearMonth::parse(FALLBACK_MONTH).expect("sentinel month is valid")
}

/// Derives the accounting month from a posting-date string.
///
/// A date of at least seven characters has its `-` and `.` separators
/// stripped and the first six digits taken (`2025-01-15` -> `202501`).
/// Anything shorter, or a result that is not a valid month, yields
/// [`FALLBACK_MONTH`]; the flag reports that the fallback was used.
#[must_use]
pub fn posting_month(posting_date: Option<&str>) -> (YearMonth, bool) {
    let Some(raw) = posting_date else {
        return (fallback_month(), true);
    };
    let raw = raw.trim();
    if raw.len() < 7 {
        return (fallback_month(), true);
    }
    let digits: String = raw.chars().filter(|c| *c != '-' && *c != '.').collect();
    match digits.get(..6).and_then(|s| YearMonth::parse(s).ok()) {
        Some(month) => (month, false),
        None => (fallback_month(), true),
    }
}

/// Parses a local-currency amount, stripping thousands separators.
///
/// A malformed amount falls back to zero rather than rejecting the row; the
/// flag reports that the fallback was used.
#[must_use]
pub fn parse_amount(raw: &str) -> (Decimal, bool) {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return (Decimal::ZERO, true);
    }
    match cleaned.parse::<Decimal>() {
        Ok(amount) => (amount, false),
        Err(_) => (Decimal::ZERO, true),
    }
}

/// Parses the accounting line item number, defaulting to 0.
#[must_use]
pub fn parse_line_item(raw: Option<&str>) -> i32 {
    raw.map(str::trim)
        // Excel renders integers as "1.0"; take the integral part.
        .map(|s| s.strip_suffix(".0").unwrap_or(s))
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(0)
}

/// Returns true for a bulk-plan month column header (`20` prefix, six
/// digits, e.g. `202501`).
#[must_use]
pub fn is_plan_month_column(header: &str) -> bool {
    header.len() == 6 && header.starts_with("20") && header.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a plan amount cell, stripping separators; failures become zero so
/// the cell is simply not inserted.
#[must_use]
pub fn parse_plan_amount(raw: Option<&str>) -> Decimal {
    raw.map(|s| parse_amount(s).0).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[rstest]
    #[case(Some("2025-01-15"), "202501", false)]
    #[case(Some("2025.01.15"), "202501", false)]
    #[case(Some("20250115"), "202501", false)]
    #[case(Some("2025-1"), "999912", true)] // too short
    #[case(Some(""), "999912", true)]
    #[case(None, "999912", true)]
    #[case(Some("n/a date"), "999912", true)] // long enough but not a month
    fn test_posting_month(
        #[case] raw: Option<&str>,
        #[case] expected: &str,
        #[case] fallback: bool,
    ) {
        let (month, used_fallback) = posting_month(raw);
        assert_eq!(month.as_str(), expected);
        assert_eq!(used_fallback, fallback);
    }

    #[rstest]
    #[case("1,234,567", dec!(1234567), false)]
    #[case("1234.56", dec!(1234.56), false)]
    #[case("-5000", dec!(-5000), false)]
    #[case("12 000", dec!(12000), false)]
    #[case("abc", dec!(0), true)]
    #[case("", dec!(0), true)]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Decimal, #[case] fallback: bool) {
        assert_eq!(parse_amount(raw), (expected, fallback));
    }

    #[rstest]
    #[case(Some("3"), 3)]
    #[case(Some("3.0"), 3)]
    #[case(Some("x"), 0)]
    #[case(None, 0)]
    fn test_parse_line_item(#[case] raw: Option<&str>, #[case] expected: i32) {
        assert_eq!(parse_line_item(raw), expected);
    }

    #[rstest]
    #[case("202501", true)]
    #[case("202512", true)]
    #[case("2025", false)]
    #[case("사업명", false)]
    #[case("2025AB", false)]
    #[case("192501", false)]
    fn test_is_plan_month_column(#[case] header: &str, #[case] expected: bool) {
        assert_eq!(is_plan_month_column(header), expected);
    }
}
