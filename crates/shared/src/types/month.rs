//! The `YearMonth` accounting key.
//!
//! Every financial row (monthly plan/actual, period closing, staged ledger
//! line, transfer) is keyed by a six-digit `yyyymm` string. The newtype
//! validates the format once at the boundary so downstream code never
//! re-checks it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a `yyyymm` string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid yyyymm value: {0}")]
pub struct YearMonthError(pub String);

/// A validated six-digit `yyyymm` accounting month, e.g. `202501`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(String);

impl YearMonth {
    /// Parses a `yyyymm` string: six ASCII digits with month 01-12.
    ///
    /// # Errors
    ///
    /// Returns `YearMonthError` for any other shape.
    pub fn parse(raw: &str) -> Result<Self, YearMonthError> {
        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(YearMonthError(raw.to_string()));
        }
        match raw[4..6].parse::<u8>() {
            Ok(m) if (1..=12).contains(&m) => Ok(Self(raw.to_string())),
            _ => Err(YearMonthError(raw.to_string())),
        }
    }

    /// The first month of a fiscal year, `<year>01`.
    ///
    /// # Errors
    ///
    /// Returns `YearMonthError` when `year` is not a four-digit year.
    pub fn first_of_year(year: &str) -> Result<Self, YearMonthError> {
        Self::parse(&format!("{year}01"))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four-digit year component.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.0[..4]
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = YearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = YearMonthError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<YearMonth> for String {
    fn from(m: YearMonth) -> Self {
        m.0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("202501")]
    #[case("202512")]
    #[case("999912")]
    fn test_valid_months(#[case] raw: &str) {
        let m = YearMonth::parse(raw).unwrap();
        assert_eq!(m.as_str(), raw);
    }

    #[rstest]
    #[case("202513")]
    #[case("202500")]
    #[case("2025-1")]
    #[case("2025")]
    #[case("20250101")]
    #[case("")]
    fn test_invalid_months(#[case] raw: &str) {
        assert!(YearMonth::parse(raw).is_err());
    }

    #[test]
    fn test_year_component() {
        let m = YearMonth::parse("202507").unwrap();
        assert_eq!(m.year(), "2025");
    }

    #[test]
    fn test_first_of_year() {
        assert_eq!(
            YearMonth::first_of_year("2025").unwrap().as_str(),
            "202501"
        );
        assert!(YearMonth::first_of_year("25").is_err());
    }

    #[test]
    fn test_serde_rejects_malformed() {
        assert!(serde_json::from_str::<YearMonth>("\"2025-01\"").is_err());
        let m: YearMonth = serde_json::from_str("\"202501\"").unwrap();
        assert_eq!(m.as_str(), "202501");
    }
}
