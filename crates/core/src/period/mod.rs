//! Monthly closing state.
//!
//! A month with no closing record is OPEN. That default is resolved here,
//! once, at the storage boundary - call sites work with the explicit enum
//! and never null-check a missing row.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use opexhub_shared::YearMonth;

/// Error raised when a financial mutation targets a closed month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The month has been closed by finance.
    #[error("month {0} is closed")]
    MonthClosed(YearMonth),

    /// The submitted status string is neither OPEN nor CLOSED.
    #[error("unknown period status: {0}")]
    UnknownStatus(String),
}

/// Closing state of one accounting month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeriodState {
    /// Open for financial mutation (the default for months with no record).
    #[default]
    Open,
    /// Locked by finance; all gated mutation paths are refused.
    Closed,
}

impl PeriodState {
    /// Returns true if the month is closed.
    #[must_use]
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }

    /// Fails with [`PeriodError::MonthClosed`] when the month is closed.
    pub fn ensure_open(self, month: &YearMonth) -> Result<(), PeriodError> {
        if self.is_closed() {
            return Err(PeriodError::MonthClosed(month.clone()));
        }
        Ok(())
    }
}

impl std::fmt::Display for PeriodState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

impl std::str::FromStr for PeriodState {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            other => Err(PeriodError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(raw: &str) -> YearMonth {
        YearMonth::parse(raw).unwrap()
    }

    #[test]
    fn test_default_is_open() {
        // A month with no closing record is open.
        assert_eq!(PeriodState::default(), PeriodState::Open);
    }

    #[test]
    fn test_ensure_open() {
        assert!(PeriodState::Open.ensure_open(&month("202501")).is_ok());
        assert_eq!(
            PeriodState::Closed.ensure_open(&month("202501")),
            Err(PeriodError::MonthClosed(month("202501")))
        );
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("OPEN".parse::<PeriodState>().unwrap(), PeriodState::Open);
        assert_eq!("CLOSED".parse::<PeriodState>().unwrap(), PeriodState::Closed);
        assert!("closed".parse::<PeriodState>().is_err());
    }
}
