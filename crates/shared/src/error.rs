//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Each variant maps to one HTTP status class: validation failures are 400,
/// a closed accounting month is 403, missing records are 404, duplicate
/// natural keys are 409, and anything the persistence layer throws is 500.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (missing or malformed input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The accounting month is closed for financial mutation.
    #[error("Period locked: {0}")]
    PeriodLocked(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., duplicate natural key).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Insufficient planned budget for a transfer.
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InsufficientBalance(_) => 400,
            Self::PeriodLocked(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PeriodLocked(_) => "PERIOD_LOCKED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InsufficientBalance(_) => "INSUFFICIENT_BALANCE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::InsufficientBalance(String::new()).status_code(), 400);
        assert_eq!(AppError::PeriodLocked(String::new()).status_code(), 403);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::PeriodLocked(String::new()).error_code(),
            "PERIOD_LOCKED"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::InsufficientBalance(String::new()).error_code(),
            "INSUFFICIENT_BALANCE"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::PeriodLocked("202501".into()).to_string(),
            "Period locked: 202501"
        );
        assert_eq!(
            AppError::NotFound("project A-001".into()).to_string(),
            "Not found: project A-001"
        );
    }
}
