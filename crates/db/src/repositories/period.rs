//! Period closing repository: the gate for all financial mutation.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Set,
};

use opexhub_core::period::PeriodState;
use opexhub_shared::{AppError, YearMonth};

use crate::entities::period_closings;

/// Error types for period closing operations.
#[derive(Debug, thiserror::Error)]
pub enum ClosingError {
    /// The month is closed; the attempted mutation is refused.
    #[error("month {0} is closed")]
    MonthClosed(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ClosingError> for AppError {
    fn from(err: ClosingError) -> Self {
        match err {
            ClosingError::MonthClosed(month) => {
                Self::PeriodLocked(format!("month {month} is closed"))
            }
            ClosingError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Closing status of one month, with audit fields when a row exists.
#[derive(Debug, Clone)]
pub struct PeriodStatusView {
    /// The month.
    pub yyyymm: YearMonth,
    /// Resolved state (missing row means open).
    pub state: PeriodState,
    /// Operator who last changed the status.
    pub closed_by: Option<String>,
    /// Timestamp of the last status change.
    pub closed_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

/// The single cross-cutting mutation gate.
///
/// Every gated write path calls this before touching monthly records for
/// `month`. Generic over the connection so it runs inside transactions.
pub async fn ensure_month_open<C: ConnectionTrait>(
    conn: &C,
    month: &YearMonth,
) -> Result<(), ClosingError> {
    let record = period_closings::Entity::find_by_id(month.as_str().to_owned())
        .one(conn)
        .await?;
    let state = record.map_or(PeriodState::Open, |row| row.close_status.into());
    state
        .ensure_open(month)
        .map_err(|_| ClosingError::MonthClosed(month.to_string()))
}

/// Period closing repository.
#[derive(Debug)]
pub struct PeriodRepository {
    db: DatabaseConnection,
}

impl PeriodRepository {
    /// Creates a new period repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the closing status of a month. A missing row is open.
    pub async fn status(&self, month: &YearMonth) -> Result<PeriodStatusView, ClosingError> {
        let record = period_closings::Entity::find_by_id(month.as_str().to_owned())
            .one(&self.db)
            .await?;

        Ok(match record {
            Some(row) => PeriodStatusView {
                yyyymm: month.clone(),
                state: row.close_status.into(),
                closed_by: row.closed_by,
                closed_at: Some(row.closed_at),
            },
            None => PeriodStatusView {
                yyyymm: month.clone(),
                state: PeriodState::Open,
                closed_by: None,
                closed_at: None,
            },
        })
    }

    /// Sets the closing status of a month, unconditionally.
    ///
    /// Returns `false` for the one no-op case: opening a month that has no
    /// row (it is already open by default, nothing is persisted).
    pub async fn set_status(
        &self,
        month: &YearMonth,
        state: PeriodState,
        actor: &str,
    ) -> Result<bool, ClosingError> {
        let existing = period_closings::Entity::find_by_id(month.as_str().to_owned())
            .one(&self.db)
            .await?;

        match (existing, state) {
            (Some(row), state) => {
                let mut record: period_closings::ActiveModel = row.into();
                record.close_status = Set(state.into());
                record.closed_by = Set(Some(actor.to_string()));
                record.closed_at = Set(Utc::now().into());
                record.update(&self.db).await?;
                tracing::info!(month = %month, %state, actor, "period status updated");
                Ok(true)
            }
            (None, PeriodState::Closed) => {
                let record = period_closings::ActiveModel {
                    yyyymm: Set(month.as_str().to_owned()),
                    close_status: Set(period_closings::CloseStatus::Closed),
                    closed_by: Set(Some(actor.to_string())),
                    closed_at: Set(Utc::now().into()),
                };
                record.insert(&self.db).await?;
                tracing::info!(month = %month, actor, "period closed");
                Ok(true)
            }
            (None, PeriodState::Open) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn month(raw: &str) -> YearMonth {
        YearMonth::parse(raw).unwrap()
    }

    fn closed_row(yyyymm: &str) -> period_closings::Model {
        period_closings::Model {
            yyyymm: yyyymm.to_string(),
            close_status: period_closings::CloseStatus::Closed,
            closed_by: Some("admin".to_string()),
            closed_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_missing_row_resolves_to_open() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<period_closings::Model>::new()])
            .into_connection();

        let view = PeriodRepository::new(db).status(&month("202501")).await.unwrap();
        assert_eq!(view.state, PeriodState::Open);
        assert!(view.closed_by.is_none());
    }

    #[tokio::test]
    async fn test_closed_row_resolves_to_closed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![closed_row("202501")]])
            .into_connection();

        let view = PeriodRepository::new(db).status(&month("202501")).await.unwrap();
        assert_eq!(view.state, PeriodState::Closed);
        assert_eq!(view.closed_by.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_opening_absent_month_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<period_closings::Model>::new()])
            .into_connection();

        let persisted = PeriodRepository::new(db)
            .set_status(&month("202501"), PeriodState::Open, "admin")
            .await
            .unwrap();
        assert!(!persisted);
    }

    #[tokio::test]
    async fn test_guard_rejects_closed_month() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![closed_row("202501")]])
            .into_connection();

        let err = ensure_month_open(&db, &month("202501")).await.unwrap_err();
        assert!(matches!(err, ClosingError::MonthClosed(m) if m == "202501"));
    }

    #[tokio::test]
    async fn test_guard_passes_open_month() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<period_closings::Model>::new()])
            .into_connection();

        assert!(ensure_month_open(&db, &month("202501")).await.is_ok());
    }
}
