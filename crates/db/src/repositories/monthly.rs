//! Monthly plan/actual store operations: status view, forecast updates,
//! month finalization.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use opexhub_shared::{AppError, YearMonth};

use crate::entities::{monthly_records, projects};
use crate::repositories::period::{ClosingError, ensure_month_open};

/// Error types for monthly record operations.
#[derive(Debug, thiserror::Error)]
pub enum MonthlyError {
    /// The targeted month is closed.
    #[error(transparent)]
    Period(#[from] ClosingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<MonthlyError> for AppError {
    fn from(err: MonthlyError) -> Self {
        match err {
            MonthlyError::Period(e) => e.into(),
            MonthlyError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One project's row in the monthly status view. Projects without a monthly
/// record render as zeros.
#[derive(Debug, Clone)]
pub struct MonthlyStatusRow {
    /// Project code.
    pub proj_id: String,
    /// Project name.
    pub proj_name: String,
    /// Department code.
    pub dept_code: String,
    /// Vendor reference, when mapped.
    pub vendor_id: Option<String>,
    /// Planned budget.
    pub plan_amt: Decimal,
    /// Actual spend.
    pub actual_amt: Decimal,
    /// Operator forecast.
    pub est_amt: Decimal,
}

/// Monthly record repository.
#[derive(Debug)]
pub struct MonthlyRepository {
    db: DatabaseConnection,
}

impl MonthlyRepository {
    /// Creates a new monthly repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All projects joined against one month's records, zeros where absent.
    pub async fn monthly_status(
        &self,
        month: &YearMonth,
    ) -> Result<Vec<MonthlyStatusRow>, MonthlyError> {
        let all_projects = projects::Entity::find().all(&self.db).await?;
        let records = monthly_records::Entity::find()
            .filter(monthly_records::Column::Yyyymm.eq(month.as_str()))
            .all(&self.db)
            .await?;

        let by_proj: std::collections::HashMap<&str, &monthly_records::Model> =
            records.iter().map(|r| (r.proj_id.as_str(), r)).collect();

        Ok(all_projects
            .iter()
            .map(|p| {
                let record = by_proj.get(p.proj_id.as_str());
                MonthlyStatusRow {
                    proj_id: p.proj_id.clone(),
                    proj_name: p.proj_name.clone(),
                    dept_code: p.dept_code.clone(),
                    vendor_id: p.vendor_id.clone(),
                    plan_amt: record.map_or(Decimal::ZERO, |r| r.plan_amt),
                    actual_amt: record.map_or(Decimal::ZERO, |r| r.actual_amt),
                    est_amt: record.map_or(Decimal::ZERO, |r| r.est_amt),
                }
            })
            .collect())
    }

    /// Sets the forecast amount for one `(project, month)` cell.
    ///
    /// Gated on the month; creates the record with zero plan/actual when
    /// absent.
    pub async fn update_forecast(
        &self,
        proj_id: &str,
        month: &YearMonth,
        est_amt: Decimal,
    ) -> Result<(), MonthlyError> {
        ensure_month_open(&self.db, month).await?;

        let existing = monthly_records::Entity::find()
            .filter(monthly_records::Column::ProjId.eq(proj_id))
            .filter(monthly_records::Column::Yyyymm.eq(month.as_str()))
            .one(&self.db)
            .await?;

        let now = Utc::now().into();
        match existing {
            Some(model) => {
                let mut record: monthly_records::ActiveModel = model.into();
                record.est_amt = Set(est_amt);
                record.updated_at = Set(now);
                record.update(&self.db).await?;
            }
            None => {
                let record = monthly_records::ActiveModel {
                    proj_id: Set(proj_id.to_owned()),
                    yyyymm: Set(month.as_str().to_owned()),
                    est_amt: Set(est_amt),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                record.insert(&self.db).await?;
            }
        }
        Ok(())
    }

    /// Finalizes every record of a month, returning the number of rows
    /// flagged. Gated on the month like the other mutation paths.
    pub async fn finalize_month(&self, month: &YearMonth) -> Result<u64, MonthlyError> {
        ensure_month_open(&self.db, month).await?;

        let result = monthly_records::Entity::update_many()
            .col_expr(
                monthly_records::Column::IsActualFinalized,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(monthly_records::Column::Yyyymm.eq(month.as_str()))
            .exec(&self.db)
            .await?;

        tracing::info!(month = %month, rows = result.rows_affected, "month finalized");
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::entities::period_closings;

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

    fn record(proj_id: &str, yyyymm: &str) -> monthly_records::Model {
        monthly_records::Model {
            data_id: 1,
            proj_id: proj_id.to_string(),
            yyyymm: yyyymm.to_string(),
            plan_amt: dec!(1000),
            actual_amt: dec!(0),
            est_amt: dec!(0),
            confirmed_amt: dec!(0),
            is_actual_finalized: false,
            remark: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_forecast_update_blocked_on_closed_month() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![closed_row("202501")]])
            .into_connection();

        let err = MonthlyRepository::new(db)
            .update_forecast("A-001", &month("202501"), dec!(500))
            .await
            .unwrap_err();

        assert!(matches!(err, MonthlyError::Period(ClosingError::MonthClosed(_))));
    }

    #[tokio::test]
    async fn test_forecast_update_passes_on_open_month() {
        let updated = monthly_records::Model {
            est_amt: dec!(500),
            ..record("A-001", "202501")
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // Gate: no closing row, month is open.
            .append_query_results([Vec::<period_closings::Model>::new()])
            // Existing record to update.
            .append_query_results([vec![record("A-001", "202501")]])
            // UPDATE ... RETURNING result.
            .append_query_results([vec![updated]])
            .into_connection();

        assert!(
            MonthlyRepository::new(db)
                .update_forecast("A-001", &month("202501"), dec!(500))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_finalize_blocked_on_closed_month() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![closed_row("202501")]])
            .into_connection();

        let err = MonthlyRepository::new(db)
            .finalize_month(&month("202501"))
            .await
            .unwrap_err();

        assert!(matches!(err, MonthlyError::Period(ClosingError::MonthClosed(_))));
    }
}
