//! Plan-vs-actual reporting.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use opexhub_core::report::{burn_rate, remaining};
use opexhub_shared::AppError;

use crate::entities::{monthly_records, projects};

/// Error types for report queries.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One project's annual plan-vs-actual summary.
#[derive(Debug, Clone)]
pub struct BudgetVsActualRow {
    /// Department code.
    pub dept_code: String,
    /// Project code.
    pub proj_id: String,
    /// Project name.
    pub proj_name: String,
    /// Annual planned budget.
    pub plan_amt: Decimal,
    /// Annual actual spend.
    pub actual_amt: Decimal,
    /// Annual forecast.
    pub est_amt: Decimal,
    /// Remaining budget (plan minus actual).
    pub diff_amt: Decimal,
    /// Burn rate percentage, one decimal place.
    pub burn_rate: Decimal,
}

#[derive(Debug, Clone, Copy, Default)]
struct YearTotals {
    plan: Decimal,
    actual: Decimal,
    est: Decimal,
}

/// Report repository.
#[derive(Debug)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Per-project annual totals for one calendar year, ordered by
    /// department then project. Projects without monthly rows in the year
    /// are omitted.
    pub async fn budget_vs_actual(
        &self,
        year: &str,
    ) -> Result<Vec<BudgetVsActualRow>, ReportError> {
        let records = monthly_records::Entity::find()
            .filter(monthly_records::Column::Yyyymm.starts_with(year))
            .all(&self.db)
            .await?;

        let mut totals: BTreeMap<String, YearTotals> = BTreeMap::new();
        for record in records {
            let entry = totals.entry(record.proj_id).or_default();
            entry.plan += record.plan_amt;
            entry.actual += record.actual_amt;
            entry.est += record.est_amt;
        }

        let project_ids: Vec<String> = totals.keys().cloned().collect();
        let project_rows = projects::Entity::find()
            .filter(projects::Column::ProjId.is_in(project_ids))
            .all(&self.db)
            .await?;

        let mut rows: Vec<BudgetVsActualRow> = project_rows
            .into_iter()
            .filter_map(|project| {
                let sums = totals.get(&project.proj_id)?;
                Some(BudgetVsActualRow {
                    dept_code: project.dept_code,
                    proj_id: project.proj_id,
                    proj_name: project.proj_name,
                    plan_amt: sums.plan,
                    actual_amt: sums.actual,
                    est_amt: sums.est,
                    diff_amt: remaining(sums.plan, sums.actual),
                    burn_rate: burn_rate(sums.plan, sums.actual),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            a.dept_code
                .cmp(&b.dept_code)
                .then_with(|| a.proj_id.cmp(&b.proj_id))
        });
        Ok(rows)
    }
}
