//! Plan-vs-actual report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;
use opexhub_db::repositories::report::ReportRepository;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/report/budget-vs-actual", get(budget_vs_actual))
}

/// Query parameters for the budget-vs-actual report.
#[derive(Debug, Deserialize)]
pub struct BudgetVsActualQuery {
    /// Calendar year, four digits.
    #[serde(default = "default_year")]
    pub year: String,
}

fn default_year() -> String {
    "2025".to_string()
}

/// One project's annual summary row.
#[derive(Debug, Serialize)]
pub struct BudgetVsActualResponse {
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
    /// Remaining budget.
    pub diff_amt: Decimal,
    /// Burn rate percentage.
    pub burn_rate: Decimal,
}

/// GET `/report/budget-vs-actual?year=` - per-project annual totals.
async fn budget_vs_actual(
    State(state): State<AppState>,
    Query(query): Query<BudgetVsActualQuery>,
) -> Result<Json<Vec<BudgetVsActualResponse>>, ApiError> {
    let repo = ReportRepository::new((*state.db).clone());
    let rows = repo.budget_vs_actual(&query.year).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| BudgetVsActualResponse {
                dept_code: row.dept_code,
                proj_id: row.proj_id,
                proj_name: row.proj_name,
                plan_amt: row.plan_amt,
                actual_amt: row.actual_amt,
                est_amt: row.est_amt,
                diff_amt: row.diff_amt,
                burn_rate: row.burn_rate,
            })
            .collect(),
    ))
}
