//! Monthly execution routes: status view, forecast updates, finalization.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ApiError, validation};
use crate::AppState;
use opexhub_db::repositories::monthly::MonthlyRepository;
use opexhub_shared::YearMonth;

/// Creates the execution routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/execution/{yyyymm}", get(monthly_status))
        .route("/execution/forecast", post(update_forecast))
        .route("/execution/finalize", post(finalize_month))
}

/// One project's row in the monthly status view.
#[derive(Debug, Serialize)]
pub struct MonthlyStatusResponse {
    /// Project code.
    pub proj_id: String,
    /// Project name.
    pub proj_name: String,
    /// Department code.
    pub dept_code: String,
    /// Vendor reference.
    pub vendor_id: Option<String>,
    /// Planned budget.
    pub plan_amt: Decimal,
    /// Actual spend.
    pub actual_amt: Decimal,
    /// Operator forecast.
    pub est_amt: Decimal,
}

/// Request body for a forecast update.
#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    /// Project code.
    pub proj_id: String,
    /// Month, `yyyymm`.
    pub yyyymm: YearMonth,
    /// New forecast amount.
    pub est_amt: Decimal,
}

/// Request body for finalizing a month.
#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    /// Month, `yyyymm`.
    pub yyyymm: YearMonth,
}

/// GET `/execution/{yyyymm}` - all projects against one month's records.
async fn monthly_status(
    State(state): State<AppState>,
    Path(yyyymm): Path<String>,
) -> Result<Json<Vec<MonthlyStatusResponse>>, ApiError> {
    let month = YearMonth::parse(&yyyymm).map_err(|e| validation(e.to_string()))?;

    let repo = MonthlyRepository::new((*state.db).clone());
    let rows = repo.monthly_status(&month).await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| MonthlyStatusResponse {
                proj_id: row.proj_id,
                proj_name: row.proj_name,
                dept_code: row.dept_code,
                vendor_id: row.vendor_id,
                plan_amt: row.plan_amt,
                actual_amt: row.actual_amt,
                est_amt: row.est_amt,
            })
            .collect(),
    ))
}

/// POST `/execution/forecast` - set a forecast amount; blocked for closed
/// months.
async fn update_forecast(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<Value>, ApiError> {
    let repo = MonthlyRepository::new((*state.db).clone());
    repo.update_forecast(&req.proj_id, &req.yyyymm, req.est_amt)
        .await?;
    Ok(Json(json!({ "status": "success" })))
}

/// POST `/execution/finalize` - flag every record of a month as finalized.
async fn finalize_month(
    State(state): State<AppState>,
    Json(req): Json<FinalizeRequest>,
) -> Result<Json<Value>, ApiError> {
    let repo = MonthlyRepository::new((*state.db).clone());
    let rows = repo.finalize_month(&req.yyyymm).await?;
    Ok(Json(json!({
        "status": "success",
        "message": format!("{} records finalized for {}", rows, req.yyyymm),
    })))
}
