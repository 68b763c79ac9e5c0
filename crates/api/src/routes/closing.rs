//! Monthly closing routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ApiError, validation};
use crate::AppState;
use opexhub_core::period::PeriodState;
use opexhub_db::repositories::period::PeriodRepository;
use opexhub_shared::YearMonth;

/// Creates the closing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/closing/status/{yyyymm}", get(closing_status))
        .route("/closing/update", post(update_closing))
}

/// Request body for closing or reopening a month.
#[derive(Debug, Deserialize)]
pub struct ClosingUpdateRequest {
    /// Month, `yyyymm`.
    pub yyyymm: YearMonth,
    /// Target status, `OPEN` or `CLOSED`.
    pub status: String,
    /// Operator id.
    #[serde(default = "default_actor")]
    pub user_id: String,
}

fn default_actor() -> String {
    "admin".to_string()
}

/// GET `/closing/status/{yyyymm}` - closing status; months without a record
/// report OPEN.
async fn closing_status(
    State(state): State<AppState>,
    Path(yyyymm): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let month = YearMonth::parse(&yyyymm).map_err(|e| validation(e.to_string()))?;

    let repo = PeriodRepository::new((*state.db).clone());
    let view = repo.status(&month).await?;

    Ok(Json(json!({
        "yyyymm": view.yyyymm,
        "status": view.state.to_string(),
        "closed_by": view.closed_by,
        "closed_at": view.closed_at,
    })))
}

/// POST `/closing/update` - close or reopen a month, unconditionally.
async fn update_closing(
    State(state): State<AppState>,
    Json(req): Json<ClosingUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    let status: PeriodState = req
        .status
        .parse()
        .map_err(|_| validation(format!("status must be OPEN or CLOSED, got {}", req.status)))?;

    let repo = PeriodRepository::new((*state.db).clone());
    let persisted = repo.set_status(&req.yyyymm, status, &req.user_id).await?;

    let message = if persisted {
        format!("{} set to {status}", req.yyyymm)
    } else {
        format!("{} is already OPEN", req.yyyymm)
    };
    Ok(Json(json!({ "status": "success", "message": message })))
}
