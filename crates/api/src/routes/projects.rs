//! Project master routes: CRUD, bulk upload, budget transfer.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::{ApiError, validation};
use crate::sheet::Sheet;
use crate::AppState;
use opexhub_core::ingest::{is_plan_month_column, parse_plan_amount};
use opexhub_core::master::{BulkProjectRow, prepare_bulk_row};
use opexhub_db::repositories::project::{CreateProjectInput, ProjectRepository};
use opexhub_db::repositories::transfer::{TransferInput, TransferRepository};
use opexhub_shared::types::pagination::{PageRequest, PageResponse};
use opexhub_shared::YearMonth;

// Bulk master workbook column labels (Korean business headers).
const COL_PROJ_ID: &str = "Index";
const COL_FISCAL_YEAR: &str = "연도";
const COL_PROJ_NAME: &str = "사업명";
const COL_CC_NAME: &str = "CC명칭";
const COL_CC_CODE: &str = "CC코드";
const COL_GL_ACCOUNT: &str = "계정";
const COL_VENDOR_NAME: &str = "협력업체명";
const COL_PREV_PROJ_ID: &str = "전년도 Index";
const COL_CONTINUITY: &str = "사업 연속성";
const COL_STATUS_PREV_YEAR: &str = "전년도 사업상태";
const COL_CONTRACT_PERIOD: &str = "계약기간";
const COL_MEMO: &str = "사업 메모";

/// Creates the project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{proj_id}", delete(delete_project))
        .route("/projects/bulk", post(bulk_upload))
        .route("/projects/transfer", post(execute_transfer))
        .route("/projects/transfers", get(list_transfers))
}

/// Request body for creating a single project.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name.
    #[validate(length(min = 1, max = 200))]
    pub proj_name: String,
    /// Department code.
    #[validate(length(min = 1, max = 10))]
    pub dept_code: String,
    /// Fiscal year, four digits.
    #[validate(length(equal = 4))]
    pub fiscal_year: String,
    /// Optional vendor reference.
    pub vendor_id: Option<String>,
    /// Optional service reference.
    pub svc_id: Option<String>,
    /// Free-form memo.
    pub memo: Option<String>,
    /// Plan amounts for January onwards.
    #[serde(default)]
    pub monthly_amounts: Vec<Decimal>,
}

/// Request body for a budget transfer.
#[derive(Debug, Deserialize, Validate)]
pub struct TransferRequest {
    /// Source project.
    #[validate(length(min = 1))]
    pub from_proj_id: String,
    /// Target project.
    #[validate(length(min = 1))]
    pub to_proj_id: String,
    /// Month the transfer applies to, `yyyymm`.
    pub transfer_yyyymm: YearMonth,
    /// Amount of planned budget to move.
    pub transfer_amount: Decimal,
    /// Reason text.
    pub reason: Option<String>,
    /// Operator id.
    pub transferred_by: Option<String>,
}

/// Query parameters for the transfer log.
#[derive(Debug, Deserialize)]
pub struct TransferHistoryQuery {
    /// Restrict to one month.
    pub yyyymm: Option<YearMonth>,
}

/// GET `/projects` - list projects.
async fn list_projects(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<opexhub_db::entities::projects::Model>>, ApiError> {
    let repo = ProjectRepository::new((*state.db).clone());
    Ok(Json(repo.list(&page).await?))
}

/// POST `/projects` - create a project with monthly plan rows.
async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<opexhub_db::entities::projects::Model>, ApiError> {
    req.validate().map_err(|e| validation(e.to_string()))?;

    let repo = ProjectRepository::new((*state.db).clone());
    let project = repo
        .create(CreateProjectInput {
            proj_name: req.proj_name,
            dept_code: req.dept_code,
            fiscal_year: req.fiscal_year,
            vendor_id: req.vendor_id,
            svc_id: req.svc_id,
            memo: req.memo,
            monthly_plans: req.monthly_amounts,
        })
        .await?;
    Ok(Json(project))
}

/// DELETE `/projects/{proj_id}` - remove a project and its monthly rows.
async fn delete_project(
    State(state): State<AppState>,
    Path(proj_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let repo = ProjectRepository::new((*state.db).clone());
    repo.delete(&proj_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/projects/bulk` - bulk master upload from a workbook.
async fn bulk_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let bytes = super::sap::read_workbook_field(multipart).await?;
    let sheet = Sheet::parse(&bytes)?;

    let month_columns: Vec<String> = sheet
        .headers()
        .iter()
        .filter(|h| is_plan_month_column(h))
        .cloned()
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0u64;
    for row in sheet.rows() {
        let plans = month_columns
            .iter()
            .filter_map(|column| {
                let month = YearMonth::parse(column).ok()?;
                Some((month, parse_plan_amount(row.text(column).as_deref())))
            })
            .collect();

        let raw = BulkProjectRow {
            proj_id: row.text(COL_PROJ_ID),
            fiscal_year: row.text(COL_FISCAL_YEAR),
            proj_name: row.text(COL_PROJ_NAME),
            cost_center_name: row.text(COL_CC_NAME),
            cost_center_code: row.text(COL_CC_CODE),
            gl_account: row.text(COL_GL_ACCOUNT),
            vendor_name_text: row.text(COL_VENDOR_NAME),
            prev_proj_id: row.text(COL_PREV_PROJ_ID),
            continuity_status: row.text(COL_CONTINUITY),
            status_prev_year: row.text(COL_STATUS_PREV_YEAR),
            contract_period: row.text(COL_CONTRACT_PERIOD),
            memo: row.text(COL_MEMO),
            plans,
        };

        match prepare_bulk_row(raw) {
            Some(prepared) => rows.push(prepared),
            None => skipped += 1,
        }
    }

    let repo = ProjectRepository::new((*state.db).clone());
    let summary = repo.bulk_upsert(rows, skipped).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!(
            "processed {} rows ({} inserted, {} updated, {} skipped)",
            summary.total, summary.inserted, summary.updated, summary.skipped
        ),
        "summary": summary,
    })))
}

/// POST `/projects/transfer` - move planned budget between two projects.
async fn execute_transfer(
    State(state): State<AppState>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<opexhub_db::entities::budget_transfers::Model>, ApiError> {
    req.validate().map_err(|e| validation(e.to_string()))?;

    let repo = TransferRepository::new((*state.db).clone());
    let log = repo
        .execute(TransferInput {
            from_proj_id: req.from_proj_id,
            to_proj_id: req.to_proj_id,
            yyyymm: req.transfer_yyyymm,
            amount: req.transfer_amount,
            reason: req.reason,
            actor: req.transferred_by,
        })
        .await?;
    Ok(Json(log))
}

/// GET `/projects/transfers` - transfer audit log, newest first.
async fn list_transfers(
    State(state): State<AppState>,
    Query(query): Query<TransferHistoryQuery>,
) -> Result<Json<Vec<opexhub_db::entities::budget_transfers::Model>>, ApiError> {
    let repo = TransferRepository::new((*state.db).clone());
    Ok(Json(repo.history(query.yyyymm.as_ref()).await?))
}
