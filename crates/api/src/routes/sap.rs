//! SAP ledger ingestion and reconciliation routes.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ApiError, validation};
use crate::sheet::Sheet;
use crate::AppState;
use opexhub_core::ingest::{RawLedgerRow, normalize_line};
use opexhub_db::repositories::raw_ledger::RawLedgerRepository;
use opexhub_db::repositories::reconciliation::ReconciliationRepository;

// SAP export column labels (Korean business headers).
const COL_SLIP_NO: &str = "전표 번호";
const COL_POSTING_DATE: &str = "전기일";
const COL_AMOUNT: &str = "금액(현지 통화)";
const COL_LINE_ITEM: &str = "개별 항목";
const COL_FISCAL_YEAR: &str = "회계연도";
const COL_GL_ACCOUNT: &str = "G/L 계정";
const COL_GL_DESC: &str = "G/L 계정과목명";
const COL_HEADER_TEXT: &str = "텍스트";
const COL_CURRENCY: &str = "현지 통화";
const COL_VENDOR_TEXT: &str = "상계계정 명칭";
const COL_REF_KEY: &str = "참조 키(헤더) 1";
const COL_COST_CENTER: &str = "코스트 센터";

/// Creates the SAP routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sap/upload", post(upload_ledger))
        .route("/sap/run-mapping", post(run_mapping))
        .route("/sap/unmapped", get(list_unmapped))
        .route("/sap/manual-map", post(manual_map))
}

/// Request body for manual mapping.
#[derive(Debug, Deserialize)]
pub struct ManualMapRequest {
    /// Selected staged row ids.
    pub raw_ids: Vec<i64>,
    /// Target project for every selected row.
    pub target_proj_id: String,
}

/// Reads the uploaded workbook out of a multipart body.
///
/// Accepts the first field carrying a filename; only `.xlsx`/`.xls` uploads
/// pass.
pub(crate) async fn read_workbook_field(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| validation(format!("malformed multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let lower = filename.to_lowercase();
        if !lower.ends_with(".xlsx") && !lower.ends_with(".xls") {
            return Err(validation("only .xlsx/.xls workbooks are accepted"));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| validation(format!("failed to read upload: {e}")))?;
        return Ok(bytes.to_vec());
    }
    Err(validation("multipart body carries no file field"))
}

/// POST `/sap/upload` - stage raw ledger lines from a workbook.
async fn upload_ledger(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let bytes = read_workbook_field(multipart).await?;
    let sheet = Sheet::parse(&bytes)?;

    let mut lines = Vec::new();
    let mut invalid = 0u64;
    for row in sheet.rows() {
        let raw = RawLedgerRow {
            slip_no: row.text(COL_SLIP_NO),
            posting_date: row.text(COL_POSTING_DATE),
            amount: row.text(COL_AMOUNT),
            line_item: row.text(COL_LINE_ITEM),
            fiscal_year: row.text(COL_FISCAL_YEAR),
            gl_account: row.text(COL_GL_ACCOUNT),
            gl_desc: row.text(COL_GL_DESC),
            header_text: row.text(COL_HEADER_TEXT),
            currency: row.text(COL_CURRENCY),
            vendor_text: row.text(COL_VENDOR_TEXT),
            ref_key: row.text(COL_REF_KEY),
            cost_center: row.text(COL_COST_CENTER),
        };
        match normalize_line(&raw) {
            Some(line) => lines.push(line),
            None => invalid += 1,
        }
    }

    let repo = RawLedgerRepository::new((*state.db).clone());
    let summary = repo.import(lines, invalid).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!(
            "processed {} rows ({} inserted, {} skipped as duplicates)",
            summary.total, summary.inserted, summary.skipped
        ),
        "summary": summary,
    })))
}

/// POST `/sap/run-mapping` - run automatic matching over unmapped rows and
/// sync actuals.
async fn run_mapping(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let repo = ReconciliationRepository::new((*state.db).clone());
    let summary = repo.run_auto_matching().await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("{} rows automatically mapped", summary.matched),
        "summary": summary,
    })))
}

/// GET `/sap/unmapped` - staged rows still waiting for a project.
async fn list_unmapped(
    State(state): State<AppState>,
) -> Result<Json<Vec<opexhub_db::entities::raw_ledger_lines::Model>>, ApiError> {
    let repo = RawLedgerRepository::new((*state.db).clone());
    Ok(Json(repo.unmapped().await?))
}

/// POST `/sap/manual-map` - force-map selected rows to one project.
async fn manual_map(
    State(state): State<AppState>,
    Json(req): Json<ManualMapRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.raw_ids.is_empty() {
        return Err(validation("raw_ids must not be empty"));
    }

    let repo = ReconciliationRepository::new((*state.db).clone());
    let mapped = repo.manual_map(req.raw_ids, &req.target_proj_id).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("{mapped} rows mapped to {}", req.target_proj_id),
    })))
}
