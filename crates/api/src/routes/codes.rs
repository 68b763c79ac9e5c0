//! Budget classification code routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{ApiError, validation};
use crate::AppState;
use opexhub_db::repositories::code::{CodeRepository, CreateCodeInput, UpdateCodeInput};

/// Creates the classification code routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/codes", get(list_codes).post(create_code))
        .route(
            "/codes/{code_id}",
            axum::routing::patch(update_code).delete(delete_code),
        )
}

/// Query parameters for listing codes.
#[derive(Debug, Deserialize)]
pub struct ListCodesQuery {
    /// Restrict to one code type, e.g. `BUDGET_L1`.
    pub code_type: Option<String>,
}

/// Request body for creating a code.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCodeRequest {
    /// Code type, e.g. `BUDGET_L1`, `BUDGET_L2`, `IT_TYPE`.
    #[validate(length(min = 1, max = 50))]
    pub code_type: String,
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Parent code for hierarchical types.
    pub parent_code_id: Option<String>,
    /// Active flag.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request body for updating a code.
#[derive(Debug, Deserialize)]
pub struct UpdateCodeRequest {
    /// New display name.
    pub name: Option<String>,
    /// New parent code.
    pub parent_code_id: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// GET `/codes` - list active codes, optionally by type.
async fn list_codes(
    State(state): State<AppState>,
    Query(query): Query<ListCodesQuery>,
) -> Result<Json<Vec<opexhub_db::entities::budget_codes::Model>>, ApiError> {
    let repo = CodeRepository::new((*state.db).clone());
    Ok(Json(repo.list(query.code_type.as_deref()).await?))
}

/// POST `/codes` - create a code with the next sequential id for its type.
async fn create_code(
    State(state): State<AppState>,
    Json(req): Json<CreateCodeRequest>,
) -> Result<Json<opexhub_db::entities::budget_codes::Model>, ApiError> {
    req.validate().map_err(|e| validation(e.to_string()))?;

    let repo = CodeRepository::new((*state.db).clone());
    let code = repo
        .create(CreateCodeInput {
            code_type: req.code_type,
            name: req.name,
            parent_code_id: req.parent_code_id,
            is_active: req.is_active,
        })
        .await?;
    Ok(Json(code))
}

/// PATCH `/codes/{code_id}` - partial edit.
async fn update_code(
    State(state): State<AppState>,
    Path(code_id): Path<String>,
    Json(req): Json<UpdateCodeRequest>,
) -> Result<Json<opexhub_db::entities::budget_codes::Model>, ApiError> {
    let repo = CodeRepository::new((*state.db).clone());
    let code = repo
        .update(
            &code_id,
            UpdateCodeInput {
                name: req.name,
                parent_code_id: req.parent_code_id,
                is_active: req.is_active,
            },
        )
        .await?;
    Ok(Json(code))
}

/// DELETE `/codes/{code_id}` - delete; parents with children are rejected.
async fn delete_code(
    State(state): State<AppState>,
    Path(code_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let repo = CodeRepository::new((*state.db).clone());
    repo.delete(&code_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
