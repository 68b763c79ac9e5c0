//! Service master routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{ApiError, validation};
use crate::AppState;
use opexhub_db::repositories::service::{
    CreateServiceInput, ServiceRepository, UpdateServiceInput,
};
use opexhub_shared::types::pagination::{PageRequest, PageResponse};

/// Creates the service routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services).post(create_service))
        .route("/services/{svc_id}", patch(update_service))
}

/// Request body for creating a service.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    /// Service name.
    #[validate(length(min = 1, max = 100))]
    pub svc_name: String,
    /// Contract type.
    pub contract_type: Option<String>,
    /// Whether operators are resident on site.
    #[serde(default)]
    pub is_resident: bool,
    /// Operator names.
    pub operator_names: Option<String>,
    /// Active flag.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request body for updating a service.
#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    /// New name.
    pub svc_name: Option<String>,
    /// New contract type.
    pub contract_type: Option<String>,
    /// New resident flag.
    pub is_resident: Option<bool>,
    /// New operator names.
    pub operator_names: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// GET `/services` - list services.
async fn list_services(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<opexhub_db::entities::services::Model>>, ApiError> {
    let repo = ServiceRepository::new((*state.db).clone());
    Ok(Json(repo.list(&page).await?))
}

/// POST `/services` - register a service.
async fn create_service(
    State(state): State<AppState>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<Json<opexhub_db::entities::services::Model>, ApiError> {
    req.validate().map_err(|e| validation(e.to_string()))?;

    let repo = ServiceRepository::new((*state.db).clone());
    let service = repo
        .create(CreateServiceInput {
            svc_name: req.svc_name,
            contract_type: req.contract_type,
            is_resident: req.is_resident,
            operator_names: req.operator_names,
            is_active: req.is_active,
        })
        .await?;
    Ok(Json(service))
}

/// PATCH `/services/{svc_id}` - partial master edit.
async fn update_service(
    State(state): State<AppState>,
    Path(svc_id): Path<String>,
    Json(req): Json<UpdateServiceRequest>,
) -> Result<Json<opexhub_db::entities::services::Model>, ApiError> {
    let repo = ServiceRepository::new((*state.db).clone());
    let service = repo
        .update(
            &svc_id,
            UpdateServiceInput {
                svc_name: req.svc_name,
                contract_type: req.contract_type,
                is_resident: req.is_resident,
                operator_names: req.operator_names,
                is_active: req.is_active,
            },
        )
        .await?;
    Ok(Json(service))
}
