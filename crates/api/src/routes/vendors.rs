//! Vendor master routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{ApiError, validation};
use crate::AppState;
use opexhub_db::repositories::vendor::{
    CreateVendorInput, UpdateVendorInput, VendorRepository,
};
use opexhub_shared::types::pagination::{PageRequest, PageResponse};

/// Creates the vendor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vendors", get(list_vendors).post(create_vendor))
        .route("/vendors/{vendor_id}", patch(update_vendor))
}

/// Request body for creating a vendor.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVendorRequest {
    /// Vendor name.
    #[validate(length(min = 1, max = 100))]
    pub vendor_name: String,
    /// Business registration number.
    #[validate(length(min = 1, max = 20))]
    pub biz_reg_no: String,
    /// SAP vendor code.
    pub sap_vendor_cd: Option<String>,
    /// Alias for free-text matching aids.
    pub vendor_alias: Option<String>,
    /// Active flag.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request body for updating a vendor.
#[derive(Debug, Deserialize)]
pub struct UpdateVendorRequest {
    /// New name.
    pub vendor_name: Option<String>,
    /// New SAP vendor code.
    pub sap_vendor_cd: Option<String>,
    /// New alias.
    pub vendor_alias: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// GET `/vendors` - list vendors.
async fn list_vendors(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<PageResponse<opexhub_db::entities::vendors::Model>>, ApiError> {
    let repo = VendorRepository::new((*state.db).clone());
    Ok(Json(repo.list(&page).await?))
}

/// POST `/vendors` - register a vendor.
async fn create_vendor(
    State(state): State<AppState>,
    Json(req): Json<CreateVendorRequest>,
) -> Result<Json<opexhub_db::entities::vendors::Model>, ApiError> {
    req.validate().map_err(|e| validation(e.to_string()))?;

    let repo = VendorRepository::new((*state.db).clone());
    let vendor = repo
        .create(CreateVendorInput {
            vendor_name: req.vendor_name,
            biz_reg_no: req.biz_reg_no,
            sap_vendor_cd: req.sap_vendor_cd,
            vendor_alias: req.vendor_alias,
            is_active: req.is_active,
        })
        .await?;
    Ok(Json(vendor))
}

/// PATCH `/vendors/{vendor_id}` - partial master edit.
async fn update_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    Json(req): Json<UpdateVendorRequest>,
) -> Result<Json<opexhub_db::entities::vendors::Model>, ApiError> {
    let repo = VendorRepository::new((*state.db).clone());
    let vendor = repo
        .update(
            &vendor_id,
            UpdateVendorInput {
                vendor_name: req.vendor_name,
                sap_vendor_cd: req.sap_vendor_cd,
                vendor_alias: req.vendor_alias,
                is_active: req.is_active,
            },
        )
        .await?;
    Ok(Json(vendor))
}
