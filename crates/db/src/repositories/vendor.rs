//! Vendor master repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use opexhub_core::master::new_vendor_id;
use opexhub_shared::AppError;
use opexhub_shared::types::pagination::{PageRequest, PageResponse};

use crate::entities::vendors;

/// Error types for vendor operations.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    /// The business registration number is already registered.
    #[error("business registration number already registered: {0}")]
    DuplicateBizRegNo(String),

    /// Vendor not found.
    #[error("vendor not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<VendorError> for AppError {
    fn from(err: VendorError) -> Self {
        match err {
            VendorError::DuplicateBizRegNo(no) => {
                Self::Conflict(format!("business registration number already registered: {no}"))
            }
            VendorError::NotFound(id) => Self::NotFound(format!("vendor {id}")),
            VendorError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a vendor.
#[derive(Debug, Clone)]
pub struct CreateVendorInput {
    /// Vendor name.
    pub vendor_name: String,
    /// Business registration number (natural key).
    pub biz_reg_no: String,
    /// SAP vendor code.
    pub sap_vendor_cd: Option<String>,
    /// Alias used for free-text matching aids.
    pub vendor_alias: Option<String>,
    /// Active flag.
    pub is_active: bool,
}

/// Input for updating a vendor.
#[derive(Debug, Clone, Default)]
pub struct UpdateVendorInput {
    /// New name.
    pub vendor_name: Option<String>,
    /// New SAP vendor code.
    pub sap_vendor_cd: Option<String>,
    /// New alias.
    pub vendor_alias: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Vendor repository.
#[derive(Debug)]
pub struct VendorRepository {
    db: DatabaseConnection,
}

impl VendorRepository {
    /// Creates a new vendor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists vendors, newest first.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<vendors::Model>, VendorError> {
        let total = vendors::Entity::find().count(&self.db).await?;
        let data = vendors::Entity::find()
            .order_by_desc(vendors::Column::CreatedAt)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?;
        Ok(PageResponse { data, total })
    }

    /// Creates a vendor with a generated id.
    pub async fn create(&self, input: CreateVendorInput) -> Result<vendors::Model, VendorError> {
        let existing = vendors::Entity::find()
            .filter(vendors::Column::BizRegNo.eq(&input.biz_reg_no))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(VendorError::DuplicateBizRegNo(input.biz_reg_no));
        }

        let now = Utc::now().into();
        let vendor = vendors::ActiveModel {
            vendor_id: Set(new_vendor_id().into_inner()),
            biz_reg_no: Set(input.biz_reg_no),
            vendor_name: Set(input.vendor_name),
            sap_vendor_cd: Set(input.sap_vendor_cd),
            vendor_alias: Set(input.vendor_alias),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(vendor.insert(&self.db).await?)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        vendor_id: &str,
        input: UpdateVendorInput,
    ) -> Result<vendors::Model, VendorError> {
        let existing = vendors::Entity::find_by_id(vendor_id.to_owned())
            .one(&self.db)
            .await?
            .ok_or_else(|| VendorError::NotFound(vendor_id.to_string()))?;

        let mut vendor: vendors::ActiveModel = existing.into();
        if let Some(name) = input.vendor_name {
            vendor.vendor_name = Set(name);
        }
        if let Some(code) = input.sap_vendor_cd {
            vendor.sap_vendor_cd = Set(Some(code));
        }
        if let Some(alias) = input.vendor_alias {
            vendor.vendor_alias = Set(Some(alias));
        }
        if let Some(active) = input.is_active {
            vendor.is_active = Set(active);
        }
        vendor.updated_at = Set(Utc::now().into());
        Ok(vendor.update(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    #[tokio::test]
    async fn test_duplicate_biz_reg_no_is_a_conflict() {
        let existing = vendors::Model {
            vendor_id: "V1A2B".to_string(),
            biz_reg_no: "120-81-00001".to_string(),
            vendor_name: "Hanbit Systems".to_string(),
            sap_vendor_cd: None,
            vendor_alias: None,
            is_active: true,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .into_connection();

        let err = VendorRepository::new(db)
            .create(CreateVendorInput {
                vendor_name: "Other".to_string(),
                biz_reg_no: "120-81-00001".to_string(),
                sap_vendor_cd: None,
                vendor_alias: None,
                is_active: true,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, VendorError::DuplicateBizRegNo(no) if no == "120-81-00001"));
    }
}
