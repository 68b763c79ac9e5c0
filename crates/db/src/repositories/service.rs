//! Service master repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use opexhub_core::master::new_service_id;
use opexhub_shared::AppError;
use opexhub_shared::types::pagination::{PageRequest, PageResponse};

use crate::entities::services;

/// Error types for service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Service not found.
    #[error("service not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => Self::NotFound(format!("service {id}")),
            ServiceError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a service.
#[derive(Debug, Clone)]
pub struct CreateServiceInput {
    /// Service name.
    pub svc_name: String,
    /// Contract type.
    pub contract_type: Option<String>,
    /// Whether operators are resident on site.
    pub is_resident: bool,
    /// Operator names.
    pub operator_names: Option<String>,
    /// Active flag.
    pub is_active: bool,
}

/// Input for updating a service.
#[derive(Debug, Clone, Default)]
pub struct UpdateServiceInput {
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

/// Service repository.
#[derive(Debug)]
pub struct ServiceRepository {
    db: DatabaseConnection,
}

impl ServiceRepository {
    /// Creates a new service repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists services, newest first.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<services::Model>, ServiceError> {
        let total = services::Entity::find().count(&self.db).await?;
        let data = services::Entity::find()
            .order_by_desc(services::Column::CreatedAt)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?;
        Ok(PageResponse { data, total })
    }

    /// Creates a service with a generated id.
    pub async fn create(&self, input: CreateServiceInput) -> Result<services::Model, ServiceError> {
        let now = Utc::now().into();
        let service = services::ActiveModel {
            svc_id: Set(new_service_id().into_inner()),
            svc_name: Set(input.svc_name),
            contract_type: Set(input.contract_type),
            is_resident: Set(input.is_resident),
            operator_names: Set(input.operator_names),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(service.insert(&self.db).await?)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        svc_id: &str,
        input: UpdateServiceInput,
    ) -> Result<services::Model, ServiceError> {
        let existing = services::Entity::find_by_id(svc_id.to_owned())
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(svc_id.to_string()))?;

        let mut service: services::ActiveModel = existing.into();
        if let Some(name) = input.svc_name {
            service.svc_name = Set(name);
        }
        if let Some(contract_type) = input.contract_type {
            service.contract_type = Set(Some(contract_type));
        }
        if let Some(resident) = input.is_resident {
            service.is_resident = Set(resident);
        }
        if let Some(operators) = input.operator_names {
            service.operator_names = Set(Some(operators));
        }
        if let Some(active) = input.is_active {
            service.is_active = Set(active);
        }
        service.updated_at = Set(Utc::now().into());
        Ok(service.update(&self.db).await?)
    }
}
