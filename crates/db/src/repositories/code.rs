//! Budget classification code repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use opexhub_core::master::next_code_id;
use opexhub_shared::AppError;

use crate::entities::budget_codes;

/// Code type whose members can parent other codes.
const PARENT_CODE_TYPE: &str = "BUDGET_L1";

/// Error types for classification code operations.
#[derive(Debug, thiserror::Error)]
pub enum CodeError {
    /// Code not found.
    #[error("classification code not found: {0}")]
    NotFound(String),

    /// The code still has child codes and cannot be deleted.
    #[error("code {0} has child codes and cannot be deleted")]
    HasChildren(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CodeError> for AppError {
    fn from(err: CodeError) -> Self {
        match err {
            CodeError::NotFound(id) => Self::NotFound(format!("classification code {id}")),
            CodeError::HasChildren(id) => {
                Self::Validation(format!("code {id} has child codes and cannot be deleted"))
            }
            CodeError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a classification code.
#[derive(Debug, Clone)]
pub struct CreateCodeInput {
    /// Code type, e.g. `BUDGET_L1`, `BUDGET_L2`, `IT_TYPE`.
    pub code_type: String,
    /// Display name.
    pub name: String,
    /// Parent code for hierarchical types.
    pub parent_code_id: Option<String>,
    /// Active flag.
    pub is_active: bool,
}

/// Input for updating a classification code.
#[derive(Debug, Clone, Default)]
pub struct UpdateCodeInput {
    /// New display name.
    pub name: Option<String>,
    /// New parent code.
    pub parent_code_id: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Classification code repository.
#[derive(Debug)]
pub struct CodeRepository {
    db: DatabaseConnection,
}

impl CodeRepository {
    /// Creates a new code repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active codes, optionally filtered by type, in sort order.
    pub async fn list(
        &self,
        code_type: Option<&str>,
    ) -> Result<Vec<budget_codes::Model>, CodeError> {
        let mut query = budget_codes::Entity::find()
            .filter(budget_codes::Column::IsActive.eq(true));
        if let Some(code_type) = code_type {
            query = query.filter(budget_codes::Column::CodeType.eq(code_type));
        }
        Ok(query
            .order_by_asc(budget_codes::Column::SortOrder)
            .order_by_asc(budget_codes::Column::CodeId)
            .all(&self.db)
            .await?)
    }

    /// Creates a code with the next sequential id for its type.
    pub async fn create(&self, input: CreateCodeInput) -> Result<budget_codes::Model, CodeError> {
        let last = budget_codes::Entity::find()
            .filter(budget_codes::Column::CodeType.eq(&input.code_type))
            .order_by_desc(budget_codes::Column::CodeId)
            .one(&self.db)
            .await?;

        let code_id = next_code_id(&input.code_type, last.as_ref().map(|c| c.code_id.as_str()));

        let code = budget_codes::ActiveModel {
            code_id: Set(code_id.into_inner()),
            code_name: Set(input.name),
            parent_code_id: Set(input.parent_code_id),
            code_type: Set(input.code_type),
            sort_order: Set(0),
            is_active: Set(input.is_active),
            created_at: Set(Utc::now().into()),
        };
        Ok(code.insert(&self.db).await?)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        code_id: &str,
        input: UpdateCodeInput,
    ) -> Result<budget_codes::Model, CodeError> {
        let existing = budget_codes::Entity::find_by_id(code_id.to_owned())
            .one(&self.db)
            .await?
            .ok_or_else(|| CodeError::NotFound(code_id.to_string()))?;

        let mut code: budget_codes::ActiveModel = existing.into();
        if let Some(name) = input.name {
            code.code_name = Set(name);
        }
        if let Some(parent) = input.parent_code_id {
            code.parent_code_id = Set(Some(parent));
        }
        if let Some(active) = input.is_active {
            code.is_active = Set(active);
        }
        Ok(code.update(&self.db).await?)
    }

    /// Deletes a code; parents with live children are rejected.
    pub async fn delete(&self, code_id: &str) -> Result<(), CodeError> {
        let existing = budget_codes::Entity::find_by_id(code_id.to_owned())
            .one(&self.db)
            .await?
            .ok_or_else(|| CodeError::NotFound(code_id.to_string()))?;

        if existing.code_type == PARENT_CODE_TYPE {
            let child = budget_codes::Entity::find()
                .filter(budget_codes::Column::ParentCodeId.eq(code_id))
                .one(&self.db)
                .await?;
            if child.is_some() {
                return Err(CodeError::HasChildren(code_id.to_string()));
            }
        }

        existing.delete(&self.db).await?;
        Ok(())
    }
}
