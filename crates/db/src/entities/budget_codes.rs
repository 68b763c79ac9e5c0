//! `SeaORM` Entity for the budget classification code table.
//!
//! A small hierarchy: `BUDGET_L2` codes point at a `BUDGET_L1` parent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code_id: String,
    pub code_name: String,
    pub parent_code_id: Option<String>,
    pub code_type: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
