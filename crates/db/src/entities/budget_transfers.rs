//! `SeaORM` Entity for the budget transfer audit log.
//!
//! Append-only: rows are immutable once written and survive project
//! deletion, so the project columns carry codes without foreign keys.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_transfers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub transfer_id: i64,
    pub from_proj_id: String,
    pub to_proj_id: String,
    pub transfer_amount: Decimal,
    pub transfer_yyyymm: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,
    pub transferred_by: Option<String>,
    pub transferred_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
