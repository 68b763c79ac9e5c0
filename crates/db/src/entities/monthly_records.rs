//! `SeaORM` Entity for the monthly plan/actual/estimate table.
//!
//! Exactly one row per `(proj_id, yyyymm)`, created lazily on first write.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub data_id: i64,
    pub proj_id: String,
    pub yyyymm: String,
    /// Planned budget (VAT excluded).
    pub plan_amt: Decimal,
    /// Actual spend, aggregated from reconciled ledger lines.
    pub actual_amt: Decimal,
    /// Operator forecast.
    pub est_amt: Decimal,
    pub confirmed_amt: Decimal,
    pub is_actual_finalized: bool,
    pub remark: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjId",
        to = "super::projects::Column::ProjId"
    )]
    Projects,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
