//! `SeaORM` Entity for the projects (master) table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Project code, `<dept>-<seq3>`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub proj_id: String,
    pub proj_name: String,
    pub fiscal_year: String,
    pub dept_code: String,
    /// Previous-year project code, for carried-over projects.
    pub prev_proj_id: Option<String>,
    pub continuity_status: Option<String>,
    pub status_prev_year: Option<String>,
    pub gl_account: Option<String>,
    pub gl_account_name: Option<String>,
    pub cost_center_code: Option<String>,
    pub cost_center_name: Option<String>,
    pub vendor_id: Option<String>,
    /// Vendor name as free text, before vendor-master mapping.
    pub vendor_name_text: Option<String>,
    pub svc_id: Option<String>,
    pub contract_period: Option<String>,
    pub budget_l2: Option<String>,
    pub budget_it_type: Option<String>,
    pub proj_status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub memo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorId",
        to = "super::vendors::Column::VendorId"
    )]
    Vendors,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::SvcId",
        to = "super::services::Column::SvcId"
    )]
    Services,
    #[sea_orm(has_many = "super::monthly_records::Entity")]
    MonthlyRecords,
    #[sea_orm(has_many = "super::raw_ledger_lines::Entity")]
    RawLedgerLines,
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Services.def()
    }
}

impl Related<super::monthly_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyRecords.def()
    }
}

impl Related<super::raw_ledger_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RawLedgerLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
