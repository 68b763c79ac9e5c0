//! `SeaORM` Entity for staged SAP ledger lines.
//!
//! Natural key `(fiscal_year, slip_no, line_item)` enforces at-most-once
//! import of one accounting line. Rows are never deleted; reconciliation
//! only moves `mapping_status`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reconciliation state of a staged line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MappingStatus {
    /// Not yet matched to a project; eligible for retries.
    #[sea_orm(string_value = "UNMAPPED")]
    Unmapped,
    /// Matched (automatically or manually) to a project.
    #[sea_orm(string_value = "MAPPED")]
    Mapped,
    /// Excluded from matching by an operator.
    #[sea_orm(string_value = "IGNORED")]
    Ignored,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "raw_ledger_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub raw_id: i64,
    /// Accounting month derived from the posting date.
    pub yyyymm: String,
    pub fiscal_year: String,
    pub slip_no: String,
    pub line_item: i32,
    pub gl_account: String,
    pub gl_desc: Option<String>,
    /// Free-text header, the matching target.
    pub header_text: String,
    pub amt_val: Decimal,
    pub currency: String,
    /// Offsetting-account name (vendor text).
    pub vendor_text: Option<String>,
    pub ref_key: Option<String>,
    pub cost_center: Option<String>,
    pub mapped_proj_id: Option<String>,
    pub mapping_status: MappingStatus,
    pub uploaded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::MappedProjId",
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
