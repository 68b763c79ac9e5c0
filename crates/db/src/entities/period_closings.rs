//! `SeaORM` Entity for the monthly closing table.
//!
//! A month with no row is OPEN; the repository resolves that default.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use opexhub_core::period::PeriodState;

/// Stored closing status of one month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum CloseStatus {
    /// Open for financial mutation.
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// Locked by finance.
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl From<CloseStatus> for PeriodState {
    fn from(status: CloseStatus) -> Self {
        match status {
            CloseStatus::Open => Self::Open,
            CloseStatus::Closed => Self::Closed,
        }
    }
}

impl From<PeriodState> for CloseStatus {
    fn from(state: PeriodState) -> Self {
        match state {
            PeriodState::Open => Self::Open,
            PeriodState::Closed => Self::Closed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "period_closings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub yyyymm: String,
    pub close_status: CloseStatus,
    pub closed_by: Option<String>,
    pub closed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
