//! Budget transfer repository.
//!
//! Debit, credit, and the audit log entry commit as one transaction. The
//! source and target rows are read under `SELECT ... FOR UPDATE` so two
//! concurrent transfers cannot both spend the same planned balance.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use opexhub_core::transfer as transfer_rules;
use opexhub_core::transfer::TransferError as TransferRuleError;
use opexhub_shared::{AppError, YearMonth};

use crate::entities::{budget_transfers, monthly_records};
use crate::repositories::period::{ClosingError, ensure_month_open};

/// Error types for transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The transfer month is closed.
    #[error(transparent)]
    Period(#[from] ClosingError),

    /// The transfer violates a balance rule.
    #[error(transparent)]
    Rule(#[from] TransferRuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::Period(e) => e.into(),
            TransferError::Rule(TransferRuleError::NonPositiveAmount(amount)) => {
                Self::Validation(format!("transfer amount must be positive, got {amount}"))
            }
            TransferError::Rule(TransferRuleError::InsufficientBalance {
                available,
                requested,
            }) => Self::InsufficientBalance(format!(
                "available {available}, requested {requested}"
            )),
            TransferError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for one budget transfer.
#[derive(Debug, Clone)]
pub struct TransferInput {
    /// Source project.
    pub from_proj_id: String,
    /// Target project.
    pub to_proj_id: String,
    /// Month the transfer applies to.
    pub yyyymm: YearMonth,
    /// Amount of planned budget to move.
    pub amount: Decimal,
    /// Reason text for the audit log.
    pub reason: Option<String>,
    /// Operator id.
    pub actor: Option<String>,
}

/// Transfer repository.
#[derive(Debug)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Executes a transfer: gate, lock, validate, debit, credit, log.
    pub async fn execute(
        &self,
        input: TransferInput,
    ) -> Result<budget_transfers::Model, TransferError> {
        ensure_month_open(&self.db, &input.yyyymm).await?;

        let txn = self.db.begin().await?;

        let source = monthly_records::Entity::find()
            .filter(monthly_records::Column::ProjId.eq(&input.from_proj_id))
            .filter(monthly_records::Column::Yyyymm.eq(input.yyyymm.as_str()))
            .lock_exclusive()
            .one(&txn)
            .await?;

        transfer_rules::validate(source.as_ref().map(|m| m.plan_amt), input.amount)?;
        // validate() has already rejected a missing source row.
        let source_row = source.ok_or(TransferRuleError::InsufficientBalance {
            available: Decimal::ZERO,
            requested: input.amount,
        })?;

        let target = monthly_records::Entity::find()
            .filter(monthly_records::Column::ProjId.eq(&input.to_proj_id))
            .filter(monthly_records::Column::Yyyymm.eq(input.yyyymm.as_str()))
            .lock_exclusive()
            .one(&txn)
            .await?;

        let target_plan = target.as_ref().map_or(Decimal::ZERO, |m| m.plan_amt);
        let (new_source_plan, new_target_plan) =
            transfer_rules::apply(source_row.plan_amt, target_plan, input.amount);

        let now = Utc::now().into();

        let mut source_record: monthly_records::ActiveModel = source_row.into();
        source_record.plan_amt = Set(new_source_plan);
        source_record.updated_at = Set(now);
        source_record.update(&txn).await?;

        match target {
            Some(model) => {
                let mut target_record: monthly_records::ActiveModel = model.into();
                target_record.plan_amt = Set(new_target_plan);
                target_record.updated_at = Set(now);
                target_record.update(&txn).await?;
            }
            None => {
                let target_record = monthly_records::ActiveModel {
                    proj_id: Set(input.to_proj_id.clone()),
                    yyyymm: Set(input.yyyymm.as_str().to_owned()),
                    plan_amt: Set(new_target_plan),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                target_record.insert(&txn).await?;
            }
        }

        let log = budget_transfers::ActiveModel {
            from_proj_id: Set(input.from_proj_id),
            to_proj_id: Set(input.to_proj_id),
            transfer_amount: Set(input.amount),
            transfer_yyyymm: Set(input.yyyymm.as_str().to_owned()),
            reason: Set(input.reason),
            transferred_by: Set(input.actor),
            transferred_at: Set(now),
            ..Default::default()
        };
        let log = log.insert(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            transfer_id = log.transfer_id,
            from = %log.from_proj_id,
            to = %log.to_proj_id,
            amount = %log.transfer_amount,
            month = %log.transfer_yyyymm,
            "budget transfer applied"
        );
        Ok(log)
    }

    /// Lists transfer log entries, newest first, optionally for one month.
    pub async fn history(
        &self,
        month: Option<&YearMonth>,
    ) -> Result<Vec<budget_transfers::Model>, TransferError> {
        let mut query = budget_transfers::Entity::find();
        if let Some(month) = month {
            query =
                query.filter(budget_transfers::Column::TransferYyyymm.eq(month.as_str()));
        }
        Ok(query
            .order_by_desc(budget_transfers::Column::TransferredAt)
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::entities::period_closings;

    use super::*;

    fn month(raw: &str) -> YearMonth {
        YearMonth::parse(raw).unwrap()
    }

    fn monthly_row(proj_id: &str, yyyymm: &str, plan: Decimal) -> monthly_records::Model {
        monthly_records::Model {
            data_id: 1,
            proj_id: proj_id.to_string(),
            yyyymm: yyyymm.to_string(),
            plan_amt: plan,
            actual_amt: dec!(0),
            est_amt: dec!(0),
            confirmed_amt: dec!(0),
            is_actual_finalized: false,
            remark: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn input(amount: Decimal) -> TransferInput {
        TransferInput {
            from_proj_id: "A-001".to_string(),
            to_proj_id: "A-002".to_string(),
            yyyymm: month("202501"),
            amount,
            reason: None,
            actor: Some("admin".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insufficient_balance_is_rejected_before_any_write() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // Period gate: no closing row, month is open.
            .append_query_results([Vec::<period_closings::Model>::new()])
            // Source row with less plan than requested.
            .append_query_results([vec![monthly_row("A-001", "202501", dec!(100))]])
            .into_connection();

        let err = TransferRepository::new(db)
            .execute(input(dec!(500)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TransferError::Rule(TransferRuleError::InsufficientBalance { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_source_row_is_insufficient() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<period_closings::Model>::new()])
            .append_query_results([Vec::<monthly_records::Model>::new()])
            .into_connection();

        let err = TransferRepository::new(db)
            .execute(input(dec!(1)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TransferError::Rule(TransferRuleError::InsufficientBalance { .. })
        ));
    }

    #[tokio::test]
    async fn test_closed_month_is_rejected() {
        let closed = period_closings::Model {
            yyyymm: "202501".to_string(),
            close_status: period_closings::CloseStatus::Closed,
            closed_by: Some("admin".to_string()),
            closed_at: Utc::now().into(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![closed]])
            .into_connection();

        let err = TransferRepository::new(db)
            .execute(input(dec!(1)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TransferError::Period(ClosingError::MonthClosed(_))
        ));
    }
}
