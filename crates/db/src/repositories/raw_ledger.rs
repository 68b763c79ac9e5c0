//! Raw SAP ledger staging repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use opexhub_core::ingest::{ImportSummary, StagedLine};
use opexhub_shared::AppError;

use crate::entities::raw_ledger_lines::{self, MappingStatus};

/// Error types for raw ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum RawLedgerError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RawLedgerError> for AppError {
    fn from(err: RawLedgerError) -> Self {
        match err {
            RawLedgerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Raw ledger staging repository.
#[derive(Debug)]
pub struct RawLedgerRepository {
    db: DatabaseConnection,
}

impl RawLedgerRepository {
    /// Creates a new raw ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Imports a batch of normalized lines with natural-key deduplication.
    ///
    /// `invalid` counts workbook rows that failed normalization upstream.
    /// One transaction for the whole batch: any persistence error rolls the
    /// batch back. Rows whose `(fiscal_year, slip_no, line_item)` already
    /// exists (including earlier in the same batch) count as skipped.
    pub async fn import(
        &self,
        lines: Vec<StagedLine>,
        invalid: u64,
    ) -> Result<ImportSummary, RawLedgerError> {
        let mut summary = ImportSummary {
            invalid,
            ..ImportSummary::default()
        };

        let txn = self.db.begin().await?;

        for line in lines {
            summary.total += 1;
            if line.used_fallback_month {
                summary.fallback_months += 1;
            }
            if line.used_fallback_amount {
                summary.fallback_amounts += 1;
            }

            let existing = raw_ledger_lines::Entity::find()
                .filter(raw_ledger_lines::Column::FiscalYear.eq(&line.fiscal_year))
                .filter(raw_ledger_lines::Column::SlipNo.eq(&line.slip_no))
                .filter(raw_ledger_lines::Column::LineItem.eq(line.line_item))
                .one(&txn)
                .await?;
            if existing.is_some() {
                summary.skipped += 1;
                continue;
            }

            let row = raw_ledger_lines::ActiveModel {
                yyyymm: Set(line.yyyymm.into()),
                fiscal_year: Set(line.fiscal_year),
                slip_no: Set(line.slip_no),
                line_item: Set(line.line_item),
                gl_account: Set(line.gl_account),
                gl_desc: Set(line.gl_desc),
                header_text: Set(line.header_text),
                amt_val: Set(line.amount),
                currency: Set(line.currency),
                vendor_text: Set(line.vendor_text),
                ref_key: Set(line.ref_key),
                cost_center: Set(line.cost_center),
                mapped_proj_id: Set(None),
                mapping_status: Set(MappingStatus::Unmapped),
                uploaded_at: Set(Utc::now().into()),
                ..Default::default()
            };
            row.insert(&txn).await?;
            summary.inserted += 1;
        }

        txn.commit().await?;
        tracing::info!(
            total = summary.total,
            inserted = summary.inserted,
            skipped = summary.skipped,
            invalid = summary.invalid,
            fallback_months = summary.fallback_months,
            "raw ledger batch imported"
        );
        Ok(summary)
    }

    /// Lists unmapped staged lines ordered by slip number.
    pub async fn unmapped(&self) -> Result<Vec<raw_ledger_lines::Model>, RawLedgerError> {
        Ok(raw_ledger_lines::Entity::find()
            .filter(raw_ledger_lines::Column::MappingStatus.eq(MappingStatus::Unmapped))
            .order_by_asc(raw_ledger_lines::Column::SlipNo)
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use opexhub_shared::YearMonth;

    use super::*;

    fn staged(slip_no: &str, line_item: i32, amount: Decimal) -> StagedLine {
        StagedLine {
            yyyymm: YearMonth::parse("202501").unwrap(),
            fiscal_year: "2025".to_string(),
            slip_no: slip_no.to_string(),
            line_item,
            gl_account: "6663600".to_string(),
            gl_desc: None,
            header_text: "[A-001] monthly fee".to_string(),
            amount,
            currency: "KRW".to_string(),
            vendor_text: None,
            ref_key: None,
            cost_center: None,
            used_fallback_month: false,
            used_fallback_amount: false,
        }
    }

    fn stored(raw_id: i64, line: &StagedLine) -> raw_ledger_lines::Model {
        raw_ledger_lines::Model {
            raw_id,
            yyyymm: line.yyyymm.as_str().to_owned(),
            fiscal_year: line.fiscal_year.clone(),
            slip_no: line.slip_no.clone(),
            line_item: line.line_item,
            gl_account: line.gl_account.clone(),
            gl_desc: None,
            header_text: line.header_text.clone(),
            amt_val: line.amount,
            currency: line.currency.clone(),
            vendor_text: None,
            ref_key: None,
            cost_center: None,
            mapped_proj_id: None,
            mapping_status: MappingStatus::Unmapped,
            uploaded_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_natural_key_is_skipped_and_first_amount_persists() {
        let first = staged("100", 1, dec!(1000));
        let second = staged("100", 1, dec!(999));
        let inserted = stored(1, &first);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // First row: no existing natural key.
            .append_query_results([Vec::<raw_ledger_lines::Model>::new()])
            // INSERT ... RETURNING for the first row.
            .append_query_results([vec![inserted.clone()]])
            // Second row: the first row already holds the key.
            .append_query_results([vec![inserted]])
            .into_connection();

        let summary = RawLedgerRepository::new(db)
            .import(vec![first, second], 0)
            .await
            .unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[tokio::test]
    async fn test_fallback_counters_are_reported() {
        let mut line = staged("200", 1, dec!(0));
        line.used_fallback_month = true;
        line.used_fallback_amount = true;
        let inserted = stored(1, &line);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<raw_ledger_lines::Model>::new()])
            .append_query_results([vec![inserted]])
            .into_connection();

        let summary = RawLedgerRepository::new(db)
            .import(vec![line], 3)
            .await
            .unwrap();

        assert_eq!(summary.invalid, 3);
        assert_eq!(summary.fallback_months, 1);
        assert_eq!(summary.fallback_amounts, 1);
    }
}
