//! Reconciliation engine: matches staged ledger lines to projects and syncs
//! aggregated actuals into the monthly store.
//!
//! Matching and aggregation are pure (`opexhub_core::reconcile`); this
//! repository feeds them rows and persists the diff. Re-running either entry
//! point is safe: matching only moves UNMAPPED rows forward and the actuals
//! sync writes full sums, not deltas.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};

use opexhub_core::reconcile::{MappedLine, aggregate_actuals, diff_actuals, extract_project_ref};
use opexhub_shared::types::ProjectId;
use opexhub_shared::{AppError, YearMonth};

use crate::entities::raw_ledger_lines::{self, MappingStatus};
use crate::entities::{monthly_records, projects};

/// Error types for reconciliation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Manual mapping targeted a project the master registry lacks.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// A stored row carries a month key that no longer parses.
    #[error("corrupt month key on staged row: {0}")]
    CorruptMonthKey(String),

    /// A row is flagged MAPPED but carries no target project.
    #[error("raw row {0} is MAPPED without a project")]
    MappedWithoutProject(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReconcileError> for AppError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::ProjectNotFound(id) => Self::NotFound(format!("project {id}")),
            ReconcileError::CorruptMonthKey(key) => {
                Self::Internal(format!("corrupt month key on staged row: {key}"))
            }
            ReconcileError::MappedWithoutProject(raw_id) => {
                Self::Internal(format!("raw row {raw_id} is MAPPED without a project"))
            }
            ReconcileError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Counters reported by an automatic matching run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct AutoMatchSummary {
    /// Unmapped rows scanned.
    pub scanned: u64,
    /// Rows newly matched to a project.
    pub matched: u64,
}

/// Reconciliation repository.
#[derive(Debug)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Runs automatic matching over every UNMAPPED staged row.
    ///
    /// Single pass, first match, case-sensitive: an extracted identifier
    /// maps the row only when that project exists. Rows without a usable
    /// identifier stay UNMAPPED and remain eligible for future runs.
    pub async fn run_auto_matching(&self) -> Result<AutoMatchSummary, ReconcileError> {
        let unmapped = raw_ledger_lines::Entity::find()
            .filter(raw_ledger_lines::Column::MappingStatus.eq(MappingStatus::Unmapped))
            .all(&self.db)
            .await?;

        let known: HashSet<String> = projects::Entity::find()
            .select_only()
            .column(projects::Column::ProjId)
            .into_tuple::<String>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        let txn = self.db.begin().await?;
        let mut summary = AutoMatchSummary {
            scanned: unmapped.len() as u64,
            matched: 0,
        };

        for row in unmapped {
            let Some(proj_id) = extract_project_ref(&row.header_text) else {
                continue;
            };
            if !known.contains(proj_id) {
                continue;
            }
            let proj_id = proj_id.to_owned();
            let mut line: raw_ledger_lines::ActiveModel = row.into();
            line.mapped_proj_id = Set(Some(proj_id));
            line.mapping_status = Set(MappingStatus::Mapped);
            line.update(&txn).await?;
            summary.matched += 1;
        }

        if summary.matched > 0 {
            sync_actuals(&txn).await?;
        }
        txn.commit().await?;

        tracing::info!(
            scanned = summary.scanned,
            matched = summary.matched,
            "automatic mapping run finished"
        );
        Ok(summary)
    }

    /// Force-maps the selected staged rows to one target project,
    /// overriding any automatic result, then re-syncs actuals.
    pub async fn manual_map(
        &self,
        raw_ids: Vec<i64>,
        target_proj_id: &str,
    ) -> Result<u64, ReconcileError> {
        projects::Entity::find_by_id(target_proj_id.to_owned())
            .one(&self.db)
            .await?
            .ok_or_else(|| ReconcileError::ProjectNotFound(target_proj_id.to_string()))?;

        let txn = self.db.begin().await?;

        let result = raw_ledger_lines::Entity::update_many()
            .col_expr(
                raw_ledger_lines::Column::MappedProjId,
                sea_orm::sea_query::Expr::value(Some(target_proj_id.to_owned())),
            )
            .col_expr(
                raw_ledger_lines::Column::MappingStatus,
                sea_orm::sea_query::Expr::value(MappingStatus::Mapped),
            )
            .filter(raw_ledger_lines::Column::RawId.is_in(raw_ids))
            .exec(&txn)
            .await?;

        sync_actuals(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            target = target_proj_id,
            rows = result.rows_affected,
            "manual mapping applied"
        );
        Ok(result.rows_affected)
    }
}

/// Recomputes actuals from all MAPPED rows and writes the diff.
///
/// Full recomputation makes the sync idempotent; diffing against stored
/// values keeps the write set down to pairs that actually changed. By
/// decision this path is not period-gated: SAP actuals are the upstream
/// source of truth and may land in a closed month.
async fn sync_actuals<C: ConnectionTrait>(conn: &C) -> Result<(), ReconcileError> {
    let mapped = raw_ledger_lines::Entity::find()
        .filter(raw_ledger_lines::Column::MappingStatus.eq(MappingStatus::Mapped))
        .all(conn)
        .await?;

    let mut lines = Vec::with_capacity(mapped.len());
    for row in &mapped {
        let Some(proj_id) = row.mapped_proj_id.as_deref() else {
            return Err(ReconcileError::MappedWithoutProject(row.raw_id));
        };
        let month = YearMonth::parse(&row.yyyymm)
            .map_err(|_| ReconcileError::CorruptMonthKey(row.yyyymm.clone()))?;
        lines.push(MappedLine {
            proj_id: ProjectId::new(proj_id),
            month,
            amount: row.amt_val,
        });
    }

    let totals = aggregate_actuals(&lines);

    let affected_projects: HashSet<String> = totals
        .keys()
        .map(|(proj_id, _)| proj_id.as_str().to_owned())
        .collect();
    let existing = monthly_records::Entity::find()
        .filter(monthly_records::Column::ProjId.is_in(affected_projects))
        .all(conn)
        .await?;

    let mut by_key: HashMap<(ProjectId, YearMonth), monthly_records::Model> = HashMap::new();
    let mut stored = HashMap::new();
    for record in existing {
        let month = YearMonth::parse(&record.yyyymm)
            .map_err(|_| ReconcileError::CorruptMonthKey(record.yyyymm.clone()))?;
        let key = (ProjectId::new(record.proj_id.clone()), month);
        stored.insert(key.clone(), record.actual_amt);
        by_key.insert(key, record);
    }

    let now = Utc::now().into();
    for write in diff_actuals(&totals, &stored) {
        let key = (write.proj_id.clone(), write.month.clone());
        match by_key.remove(&key) {
            Some(model) => {
                let mut record: monthly_records::ActiveModel = model.into();
                record.actual_amt = Set(write.actual_amt);
                record.updated_at = Set(now);
                record.update(conn).await?;
            }
            None => {
                let record = monthly_records::ActiveModel {
                    proj_id: Set(write.proj_id.into_inner()),
                    yyyymm: Set(write.month.into()),
                    actual_amt: Set(write.actual_amt),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                record.insert(conn).await?;
            }
        }
    }

    Ok(())
}
