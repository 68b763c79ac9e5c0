//! Project master repository.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use opexhub_core::master::{PreparedProjectRow, next_project_id};
use opexhub_shared::types::pagination::{PageRequest, PageResponse};
use opexhub_shared::{AppError, YearMonth};

use crate::entities::{monthly_records, projects, raw_ledger_lines};
use crate::repositories::period::{ClosingError, ensure_month_open};

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("project not found: {0}")]
    NotFound(String),

    /// Invalid input (e.g. malformed fiscal year).
    #[error("validation error: {0}")]
    Validation(String),

    /// The targeted month is closed.
    #[error(transparent)]
    Period(#[from] ClosingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => Self::NotFound(format!("project {id}")),
            ProjectError::Validation(msg) => Self::Validation(msg),
            ProjectError::Period(e) => e.into(),
            ProjectError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a single project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name.
    pub proj_name: String,
    /// Department code; drives id sequencing.
    pub dept_code: String,
    /// Fiscal year, four digits.
    pub fiscal_year: String,
    /// Optional vendor reference.
    pub vendor_id: Option<String>,
    /// Optional service reference.
    pub svc_id: Option<String>,
    /// Free-form memo.
    pub memo: Option<String>,
    /// Plan amounts for January onwards; index 0 is month 01.
    pub monthly_plans: Vec<Decimal>,
}

/// Counters reported by a bulk master upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BulkUpsertSummary {
    /// Rows in the workbook (prepared plus skipped).
    pub total: u64,
    /// Newly inserted projects.
    pub inserted: u64,
    /// Existing projects whose master fields were updated.
    pub updated: u64,
    /// Plan cells written.
    pub plan_cells: u64,
    /// Rows skipped for missing required fields.
    pub skipped: u64,
}

/// Project repository.
#[derive(Debug)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists projects, newest first.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<projects::Model>, ProjectError> {
        let total = projects::Entity::find().count(&self.db).await?;
        let data = projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .offset(page.skip)
            .limit(page.limit)
            .all(&self.db)
            .await?;
        Ok(PageResponse { data, total })
    }

    /// Creates a project with the next sequential id for its department,
    /// inserting one monthly plan row per provided amount.
    pub async fn create(&self, input: CreateProjectInput) -> Result<projects::Model, ProjectError> {
        let first_month = YearMonth::first_of_year(&input.fiscal_year)
            .map_err(|_| ProjectError::Validation(format!("bad fiscal year: {}", input.fiscal_year)))?;
        if input.monthly_plans.len() > 12 {
            return Err(ProjectError::Validation(
                "at most 12 monthly plan amounts".to_string(),
            ));
        }
        ensure_month_open(&self.db, &first_month).await?;

        let txn = self.db.begin().await?;

        let last = projects::Entity::find()
            .filter(projects::Column::DeptCode.eq(&input.dept_code))
            .order_by_desc(projects::Column::ProjId)
            .one(&txn)
            .await?;
        let proj_id = next_project_id(&input.dept_code, last.as_ref().map(|p| p.proj_id.as_str()));

        let now = Utc::now().into();
        let project = projects::ActiveModel {
            proj_id: Set(proj_id.into_inner()),
            proj_name: Set(input.proj_name),
            fiscal_year: Set(input.fiscal_year.clone()),
            dept_code: Set(input.dept_code),
            vendor_id: Set(input.vendor_id),
            svc_id: Set(input.svc_id),
            memo: Set(input.memo),
            proj_status: Set("PENDING".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let project = project.insert(&txn).await?;

        for (index, amount) in input.monthly_plans.iter().enumerate() {
            let month = YearMonth::parse(&format!("{}{:02}", input.fiscal_year, index + 1))
                .map_err(|e| ProjectError::Validation(e.to_string()))?;
            let record = monthly_records::ActiveModel {
                proj_id: Set(project.proj_id.clone()),
                yyyymm: Set(month.into()),
                plan_amt: Set(*amount),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            record.insert(&txn).await?;
        }

        txn.commit().await?;
        tracing::info!(proj_id = %project.proj_id, "project created");
        Ok(project)
    }

    /// Upserts projects and plan cells from a bulk master upload.
    ///
    /// `skipped` counts workbook rows already rejected during preparation.
    /// The whole batch is gated once, on the first row's fiscal-year opening
    /// month, and commits as one transaction.
    pub async fn bulk_upsert(
        &self,
        rows: Vec<PreparedProjectRow>,
        skipped: u64,
    ) -> Result<BulkUpsertSummary, ProjectError> {
        let mut summary = BulkUpsertSummary {
            total: rows.len() as u64 + skipped,
            skipped,
            ..BulkUpsertSummary::default()
        };

        let Some(first) = rows.first() else {
            return Ok(summary);
        };

        let first_month = YearMonth::first_of_year(&first.fiscal_year)
            .map_err(|_| ProjectError::Validation(format!("bad fiscal year: {}", first.fiscal_year)))?;
        ensure_month_open(&self.db, &first_month).await?;

        let txn = self.db.begin().await?;
        let now = Utc::now().into();

        for row in rows {
            let existing = projects::Entity::find()
                .filter(projects::Column::ProjId.eq(row.proj_id.as_str()))
                .filter(projects::Column::FiscalYear.eq(&row.fiscal_year))
                .one(&txn)
                .await?;

            let proj_id = row.proj_id.as_str().to_owned();

            if let Some(model) = existing {
                let mut project: projects::ActiveModel = model.into();
                project.proj_name = Set(row.proj_name);
                project.dept_code = Set(row.dept_code);
                project.cost_center_code = Set(row.cost_center_code);
                project.cost_center_name = Set(row.cost_center_name);
                project.gl_account = Set(row.gl_account);
                project.vendor_name_text = Set(row.vendor_name_text);
                project.prev_proj_id = Set(row.prev_proj_id);
                project.continuity_status = Set(row.continuity_status);
                project.status_prev_year = Set(row.status_prev_year);
                project.contract_period = Set(row.contract_period);
                project.memo = Set(row.memo);
                project.updated_at = Set(now);
                project.update(&txn).await?;
                summary.updated += 1;
            } else {
                let project = projects::ActiveModel {
                    proj_id: Set(proj_id.clone()),
                    proj_name: Set(row.proj_name),
                    fiscal_year: Set(row.fiscal_year),
                    dept_code: Set(row.dept_code),
                    cost_center_code: Set(row.cost_center_code),
                    cost_center_name: Set(row.cost_center_name),
                    gl_account: Set(row.gl_account),
                    vendor_name_text: Set(row.vendor_name_text),
                    prev_proj_id: Set(row.prev_proj_id),
                    continuity_status: Set(row.continuity_status),
                    status_prev_year: Set(row.status_prev_year),
                    contract_period: Set(row.contract_period),
                    memo: Set(row.memo),
                    proj_status: Set("PENDING".to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                project.insert(&txn).await?;
                summary.inserted += 1;
            }

            for (month, amount) in row.plans {
                upsert_plan_cell(&txn, &proj_id, &month, amount, now).await?;
                summary.plan_cells += 1;
            }
        }

        txn.commit().await?;
        tracing::info!(
            inserted = summary.inserted,
            updated = summary.updated,
            skipped = summary.skipped,
            "bulk project upload committed"
        );
        Ok(summary)
    }

    /// Deletes a project and its monthly rows.
    ///
    /// Rejected while any month carrying a row for this project is closed.
    /// Staged ledger lines mapped to the project revert to UNMAPPED.
    pub async fn delete(&self, proj_id: &str) -> Result<(), ProjectError> {
        let project = projects::Entity::find_by_id(proj_id.to_owned())
            .one(&self.db)
            .await?
            .ok_or_else(|| ProjectError::NotFound(proj_id.to_string()))?;

        let records = monthly_records::Entity::find()
            .filter(monthly_records::Column::ProjId.eq(proj_id))
            .all(&self.db)
            .await?;
        for record in &records {
            let month = YearMonth::parse(&record.yyyymm)
                .map_err(|e| ProjectError::Validation(e.to_string()))?;
            ensure_month_open(&self.db, &month).await?;
        }

        let txn = self.db.begin().await?;

        raw_ledger_lines::Entity::update_many()
            .col_expr(
                raw_ledger_lines::Column::MappedProjId,
                sea_orm::sea_query::Expr::value(Option::<String>::None),
            )
            .col_expr(
                raw_ledger_lines::Column::MappingStatus,
                sea_orm::sea_query::Expr::value(raw_ledger_lines::MappingStatus::Unmapped),
            )
            .filter(raw_ledger_lines::Column::MappedProjId.eq(proj_id))
            .exec(&txn)
            .await?;

        monthly_records::Entity::delete_many()
            .filter(monthly_records::Column::ProjId.eq(proj_id))
            .exec(&txn)
            .await?;

        project.delete(&txn).await?;
        txn.commit().await?;
        tracing::info!(proj_id, "project deleted");
        Ok(())
    }
}

/// Inserts or updates the plan amount of one `(project, month)` cell.
async fn upsert_plan_cell<C: sea_orm::ConnectionTrait>(
    conn: &C,
    proj_id: &str,
    month: &YearMonth,
    amount: Decimal,
    now: chrono::DateTime<chrono::FixedOffset>,
) -> Result<(), DbErr> {
    let existing = monthly_records::Entity::find()
        .filter(monthly_records::Column::ProjId.eq(proj_id))
        .filter(monthly_records::Column::Yyyymm.eq(month.as_str()))
        .one(conn)
        .await?;

    match existing {
        Some(model) => {
            let mut record: monthly_records::ActiveModel = model.into();
            record.plan_amt = Set(amount);
            record.updated_at = Set(now);
            record.update(conn).await?;
        }
        None => {
            let record = monthly_records::ActiveModel {
                proj_id: Set(proj_id.to_owned()),
                yyyymm: Set(month.as_str().to_owned()),
                plan_amt: Set(amount),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            record.insert(conn).await?;
        }
    }
    Ok(())
}
