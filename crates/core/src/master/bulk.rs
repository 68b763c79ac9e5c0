//! Bulk project import row preparation.
//!
//! One spreadsheet row carries project master fields plus a plan amount per
//! six-digit month column. Required-field failures skip the row (counted by
//! the caller), never the batch.

use rust_decimal::Decimal;

use opexhub_shared::YearMonth;
use opexhub_shared::types::ProjectId;

use super::dept::derive_dept_code;

/// Raw cell values of one bulk import row.
#[derive(Debug, Clone, Default)]
pub struct BulkProjectRow {
    /// Project id column (`Index`).
    pub proj_id: Option<String>,
    /// Fiscal year column.
    pub fiscal_year: Option<String>,
    /// Project name column.
    pub proj_name: Option<String>,
    /// Cost-center name column; the department code derives from it.
    pub cost_center_name: Option<String>,
    /// Cost-center code column.
    pub cost_center_code: Option<String>,
    /// GL account column.
    pub gl_account: Option<String>,
    /// Vendor name free text.
    pub vendor_name_text: Option<String>,
    /// Previous-year project id.
    pub prev_proj_id: Option<String>,
    /// Continuity status (new / continued).
    pub continuity_status: Option<String>,
    /// Previous-year project status.
    pub status_prev_year: Option<String>,
    /// Contract period text.
    pub contract_period: Option<String>,
    /// Free-form memo.
    pub memo: Option<String>,
    /// Plan amounts by month column.
    pub plans: Vec<(YearMonth, Decimal)>,
}

/// A bulk row with required fields present and the department derived.
#[derive(Debug, Clone)]
pub struct PreparedProjectRow {
    /// Project id.
    pub proj_id: ProjectId,
    /// Fiscal year.
    pub fiscal_year: String,
    /// Project name.
    pub proj_name: String,
    /// Derived department code.
    pub dept_code: String,
    /// Cost-center name.
    pub cost_center_name: Option<String>,
    /// Cost-center code.
    pub cost_center_code: Option<String>,
    /// GL account.
    pub gl_account: Option<String>,
    /// Vendor name free text.
    pub vendor_name_text: Option<String>,
    /// Previous-year project id.
    pub prev_proj_id: Option<String>,
    /// Continuity status.
    pub continuity_status: Option<String>,
    /// Previous-year project status.
    pub status_prev_year: Option<String>,
    /// Contract period text.
    pub contract_period: Option<String>,
    /// Free-form memo.
    pub memo: Option<String>,
    /// Positive plan amounts by month.
    pub plans: Vec<(YearMonth, Decimal)>,
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Validates required fields and derives the department code.
///
/// Returns `None` when the row must be skipped: missing project id, fiscal
/// year, or name, or a cost-center name that maps to no department.
/// Non-positive plan cells are dropped.
#[must_use]
pub fn prepare_bulk_row(row: BulkProjectRow) -> Option<PreparedProjectRow> {
    let proj_id = required(row.proj_id)?;
    let fiscal_year = required(row.fiscal_year)?;
    let proj_name = required(row.proj_name)?;
    let dept_code = derive_dept_code(row.cost_center_name.as_deref())?.to_string();

    let plans = row
        .plans
        .into_iter()
        .filter(|(_, amt)| *amt > Decimal::ZERO)
        .collect();

    Some(PreparedProjectRow {
        proj_id: ProjectId::new(proj_id),
        fiscal_year,
        proj_name,
        dept_code,
        cost_center_name: row.cost_center_name,
        cost_center_code: row.cost_center_code,
        gl_account: row.gl_account,
        vendor_name_text: row.vendor_name_text,
        prev_proj_id: row.prev_proj_id,
        continuity_status: row.continuity_status,
        status_prev_year: row.status_prev_year,
        contract_period: row.contract_period,
        memo: row.memo,
        plans,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn month(raw: &str) -> YearMonth {
        YearMonth::parse(raw).unwrap()
    }

    fn valid_row() -> BulkProjectRow {
        BulkProjectRow {
            proj_id: Some("A-001".into()),
            fiscal_year: Some("2025".into()),
            proj_name: Some("Infra maintenance".into()),
            cost_center_name: Some("IT운영팀".into()),
            plans: vec![
                (month("202501"), dec!(1000)),
                (month("202502"), dec!(0)),
                (month("202503"), dec!(500)),
            ],
            ..BulkProjectRow::default()
        }
    }

    #[test]
    fn test_prepare_valid_row() {
        let prepared = prepare_bulk_row(valid_row()).unwrap();
        assert_eq!(prepared.proj_id.as_str(), "A-001");
        assert_eq!(prepared.dept_code, "A");
        // Zero plan cells are dropped.
        assert_eq!(prepared.plans.len(), 2);
    }

    #[test]
    fn test_missing_required_field_skips() {
        let mut row = valid_row();
        row.proj_name = None;
        assert!(prepare_bulk_row(row).is_none());

        let mut row = valid_row();
        row.fiscal_year = Some("   ".into());
        assert!(prepare_bulk_row(row).is_none());
    }

    #[test]
    fn test_underivable_dept_skips() {
        let mut row = valid_row();
        row.cost_center_name = Some("총무팀".into());
        assert!(prepare_bulk_row(row).is_none());
    }
}
