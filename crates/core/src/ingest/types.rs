//! Staged ledger line types and row normalization.

use rust_decimal::Decimal;
use serde::Serialize;

use opexhub_shared::YearMonth;

use super::parse::{parse_amount, parse_line_item, posting_month};

/// Raw cell values of one uploaded SAP row.
#[derive(Debug, Clone, Default)]
pub struct RawLedgerRow {
    /// Slip number (required; empty means the row is invalid).
    pub slip_no: Option<String>,
    /// Posting date string.
    pub posting_date: Option<String>,
    /// Local-currency amount (required; missing means the row is invalid).
    pub amount: Option<String>,
    /// Accounting line item.
    pub line_item: Option<String>,
    /// Fiscal year.
    pub fiscal_year: Option<String>,
    /// GL account code.
    pub gl_account: Option<String>,
    /// GL account description.
    pub gl_desc: Option<String>,
    /// Free-text header (the matching target).
    pub header_text: Option<String>,
    /// Currency code.
    pub currency: Option<String>,
    /// Offsetting-account name (vendor text).
    pub vendor_text: Option<String>,
    /// Header reference key.
    pub ref_key: Option<String>,
    /// Cost center code.
    pub cost_center: Option<String>,
}

/// A normalized row ready for the staging table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedLine {
    /// Accounting month derived from the posting date.
    pub yyyymm: YearMonth,
    /// Fiscal year.
    pub fiscal_year: String,
    /// Slip number.
    pub slip_no: String,
    /// Accounting line item.
    pub line_item: i32,
    /// GL account code.
    pub gl_account: String,
    /// GL account description.
    pub gl_desc: Option<String>,
    /// Free-text header.
    pub header_text: String,
    /// Local-currency amount.
    pub amount: Decimal,
    /// Currency code.
    pub currency: String,
    /// Offsetting-account name.
    pub vendor_text: Option<String>,
    /// Header reference key.
    pub ref_key: Option<String>,
    /// Cost center code.
    pub cost_center: Option<String>,
    /// The posting date was unparseable and the sentinel month was used.
    pub used_fallback_month: bool,
    /// The amount was unparseable and fell back to zero.
    pub used_fallback_amount: bool,
}

/// Counters reported by a raw ledger import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Rows that passed required-field checks.
    pub total: u64,
    /// Newly inserted staged rows.
    pub inserted: u64,
    /// Rows skipped as duplicates of an existing natural key.
    pub skipped: u64,
    /// Rows rejected for a missing slip number or amount.
    pub invalid: u64,
    /// Rows parked on the sentinel month.
    pub fallback_months: u64,
    /// Rows whose amount fell back to zero.
    pub fallback_amounts: u64,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

/// Normalizes one uploaded row.
///
/// Returns `None` for an invalid row: empty slip number or missing amount
/// cell. Everything else normalizes, falling back where cells are
/// unparseable.
#[must_use]
pub fn normalize_line(row: &RawLedgerRow) -> Option<StagedLine> {
    let slip_no = non_empty(row.slip_no.as_deref())?;
    let amount_raw = row.amount.as_deref()?;

    let (yyyymm, used_fallback_month) = posting_month(row.posting_date.as_deref());
    let (amount, used_fallback_amount) = parse_amount(amount_raw);

    Some(StagedLine {
        yyyymm,
        fiscal_year: non_empty(row.fiscal_year.as_deref()).unwrap_or_default(),
        slip_no,
        line_item: parse_line_item(row.line_item.as_deref()),
        gl_account: non_empty(row.gl_account.as_deref()).unwrap_or_default(),
        gl_desc: non_empty(row.gl_desc.as_deref()),
        header_text: non_empty(row.header_text.as_deref()).unwrap_or_default(),
        amount,
        currency: non_empty(row.currency.as_deref()).unwrap_or_else(|| "KRW".to_string()),
        vendor_text: non_empty(row.vendor_text.as_deref()),
        ref_key: non_empty(row.ref_key.as_deref()),
        cost_center: non_empty(row.cost_center.as_deref()),
        used_fallback_month,
        used_fallback_amount,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_row() -> RawLedgerRow {
        RawLedgerRow {
            slip_no: Some("100".into()),
            posting_date: Some("2025-03-02".into()),
            amount: Some("1,500,000".into()),
            line_item: Some("1".into()),
            fiscal_year: Some("2025".into()),
            gl_account: Some("6663600".into()),
            header_text: Some("[A-001] monthly fee".into()),
            ..RawLedgerRow::default()
        }
    }

    #[test]
    fn test_normalize_valid_row() {
        let line = normalize_line(&valid_row()).unwrap();
        assert_eq!(line.yyyymm.as_str(), "202503");
        assert_eq!(line.slip_no, "100");
        assert_eq!(line.line_item, 1);
        assert_eq!(line.amount, dec!(1500000));
        assert_eq!(line.currency, "KRW");
        assert!(!line.used_fallback_month);
        assert!(!line.used_fallback_amount);
    }

    #[test]
    fn test_missing_slip_or_amount_is_invalid() {
        let mut row = valid_row();
        row.slip_no = Some("  ".into());
        assert!(normalize_line(&row).is_none());

        let mut row = valid_row();
        row.amount = None;
        assert!(normalize_line(&row).is_none());
    }

    #[test]
    fn test_fallbacks_are_flagged() {
        let mut row = valid_row();
        row.posting_date = Some("??".into());
        row.amount = Some("n/a".into());
        let line = normalize_line(&row).unwrap();
        assert_eq!(line.yyyymm.as_str(), super::super::FALLBACK_MONTH);
        assert_eq!(line.amount, Decimal::ZERO);
        assert!(line.used_fallback_month);
        assert!(line.used_fallback_amount);
    }
}
