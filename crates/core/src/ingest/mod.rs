//! Raw SAP ledger line normalization.
//!
//! Uploaded workbook rows arrive as loose string cells. Normalization
//! produces a [`StagedLine`] ready for the staging table, or `None` for a
//! row missing its slip number or amount. Unparseable posting dates and
//! amounts never drop a row; they land on the named fallback constants and
//! are flagged so import results can report how much data needed them.

pub mod parse;
pub mod types;

pub use parse::{
    FALLBACK_MONTH, is_plan_month_column, parse_amount, parse_line_item, parse_plan_amount,
    posting_month,
};
pub use types::{ImportSummary, RawLedgerRow, StagedLine, normalize_line};
