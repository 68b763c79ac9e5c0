//! Reconciliation of staged ledger lines against the project master.
//!
//! Matching extracts a project identifier from free text; aggregation folds
//! matched amounts into per-project monthly actuals. Both are pure: the
//! persistence layer feeds rows in and writes the diff out, which keeps
//! every re-run idempotent.

pub mod aggregate;
pub mod matching;

pub use aggregate::{ActualKey, ActualWrite, MappedLine, aggregate_actuals, diff_actuals};
pub use matching::extract_project_ref;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
