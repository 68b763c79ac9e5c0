//! Actuals aggregation over mapped ledger lines.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use opexhub_shared::YearMonth;
use opexhub_shared::types::ProjectId;

/// Aggregation key: one project in one accounting month.
pub type ActualKey = (ProjectId, YearMonth);

/// A mapped staged line, reduced to what aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedLine {
    /// The project the line was matched to.
    pub proj_id: ProjectId,
    /// Accounting month of the line.
    pub month: YearMonth,
    /// Line amount.
    pub amount: Decimal,
}

/// One actuals overwrite the persistence adapter must apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualWrite {
    /// Target project.
    pub proj_id: ProjectId,
    /// Target month.
    pub month: YearMonth,
    /// New `actual_amt` value (full sum, not a delta).
    pub actual_amt: Decimal,
}

/// Reduces all currently mapped lines to the full actuals map.
///
/// The result is the complete sum per `(project, month)`; writing it as an
/// overwrite makes the sync idempotent regardless of how often it runs.
#[must_use]
pub fn aggregate_actuals<'a, I>(rows: I) -> BTreeMap<ActualKey, Decimal>
where
    I: IntoIterator<Item = &'a MappedLine>,
{
    let mut totals: BTreeMap<ActualKey, Decimal> = BTreeMap::new();
    for row in rows {
        let key = (row.proj_id.clone(), row.month.clone());
        *totals.entry(key).or_insert(Decimal::ZERO) += row.amount;
    }
    totals
}

/// Diffs the aggregate against stored `actual_amt` values.
///
/// Only pairs whose sum differs from storage (or that storage lacks) are
/// returned. Keys absent from the aggregate keep their stored value: a pair
/// only leaves the aggregate when its lines were remapped elsewhere, and
/// those lines surface under their new key.
#[must_use]
pub fn diff_actuals(
    target: &BTreeMap<ActualKey, Decimal>,
    stored: &HashMap<ActualKey, Decimal>,
) -> Vec<ActualWrite> {
    let mut writes = Vec::new();
    for (key, total) in target {
        if stored.get(key) != Some(total) {
            writes.push(ActualWrite {
                proj_id: key.0.clone(),
                month: key.1.clone(),
                actual_amt: *total,
            });
        }
    }
    writes
}
