//! Property and scenario tests for reconciliation.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use opexhub_shared::YearMonth;
use opexhub_shared::types::ProjectId;

use super::aggregate::{MappedLine, aggregate_actuals, diff_actuals};
use super::matching::extract_project_ref;

fn month(raw: &str) -> YearMonth {
    YearMonth::parse(raw).unwrap()
}

fn line(proj: &str, m: &str, amount: Decimal) -> MappedLine {
    MappedLine {
        proj_id: ProjectId::new(proj),
        month: month(m),
        amount,
    }
}

#[test]
fn test_aggregate_sums_per_project_month() {
    let rows = vec![
        line("A-001", "202501", dec!(100)),
        line("A-001", "202501", dec!(50)),
        line("A-001", "202502", dec!(30)),
        line("B-002", "202501", dec!(7)),
    ];

    let totals = aggregate_actuals(&rows);

    assert_eq!(totals.len(), 3);
    assert_eq!(
        totals[&(ProjectId::new("A-001"), month("202501"))],
        dec!(150)
    );
    assert_eq!(totals[&(ProjectId::new("A-001"), month("202502"))], dec!(30));
    assert_eq!(totals[&(ProjectId::new("B-002"), month("202501"))], dec!(7));
}

#[test]
fn test_diff_writes_only_changed_pairs() {
    let rows = vec![
        line("A-001", "202501", dec!(150)),
        line("B-002", "202501", dec!(7)),
    ];
    let totals = aggregate_actuals(&rows);

    let stored: HashMap<_, _> = [
        ((ProjectId::new("A-001"), month("202501")), dec!(150)),
        ((ProjectId::new("B-002"), month("202501")), dec!(99)),
    ]
    .into_iter()
    .collect();

    let writes = diff_actuals(&totals, &stored);

    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].proj_id.as_str(), "B-002");
    assert_eq!(writes[0].actual_amt, dec!(7));
}

#[test]
fn test_diff_after_write_back_is_empty() {
    let rows = vec![
        line("A-001", "202501", dec!(150)),
        line("A-001", "202502", dec!(30)),
    ];
    let totals = aggregate_actuals(&rows);

    // Apply the writes, as the persistence adapter would.
    let stored: HashMap<_, _> = totals.iter().map(|(k, v)| (k.clone(), *v)).collect();

    assert!(diff_actuals(&totals, &stored).is_empty());
}

#[test]
fn test_unknown_ref_stays_for_caller_to_reject() {
    // Matching only extracts; existence against the master registry is the
    // engine's check. Z-999 extracts fine and must be filtered upstream.
    assert_eq!(extract_project_ref("Z-999 cloud fees"), Some("Z-999"));
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(Decimal::from)
}

fn line_strategy() -> impl Strategy<Value = MappedLine> {
    (0u8..4, 1u8..4, amount_strategy()).prop_map(|(p, m, amount)| MappedLine {
        proj_id: ProjectId::new(format!("A-00{p}")),
        month: month(&format!("20250{m}")),
        amount,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Aggregation is idempotent: re-running over the same rows yields the
    /// same map.
    #[test]
    fn prop_aggregate_idempotent(rows in prop::collection::vec(line_strategy(), 0..50)) {
        let first = aggregate_actuals(&rows);
        let second = aggregate_actuals(&rows);
        prop_assert_eq!(first, second);
    }

    /// Aggregation conserves the total: the sum over the map equals the sum
    /// over the input rows.
    #[test]
    fn prop_aggregate_conserves_total(rows in prop::collection::vec(line_strategy(), 0..50)) {
        let totals = aggregate_actuals(&rows);
        let map_sum: Decimal = totals.values().copied().sum();
        let row_sum: Decimal = rows.iter().map(|r| r.amount).sum();
        prop_assert_eq!(map_sum, row_sum);
    }

    /// A fully written-back aggregate diffs to nothing.
    #[test]
    fn prop_diff_of_written_back_state_is_empty(
        rows in prop::collection::vec(line_strategy(), 0..50),
    ) {
        let totals = aggregate_actuals(&rows);
        let stored: HashMap<_, _> = totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert!(diff_actuals(&totals, &stored).is_empty());
    }
}
