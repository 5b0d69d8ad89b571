mod common;

use blank_grid::{
    ColumnKind, ConfigError, KindTotals, QuotaSet, SolveConfig, SolveError, solve,
};
use common::{group_quota, pin, table};

#[test]
fn row_quota_larger_than_column_count_fails() {
    // One row wanting three blanks in a two-column table can never produce a
    // complete pattern; the solver must refuse, not return a short set.
    let t = table(
        &[("a", "g", 3)],
        &[("x", ColumnKind::Flag, 2), ("x", ColumnKind::Value, 1)],
    );
    let err = solve(&t, &QuotaSet::default(), &SolveConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SolveError::Config(ConfigError::RowQuotaTooLarge { .. })
    ));
}

#[test]
fn grand_totals_beyond_row_capacity_fail() {
    // Flag and value columns together demand four blanks, but the row quotas
    // only supply two.
    let t = table(
        &[("a", "g", 1), ("b", "g", 1)],
        &[("x", ColumnKind::Flag, 2), ("x", ColumnKind::Value, 2)],
    );
    let quotas = QuotaSet {
        kind_totals: KindTotals {
            flag: Some(2),
            value: Some(2),
        },
        ..QuotaSet::default()
    };
    let err = solve(&t, &quotas, &SolveConfig::default()).unwrap_err();
    assert_eq!(err, SolveError::Infeasible);
}

#[test]
fn contradictory_pins_exhaust_the_search() {
    // Both rows pinned into the same column, which may only hold one blank.
    let t = table(
        &[("a", "g", 1), ("b", "g", 1)],
        &[("x", ColumnKind::Flag, 1), ("x", ColumnKind::Value, 1)],
    );
    let quotas = QuotaSet {
        pinned: vec![
            pin("a", "x", ColumnKind::Flag),
            pin("b", "x", ColumnKind::Flag),
        ],
        ..QuotaSet::default()
    };
    let err = solve(&t, &quotas, &SolveConfig::default()).unwrap_err();
    assert_eq!(err, SolveError::Infeasible);
}

#[test]
fn group_quotas_summing_past_column_capacity_fail() {
    // Each group claims the column's single blank.
    let t = table(
        &[("a", "g", 1), ("b", "h", 0)],
        &[("x", ColumnKind::Flag, 1)],
    );
    let quotas = QuotaSet {
        group_quotas: vec![
            group_quota("g", "x", ColumnKind::Flag, 1),
            group_quota("h", "x", ColumnKind::Flag, 1),
        ],
        ..QuotaSet::default()
    };
    let err = solve(&t, &quotas, &SolveConfig::default()).unwrap_err();
    assert_eq!(err, SolveError::Infeasible);
}

#[test]
fn declared_kind_total_disagreeing_with_columns_is_rejected_before_search() {
    let t = table(
        &[("a", "g", 1)],
        &[("x", ColumnKind::Flag, 1), ("x", ColumnKind::Value, 0)],
    );
    let quotas = QuotaSet {
        kind_totals: KindTotals {
            flag: Some(2),
            value: None,
        },
        ..QuotaSet::default()
    };
    let err = solve(&t, &quotas, &SolveConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SolveError::Config(ConfigError::KindTotalMismatch { .. })
    ));
    assert_eq!(err.code(), "BLANKGRID_CFG_007");
}

#[test]
fn failure_reports_are_stable_under_node_budget() {
    // The budget must never turn an infeasible instance into a silent
    // partial answer.
    let t = table(
        &[("a", "g", 1), ("b", "g", 1)],
        &[("x", ColumnKind::Flag, 2), ("x", ColumnKind::Value, 1)],
    );
    let config = SolveConfig::builder()
        .max_nodes(Some(100))
        .build()
        .unwrap();
    let err = solve(&t, &QuotaSet::default(), &config).unwrap_err();
    assert_eq!(err, SolveError::Infeasible);
}
