//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use blank_grid::{
    ColumnKind, ColumnSpec, GroupQuota, KindTotals, PinnedCell, QuotaSet, RowSpec, Solution,
    TableSpec,
};

pub fn table(rows: &[(&str, &str, u32)], cols: &[(&str, ColumnKind, u32)]) -> TableSpec {
    TableSpec {
        rows: rows
            .iter()
            .map(|&(nutrient, group, blanks)| RowSpec::new(nutrient, group, blanks, vec![]))
            .collect(),
        columns: cols
            .iter()
            .map(|&(item, kind, blanks)| ColumnSpec::new(item, kind, blanks))
            .collect(),
    }
}

pub fn pin(nutrient: &str, item: &str, kind: ColumnKind) -> PinnedCell {
    PinnedCell {
        nutrient: nutrient.to_string(),
        item: item.to_string(),
        kind,
    }
}

pub fn group_quota(group: &str, item: &str, kind: ColumnKind, blanks: u32) -> GroupQuota {
    GroupQuota {
        group: group.to_string(),
        item: item.to_string(),
        kind,
        blanks,
    }
}

/// A small but realistic table in the shape of the source data: three food
/// items (two columns each), eight nutrients across three sections. The
/// quotas admit at least one assignment by construction.
pub fn nutrition_table() -> TableSpec {
    let items = ["Bagre, chihuil", "Besugo", "Cabrilla"];
    let col_quotas = [2u32, 0, 4, 2, 0, 1];

    let mut columns = Vec::new();
    for (i, item) in items.iter().enumerate() {
        columns.push(ColumnSpec::new(*item, ColumnKind::Flag, col_quotas[2 * i]));
        columns.push(ColumnSpec::new(
            *item,
            ColumnKind::Value,
            col_quotas[2 * i + 1],
        ));
    }

    let rows = [
        ("Humedad", "Elementos principales", 2),
        ("Proteínas", "Elementos principales", 1),
        ("Lípidos tot", "Elementos principales", 0),
        ("Calcio", "Minerales", 2),
        ("Hierro", "Minerales", 1),
        ("Zinc", "Minerales", 1),
        ("Tiamina", "Vitaminas", 1),
        ("Riboflavina", "Vitaminas", 1),
    ];

    TableSpec {
        rows: rows
            .iter()
            .map(|&(nutrient, group, blanks)| {
                // One original value per non-blank slot.
                let values = (0..6 - blanks).map(|i| format!("{}.{i}", blanks)).collect();
                RowSpec::new(nutrient, group, blanks, values)
            })
            .collect(),
        columns,
    }
}

/// Quotas that pair with [`nutrition_table`]: consistent kind grand totals,
/// one group-scoped quota, one pinned cell.
pub fn nutrition_quotas() -> QuotaSet {
    QuotaSet {
        group_quotas: vec![group_quota("Minerales", "Besugo", ColumnKind::Flag, 1)],
        kind_totals: KindTotals {
            flag: Some(6),
            value: Some(3),
        },
        pinned: vec![pin("Humedad", "Bagre, chihuil", ColumnKind::Flag)],
    }
}

/// Asserts that `solution` meets every declared quota exactly.
pub fn assert_exact_quotas(table: &TableSpec, quotas: &QuotaSet, solution: &Solution) {
    for (r, row) in table.rows.iter().enumerate() {
        assert_eq!(
            solution.blanks[r].len() as u32,
            row.blanks,
            "row quota for '{}'",
            row.nutrient
        );
    }

    for (c, col) in table.columns.iter().enumerate() {
        let got = (0..table.rows.len())
            .filter(|&r| solution.is_blank(r, c as u16))
            .count() as u32;
        assert_eq!(got, col.blanks, "column quota for '{}'", col.label());
    }

    for gq in &quotas.group_quotas {
        let c = table
            .columns
            .iter()
            .position(|col| col.item == gq.item && col.kind == gq.kind)
            .expect("group quota names a known column");
        let got = table
            .rows
            .iter()
            .enumerate()
            .filter(|(r, row)| row.group == gq.group && solution.is_blank(*r, c as u16))
            .count() as u32;
        assert_eq!(
            got, gq.blanks,
            "group quota for ('{}', '{} {}')",
            gq.group,
            gq.item,
            gq.kind.suffix()
        );
    }

    for (kind, declared) in [
        (ColumnKind::Flag, quotas.kind_totals.flag),
        (ColumnKind::Value, quotas.kind_totals.value),
    ] {
        let Some(want) = declared else { continue };
        let got: u32 = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, col)| col.kind == kind)
            .map(|(c, _)| {
                (0..table.rows.len())
                    .filter(|&r| solution.is_blank(r, c as u16))
                    .count() as u32
            })
            .sum();
        assert_eq!(got, want, "grand total for {kind:?} columns");
    }

    for p in &quotas.pinned {
        let r = table
            .rows
            .iter()
            .position(|row| row.nutrient == p.nutrient)
            .expect("pin names a known row");
        let c = table
            .columns
            .iter()
            .position(|col| col.item == p.item && col.kind == p.kind)
            .expect("pin names a known column");
        assert!(
            solution.is_blank(r, c as u16),
            "pinned cell ('{}', '{} {}') must be blank",
            p.nutrient,
            p.item,
            p.kind.suffix()
        );
    }
}
