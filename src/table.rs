//! Table and quota data structures.
//!
//! This module defines the input representation for one table run:
//! - [`TableSpec`]: Ordered nutrient rows and data columns with their blank quotas
//! - [`QuotaSet`]: Group-scoped quotas, kind grand totals, and pinned cells
//! - [`ColumnKind`]: The flag / value distinction of the per-food column pair
//!
//! The grid builder and the quota collection layer are external collaborators;
//! their finished output is deserialized into these types and consumed
//! read-only by the solver.

use serde::{Deserialize, Serialize};

/// The role of a data column within a food item's column pair.
///
/// Every food item contributes two columns: a data-quality flag column
/// (rendered as `"… F"` in the source tables) and a measured-value column
/// (rendered as `"… en 100 g"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Flag,
    Value,
}

impl ColumnKind {
    pub(crate) const COUNT: usize = 2;

    pub(crate) fn index(self) -> usize {
        match self {
            ColumnKind::Flag => 0,
            ColumnKind::Value => 1,
        }
    }

    /// The header suffix used by the source tables.
    pub fn suffix(self) -> &'static str {
        match self {
            ColumnKind::Flag => "F",
            ColumnKind::Value => "en 100 g",
        }
    }
}

/// One data column, identified by its `(item, kind)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Food item name, e.g. "Bagre, chihuil".
    pub item: String,
    pub kind: ColumnKind,
    /// Exact number of blank cells this column must end up with.
    pub blanks: u32,
}

impl ColumnSpec {
    pub fn new(item: impl Into<String>, kind: ColumnKind, blanks: u32) -> ColumnSpec {
        ColumnSpec {
            item: item.into(),
            kind,
            blanks,
        }
    }

    /// The original header text, e.g. `"Besugo F"` or `"Besugo en 100 g"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.item, self.kind.suffix())
    }
}

/// One nutrient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpec {
    /// Nutrient name, unique within a table, e.g. "Calcio".
    pub nutrient: String,
    /// Section the row belongs to, e.g. "Minerales".
    pub group: String,
    /// Exact number of blank cells this row must end up with.
    pub blanks: u32,
    /// Original non-blank cell contents in original left-to-right order.
    ///
    /// Cells already absent in the source are skipped here, so this list may
    /// be shorter than the column count.
    pub values: Vec<String>,
}

impl RowSpec {
    pub fn new(
        nutrient: impl Into<String>,
        group: impl Into<String>,
        blanks: u32,
        values: Vec<String>,
    ) -> RowSpec {
        RowSpec {
            nutrient: nutrient.into(),
            group: group.into(),
            blanks,
            values,
        }
    }
}

/// An exact blank count scoped to one (group, column) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupQuota {
    pub group: String,
    pub item: String,
    pub kind: ColumnKind,
    pub blanks: u32,
}

/// Optional exact grand totals per column kind.
///
/// When declared, the summed blanks across every column of that kind must
/// equal the total exactly. Column quotas are themselves exact, so a declared
/// total that disagrees with their sum is rejected during validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindTotals {
    pub flag: Option<u32>,
    pub value: Option<u32>,
}

impl KindTotals {
    pub(crate) fn get(&self, kind: ColumnKind) -> Option<u32> {
        match kind {
            ColumnKind::Flag => self.flag,
            ColumnKind::Value => self.value,
        }
    }
}

/// A cell whose blank status is fixed up front by external hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedCell {
    pub nutrient: String,
    pub item: String,
    pub kind: ColumnKind,
}

/// The base table for one run: ordered rows grouped into named sections and
/// ordered data columns, two per food item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub rows: Vec<RowSpec>,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Distinct group names in first-appearance order.
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.group.as_str()) {
                names.push(row.group.as_str());
            }
        }
        names
    }

    /// Sum of all row quotas, i.e. the total number of blanks the table
    /// must contain.
    pub fn total_row_blanks(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.blanks)).sum()
    }

    /// Sum of all column quotas. Must equal [`Self::total_row_blanks`] for
    /// any satisfiable instance.
    pub fn total_column_blanks(&self) -> u64 {
        self.columns.iter().map(|c| u64::from(c.blanks)).sum()
    }
}

/// Group quotas, kind grand totals, and pinned cells for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaSet {
    pub group_quotas: Vec<GroupQuota>,
    pub kind_totals: KindTotals,
    pub pinned: Vec<PinnedCell>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_label_uses_source_suffixes() {
        let flag = ColumnSpec::new("Besugo", ColumnKind::Flag, 3);
        let value = ColumnSpec::new("Besugo", ColumnKind::Value, 0);
        assert_eq!(flag.label(), "Besugo F");
        assert_eq!(value.label(), "Besugo en 100 g");
    }

    #[test]
    fn group_names_preserve_first_appearance_order() {
        let table = TableSpec {
            rows: vec![
                RowSpec::new("Humedad", "Elementos principales", 1, vec![]),
                RowSpec::new("Calcio", "Minerales", 1, vec![]),
                RowSpec::new("Proteínas", "Elementos principales", 0, vec![]),
                RowSpec::new("Tiamina", "Vitaminas", 0, vec![]),
            ],
            columns: vec![],
        };
        assert_eq!(
            table.group_names(),
            vec!["Elementos principales", "Minerales", "Vitaminas"]
        );
    }

    #[test]
    fn totals_sum_quotas() {
        let table = TableSpec {
            rows: vec![
                RowSpec::new("Humedad", "Elementos principales", 2, vec![]),
                RowSpec::new("Calcio", "Minerales", 1, vec![]),
            ],
            columns: vec![
                ColumnSpec::new("Besugo", ColumnKind::Flag, 2),
                ColumnSpec::new("Besugo", ColumnKind::Value, 1),
            ],
        };
        assert_eq!(table.total_row_blanks(), 3);
        assert_eq!(table.total_column_blanks(), 3);
    }
}
