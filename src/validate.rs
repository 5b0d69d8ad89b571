//! Configuration validation and resolution.
//!
//! Raw [`TableSpec`]/[`QuotaSet`] input is name-based and comes from an
//! external collection layer. [`resolve`] checks it against the rules in
//! [`ConfigError`] and lowers it to the index-based [`Problem`] consumed by
//! the pattern enumerator and the search. Nothing malformed reaches the
//! search loop.

use crate::error_codes;
use crate::table::{ColumnKind, QuotaSet, TableSpec};
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "[BLANKGRID_CFG_001] duplicate nutrient row '{nutrient}'. Suggestion: nutrient names must be unique within a table."
    )]
    DuplicateRow { nutrient: String },

    #[error(
        "[BLANKGRID_CFG_002] duplicate column '{label}'. Suggestion: each (item, kind) pair may appear only once."
    )]
    DuplicateColumn { label: String },

    #[error(
        "[BLANKGRID_CFG_003] {context} references unknown nutrient row '{nutrient}'. Suggestion: check spelling against the table's row list."
    )]
    UnknownRow {
        context: &'static str,
        nutrient: String,
    },

    #[error(
        "[BLANKGRID_CFG_004] {context} references unknown column '{label}'. Suggestion: check the item name and column kind."
    )]
    UnknownColumn {
        context: &'static str,
        label: String,
    },

    #[error(
        "[BLANKGRID_CFG_005] group quota references unknown group '{group}'. Suggestion: groups are defined by the rows' section labels."
    )]
    UnknownGroup { group: String },

    #[error(
        "[BLANKGRID_CFG_006] group quota for ('{group}', '{label}') is {quota} but the column's total quota is {column_quota}. Suggestion: a group can never contribute more blanks than its column holds."
    )]
    GroupQuotaExceedsColumn {
        group: String,
        label: String,
        quota: u32,
        column_quota: u32,
    },

    #[error(
        "[BLANKGRID_CFG_007] declared {kind:?} grand total {declared} disagrees with the sum of {kind:?} column quotas ({implied}). Suggestion: column quotas are exact, so the grand total is forced to their sum."
    )]
    KindTotalMismatch {
        kind: ColumnKind,
        declared: u32,
        implied: u64,
    },

    #[error(
        "[BLANKGRID_CFG_008] cell ('{nutrient}', '{label}') is pinned blank but the column's quota is zero. Suggestion: raise the column quota or drop the pin."
    )]
    PinnedZeroQuotaColumn { nutrient: String, label: String },

    #[error(
        "[BLANKGRID_CFG_009] row '{nutrient}' requires {quota} blanks but only {eligible} columns can hold any. Suggestion: lower the row quota or raise column quotas."
    )]
    RowQuotaTooLarge {
        nutrient: String,
        quota: u32,
        eligible: usize,
    },

    #[error("[BLANKGRID_CFG_010] {field} must be greater than zero (got {value})")]
    NonPositiveLimit { field: &'static str, value: u64 },

    #[error(
        "[BLANKGRID_CFG_011] duplicate group quota for ('{group}', '{label}'). Suggestion: declare each (group, column) quota at most once."
    )]
    DuplicateGroupQuota { group: String, label: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::DuplicateRow { .. } => error_codes::CFG_DUPLICATE_ROW,
            ConfigError::DuplicateColumn { .. } => error_codes::CFG_DUPLICATE_COLUMN,
            ConfigError::UnknownRow { .. } => error_codes::CFG_UNKNOWN_ROW,
            ConfigError::UnknownColumn { .. } => error_codes::CFG_UNKNOWN_COLUMN,
            ConfigError::UnknownGroup { .. } => error_codes::CFG_UNKNOWN_GROUP,
            ConfigError::GroupQuotaExceedsColumn { .. } => {
                error_codes::CFG_GROUP_QUOTA_EXCEEDS_COLUMN
            }
            ConfigError::KindTotalMismatch { .. } => error_codes::CFG_KIND_TOTAL_MISMATCH,
            ConfigError::PinnedZeroQuotaColumn { .. } => error_codes::CFG_PIN_IN_ZERO_COLUMN,
            ConfigError::RowQuotaTooLarge { .. } => error_codes::CFG_ROW_QUOTA_TOO_LARGE,
            ConfigError::NonPositiveLimit { .. } => error_codes::CFG_NON_POSITIVE_LIMIT,
            ConfigError::DuplicateGroupQuota { .. } => error_codes::CFG_DUPLICATE_GROUP_QUOTA,
        }
    }
}

/// One row of the resolved instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProblemRow {
    pub quota: u32,
    pub group: u16,
    /// Eligible-column positions pinned blank for this row, sorted.
    pub pins: Vec<u16>,
}

/// The resolved, index-based instance handed to the solver.
///
/// Column references are positions into `eligible`, the subset of columns
/// with a positive quota; zero-quota columns can never hold a blank and are
/// dropped from the search entirely.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Problem {
    pub rows: Vec<ProblemRow>,
    /// Full-table column index of each eligible column, ascending.
    pub eligible: Vec<u16>,
    /// Blank target per eligible position.
    pub col_targets: Vec<u32>,
    /// Kind of each eligible position.
    pub col_kinds: Vec<ColumnKind>,
    /// Declared grand total per kind, if any.
    pub kind_targets: [Option<u32>; ColumnKind::COUNT],
    /// Blank target per declared (group, column) quota.
    pub group_targets: Vec<u32>,
    /// (group id, eligible position) -> index into `group_targets`.
    pub group_quota_index: FxHashMap<(u16, u16), u16>,
    /// Group names in first-appearance order, indexed by group id.
    pub group_names: Vec<String>,
}

/// Validates the raw configuration and lowers it to a [`Problem`].
pub(crate) fn resolve(table: &TableSpec, quotas: &QuotaSet) -> Result<Problem, ConfigError> {
    let mut row_index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, row) in table.rows.iter().enumerate() {
        if row_index.insert(row.nutrient.as_str(), i).is_some() {
            return Err(ConfigError::DuplicateRow {
                nutrient: row.nutrient.clone(),
            });
        }
    }

    let mut col_index: FxHashMap<(&str, ColumnKind), usize> = FxHashMap::default();
    for (i, col) in table.columns.iter().enumerate() {
        if col_index.insert((col.item.as_str(), col.kind), i).is_some() {
            return Err(ConfigError::DuplicateColumn { label: col.label() });
        }
    }

    let mut group_names: Vec<String> = Vec::new();
    let mut group_index: FxHashMap<&str, u16> = FxHashMap::default();
    for row in &table.rows {
        if !group_index.contains_key(row.group.as_str()) {
            group_index.insert(row.group.as_str(), group_names.len() as u16);
            group_names.push(row.group.clone());
        }
    }

    // Columns with a positive quota are the only ones a blank can land in.
    let mut eligible: Vec<u16> = Vec::new();
    let mut eligible_pos: FxHashMap<usize, u16> = FxHashMap::default();
    let mut col_targets: Vec<u32> = Vec::new();
    let mut col_kinds: Vec<ColumnKind> = Vec::new();
    for (i, col) in table.columns.iter().enumerate() {
        if col.blanks > 0 {
            eligible_pos.insert(i, eligible.len() as u16);
            eligible.push(i as u16);
            col_targets.push(col.blanks);
            col_kinds.push(col.kind);
        }
    }

    let mut kind_targets = [None; ColumnKind::COUNT];
    for kind in [ColumnKind::Flag, ColumnKind::Value] {
        if let Some(declared) = quotas.kind_totals.get(kind) {
            let implied: u64 = table
                .columns
                .iter()
                .filter(|c| c.kind == kind)
                .map(|c| u64::from(c.blanks))
                .sum();
            if u64::from(declared) != implied {
                return Err(ConfigError::KindTotalMismatch {
                    kind,
                    declared,
                    implied,
                });
            }
            kind_targets[kind.index()] = Some(declared);
        }
    }

    let mut group_targets: Vec<u32> = Vec::new();
    let mut group_quota_index: FxHashMap<(u16, u16), u16> = FxHashMap::default();
    for gq in &quotas.group_quotas {
        let group = *group_index
            .get(gq.group.as_str())
            .ok_or_else(|| ConfigError::UnknownGroup {
                group: gq.group.clone(),
            })?;
        let col = *col_index.get(&(gq.item.as_str(), gq.kind)).ok_or_else(|| {
            ConfigError::UnknownColumn {
                context: "group quota",
                label: format!("{} {}", gq.item, gq.kind.suffix()),
            }
        })?;
        let column_quota = table.columns[col].blanks;
        if gq.blanks > column_quota {
            return Err(ConfigError::GroupQuotaExceedsColumn {
                group: gq.group.clone(),
                label: table.columns[col].label(),
                quota: gq.blanks,
                column_quota,
            });
        }
        // A zero-quota column is outside the eligible set; its only legal
        // group quota is zero, which constrains nothing.
        let Some(&pos) = eligible_pos.get(&col) else {
            continue;
        };
        if group_quota_index
            .insert((group, pos), group_targets.len() as u16)
            .is_some()
        {
            return Err(ConfigError::DuplicateGroupQuota {
                group: gq.group.clone(),
                label: table.columns[col].label(),
            });
        }
        group_targets.push(gq.blanks);
    }

    let mut pins_by_row: FxHashMap<usize, Vec<u16>> = FxHashMap::default();
    for pin in &quotas.pinned {
        let row =
            *row_index
                .get(pin.nutrient.as_str())
                .ok_or_else(|| ConfigError::UnknownRow {
                    context: "pinned cell",
                    nutrient: pin.nutrient.clone(),
                })?;
        let col = *col_index
            .get(&(pin.item.as_str(), pin.kind))
            .ok_or_else(|| ConfigError::UnknownColumn {
                context: "pinned cell",
                label: format!("{} {}", pin.item, pin.kind.suffix()),
            })?;
        let Some(&pos) = eligible_pos.get(&col) else {
            return Err(ConfigError::PinnedZeroQuotaColumn {
                nutrient: pin.nutrient.clone(),
                label: table.columns[col].label(),
            });
        };
        let pins = pins_by_row.entry(row).or_default();
        if !pins.contains(&pos) {
            pins.push(pos);
        }
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        if row.blanks as usize > eligible.len() {
            return Err(ConfigError::RowQuotaTooLarge {
                nutrient: row.nutrient.clone(),
                quota: row.blanks,
                eligible: eligible.len(),
            });
        }
        let mut pins = pins_by_row.remove(&i).unwrap_or_default();
        pins.sort_unstable();
        rows.push(ProblemRow {
            quota: row.blanks,
            group: group_index[row.group.as_str()],
            pins,
        });
    }

    Ok(Problem {
        rows,
        eligible,
        col_targets,
        col_kinds,
        kind_targets,
        group_targets,
        group_quota_index,
        group_names,
    })
}
