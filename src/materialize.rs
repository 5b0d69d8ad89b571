//! Final grid rendering.
//!
//! Turns a [`Solution`] back into per-row cell contents. The convention is
//! in-place slots: each output row carries exactly one cell per data column,
//! blank slots render the configured marker, and the remaining slots consume
//! the row's original values strictly left-to-right. A row storing fewer
//! originals than it has non-blank slots gets empty strings for the tail;
//! the shortfall is counted, never an error.

use crate::config::SolveConfig;
use crate::solver::Solution;
use crate::table::TableSpec;
use serde::{Deserialize, Serialize};

/// One rendered row, aligned to the table's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedRow {
    pub nutrient: String,
    pub group: String,
    pub cells: Vec<String>,
}

/// The rendered table plus recovery bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializedGrid {
    pub rows: Vec<MaterializedRow>,
    /// Non-blank slots that had no original value left and were rendered
    /// empty. Zero for well-formed input.
    pub value_shortfalls: u64,
    /// Original values that were never consumed because their slots went
    /// blank beyond the row's expected count. Zero for well-formed input.
    pub values_left_over: u64,
}

/// Renders every cell of the final grid: the blank marker where the solution
/// marked a cell, the next unused original value otherwise.
pub fn materialize(
    table: &TableSpec,
    solution: &Solution,
    config: &SolveConfig,
) -> MaterializedGrid {
    let mut rows = Vec::with_capacity(table.rows.len());
    let mut value_shortfalls = 0u64;
    let mut values_left_over = 0u64;

    for (r, row) in table.rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(table.columns.len());
        let mut originals = row.values.iter();

        for c in 0..table.columns.len() as u16 {
            if solution.is_blank(r, c) {
                cells.push(config.blank_marker.clone());
            } else {
                match originals.next() {
                    Some(value) => cells.push(value.clone()),
                    None => {
                        value_shortfalls += 1;
                        cells.push(String::new());
                    }
                }
            }
        }
        values_left_over += originals.count() as u64;

        rows.push(MaterializedRow {
            nutrient: row.nutrient.clone(),
            group: row.group.clone(),
            cells,
        });
    }

    MaterializedGrid {
        rows,
        value_shortfalls,
        values_left_over,
    }
}
