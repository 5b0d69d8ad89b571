//! Blank Grid: constraint-satisfaction blanking of nutrient tables.
//!
//! This crate provides functionality for:
//! - Describing a nutrient table (grouped rows, flag/value column pairs) and
//!   its blank quotas
//! - Searching for a cell assignment that satisfies every row, column,
//!   (group, column), and grand-total quota exactly, honoring pinned cells
//! - Rendering the final grid and streaming it to an export sink
//!
//! # Quick Start
//!
//! ```
//! use blank_grid::{
//!     fill_table, ColumnKind, ColumnSpec, QuotaSet, RowSpec, SolveConfig, TableSpec, VecSink,
//! };
//!
//! let table = TableSpec {
//!     rows: vec![
//!         RowSpec::new("Calcio", "Minerales", 1, vec!["1".into()]),
//!         RowSpec::new("Hierro", "Minerales", 1, vec!["0.40".into()]),
//!     ],
//!     columns: vec![
//!         ColumnSpec::new("Besugo", ColumnKind::Flag, 1),
//!         ColumnSpec::new("Besugo", ColumnKind::Value, 1),
//!     ],
//! };
//!
//! let mut sink = VecSink::new();
//! let summary = fill_table(&table, &QuotaSet::default(), &SolveConfig::default(), &mut sink)?;
//! assert_eq!(summary.rows_emitted, 2);
//! # Ok::<(), blank_grid::FillError>(())
//! ```

mod config;
mod engine;
pub mod error_codes;
mod materialize;
mod patterns;
mod sink;
mod solver;
mod table;
mod validate;

pub use config::{SolveConfig, SolveConfigBuilder};
pub use engine::{FillError, FillSummary, fill_table};
pub use materialize::{MaterializedGrid, MaterializedRow, materialize};
pub use sink::{GridHeader, JsonLinesSink, RowSink, STREAM_VERSION, SinkError, VecSink};
pub use solver::{SolveError, SolveMetrics, Solution, solve};
pub use table::{
    ColumnKind, ColumnSpec, GroupQuota, KindTotals, PinnedCell, QuotaSet, RowSpec, TableSpec,
};
pub use validate::ConfigError;
