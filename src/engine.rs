//! End-to-end pipeline for one table run.
//!
//! Provides the main entry point [`fill_table`]: validate the configuration,
//! search for a blank assignment, render the grid, and stream it to the
//! export sink.

use crate::config::SolveConfig;
use crate::materialize::materialize;
use crate::sink::{GridHeader, RowSink, STREAM_VERSION, SinkError};
use crate::solver::{SolveError, SolveMetrics, solve};
use crate::table::{QuotaSet, TableSpec};
use crate::validate::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl FillError {
    pub fn code(&self) -> &'static str {
        match self {
            FillError::Config(e) => e.code(),
            FillError::Solve(e) => e.code(),
            FillError::Sink(e) => e.code(),
        }
    }
}

/// What one run did: search counters plus materializer recovery counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSummary {
    pub rows_emitted: u64,
    pub metrics: SolveMetrics,
    pub value_shortfalls: u64,
    pub values_left_over: u64,
}

/// Runs the whole pipeline and streams the rendered rows to `sink` in table
/// order.
///
/// Failure is terminal: nothing is emitted unless a complete satisfying
/// assignment was found.
pub fn fill_table(
    table: &TableSpec,
    quotas: &QuotaSet,
    config: &SolveConfig,
    sink: &mut impl RowSink,
) -> Result<FillSummary, FillError> {
    let solution = solve(table, quotas, config)?;
    let grid = materialize(table, &solution, config);

    let header = GridHeader {
        version: STREAM_VERSION,
        columns: table.columns.iter().map(|c| c.label()).collect(),
    };
    sink.begin(&header)?;
    let mut rows_emitted = 0u64;
    for row in grid.rows {
        sink.emit(row)?;
        rows_emitted += 1;
    }
    sink.finish()?;

    Ok(FillSummary {
        rows_emitted,
        metrics: solution.metrics,
        value_shortfalls: grid.value_shortfalls,
        values_left_over: grid.values_left_over,
    })
}
