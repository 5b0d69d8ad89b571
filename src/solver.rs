//! Backtracking blank-assignment search.
//!
//! Rows are visited in fixed input order; at each row the precomputed
//! candidate patterns are tried in enumeration order. Running tallies cover
//! every open column, every declared (group, column) quota, and the per-kind
//! grand totals; a branch is pruned the moment any tally would exceed its
//! target. The first leaf where every tally equals its target exactly is the
//! answer. Exhausting the space is a definitive infeasibility verdict, never
//! a partial result.
//!
//! All running state lives in a [`SearchState`] owned by the call, so the
//! solver is reentrant and two searches can never observe each other.

use crate::config::SolveConfig;
use crate::error_codes;
use crate::patterns::{Pattern, row_patterns};
use crate::table::{ColumnKind, QuotaSet, TableSpec};
use crate::validate::{ConfigError, Problem, resolve};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(
        "[BLANKGRID_SOLVE_001] no blank assignment satisfies the row, column, group, and grand-total quotas simultaneously. Suggestion: re-check the collected quotas; one of them is over- or under-counted."
    )]
    Infeasible,

    #[error(
        "[BLANKGRID_SOLVE_002] search aborted after visiting {nodes} nodes without a verdict. Suggestion: raise or remove `max_nodes`, or tighten the quotas."
    )]
    BudgetExhausted { nodes: u64 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SolveError {
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::Infeasible => error_codes::SOLVE_INFEASIBLE,
            SolveError::BudgetExhausted { .. } => error_codes::SOLVE_BUDGET_EXHAUSTED,
            SolveError::Config(e) => e.code(),
        }
    }
}

/// Counters describing one solve run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveMetrics {
    /// Row frames entered during the search, including re-entries after
    /// backtracking.
    pub nodes_visited: u64,
    /// Candidate patterns attempted across all rows.
    pub patterns_tried: u64,
    /// Patterns rejected by a bound before recursing.
    pub prunes: u64,
    /// Dead ends undone.
    pub backtracks: u64,
    /// Cells assigned by the warm-start pre-pass.
    pub warm_start_cells: u64,
    pub elapsed_ms: u64,
}

/// A complete blank assignment: for every row, the sorted set of full-table
/// column indices chosen to be blank. `blanks[r].len()` equals row `r`'s
/// quota.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub blanks: Vec<Vec<u16>>,
    pub metrics: SolveMetrics,
}

impl Solution {
    pub fn is_blank(&self, row: usize, col: u16) -> bool {
        self.blanks
            .get(row)
            .map_or(false, |cols| cols.binary_search(&col).is_ok())
    }
}

/// Searches for the first blank assignment satisfying every quota exactly.
pub fn solve(
    table: &TableSpec,
    quotas: &QuotaSet,
    config: &SolveConfig,
) -> Result<Solution, SolveError> {
    config.validate()?;
    let problem = resolve(table, quotas)?;
    let started = Instant::now();
    let mut metrics = SolveMetrics::default();

    let mut residual = problem;
    let warm = if config.warm_start {
        apply_warm_start(&mut residual)?
    } else {
        Vec::new()
    };
    metrics.warm_start_cells = warm.iter().map(|cols| cols.len() as u64).sum();

    // Row and column quotas both count the same set of cells; a mismatch can
    // never be satisfied, so skip the search outright.
    let row_sum: u64 = residual.rows.iter().map(|r| u64::from(r.quota)).sum();
    let col_sum: u64 = residual.col_targets.iter().map(|&t| u64::from(t)).sum();
    if row_sum != col_sum {
        metrics.elapsed_ms = started.elapsed().as_millis() as u64;
        return Err(SolveError::Infeasible);
    }

    let patterns = row_patterns(&residual);
    if patterns.iter().any(|p| p.is_empty()) {
        metrics.elapsed_ms = started.elapsed().as_millis() as u64;
        return Err(SolveError::Infeasible);
    }

    let mut state = SearchState::new(&residual, config.max_nodes);
    let found = state.dfs(&residual, &patterns, 0, &mut metrics);
    metrics.elapsed_ms = started.elapsed().as_millis() as u64;

    match found {
        Ok(true) => {
            let mut blanks: Vec<Vec<u16>> = Vec::with_capacity(residual.rows.len());
            for (r, &pattern_idx) in state.chosen.iter().enumerate() {
                let mut cols: Vec<u16> = patterns[r][pattern_idx]
                    .cols
                    .iter()
                    .chain(warm.get(r).into_iter().flatten())
                    .map(|&pos| residual.eligible[pos as usize])
                    .collect();
                cols.sort_unstable();
                blanks.push(cols);
            }
            Ok(Solution { blanks, metrics })
        }
        Ok(false) => Err(SolveError::Infeasible),
        Err(nodes) => Err(SolveError::BudgetExhausted { nodes }),
    }
}

/// Blanks every column whose quota equals the row count and rewrites the
/// instance to its residual quotas. Returns the pre-assigned eligible
/// positions per row.
fn apply_warm_start(problem: &mut Problem) -> Result<Vec<Vec<u16>>, SolveError> {
    let nrows = problem.rows.len() as u32;
    if nrows == 0 {
        return Ok(Vec::new());
    }

    let full: Vec<u16> = (0..problem.col_targets.len() as u16)
        .filter(|&pos| problem.col_targets[pos as usize] == nrows)
        .collect();
    if full.is_empty() {
        return Ok(vec![Vec::new(); problem.rows.len()]);
    }

    for &pos in &full {
        problem.col_targets[pos as usize] = 0;
    }

    // Every row contributes one blank to each fully-blank column.
    let mut group_row_counts = vec![0u32; problem.group_names.len()];
    for row in &mut problem.rows {
        row.quota = row
            .quota
            .checked_sub(full.len() as u32)
            .ok_or(SolveError::Infeasible)?;
        row.pins.retain(|pin| !full.contains(pin));
        group_row_counts[row.group as usize] += 1;
    }

    for kind in [ColumnKind::Flag, ColumnKind::Value] {
        let full_of_kind = full
            .iter()
            .filter(|&&pos| problem.col_kinds[pos as usize] == kind)
            .count() as u32;
        if full_of_kind == 0 {
            continue;
        }
        if let Some(target) = problem.kind_targets[kind.index()].as_mut() {
            *target = target
                .checked_sub(nrows * full_of_kind)
                .ok_or(SolveError::Infeasible)?;
        }
    }

    let closed_quotas: Vec<(u16, u16)> = problem
        .group_quota_index
        .iter()
        .filter(|((_, pos), _)| full.contains(pos))
        .map(|(&(group, _), &qi)| (group, qi))
        .collect();
    for (group, qi) in closed_quotas {
        let contributed = group_row_counts[group as usize];
        let target = &mut problem.group_targets[qi as usize];
        // The column is closed after the pre-pass, so the group's
        // contribution to it is final and must already match.
        if *target != contributed {
            return Err(SolveError::Infeasible);
        }
        *target = 0;
    }

    Ok(vec![full.clone(); problem.rows.len()])
}

/// Running tallies for one search invocation, mutated and rolled back in
/// strict stack discipline.
struct SearchState {
    col_totals: Vec<u32>,
    group_totals: Vec<u32>,
    kind_totals: [u32; ColumnKind::COUNT],
    chosen: Vec<usize>,
    nodes: u64,
    max_nodes: Option<u64>,
}

impl SearchState {
    fn new(problem: &Problem, max_nodes: Option<u64>) -> SearchState {
        SearchState {
            col_totals: vec![0; problem.col_targets.len()],
            group_totals: vec![0; problem.group_targets.len()],
            kind_totals: [0; ColumnKind::COUNT],
            chosen: Vec::with_capacity(problem.rows.len()),
            nodes: 0,
            max_nodes,
        }
    }

    /// Depth-first search from row `r`. `Ok(true)` means `chosen` holds the
    /// first satisfying assignment; `Err` carries the node count when the
    /// budget ran out.
    fn dfs(
        &mut self,
        problem: &Problem,
        patterns: &[Vec<Pattern>],
        r: usize,
        metrics: &mut SolveMetrics,
    ) -> Result<bool, u64> {
        self.nodes += 1;
        metrics.nodes_visited += 1;
        if let Some(budget) = self.max_nodes {
            if self.nodes > budget {
                return Err(self.nodes);
            }
        }

        if r == problem.rows.len() {
            let exact = self
                .col_totals
                .iter()
                .zip(&problem.col_targets)
                .all(|(&got, &want)| got == want)
                && self
                    .group_totals
                    .iter()
                    .zip(&problem.group_targets)
                    .all(|(&got, &want)| got == want)
                && [ColumnKind::Flag, ColumnKind::Value].iter().all(|&kind| {
                    problem.kind_targets[kind.index()]
                        .map_or(true, |want| self.kind_totals[kind.index()] == want)
                });
            return Ok(exact);
        }

        'candidates: for (k, pattern) in patterns[r].iter().enumerate() {
            metrics.patterns_tried += 1;

            for &pos in &pattern.cols {
                if self.col_totals[pos as usize] + 1 > problem.col_targets[pos as usize] {
                    metrics.prunes += 1;
                    continue 'candidates;
                }
            }
            for kind in [ColumnKind::Flag, ColumnKind::Value] {
                if let Some(target) = problem.kind_targets[kind.index()] {
                    if self.kind_totals[kind.index()] + pattern.kind_counts[kind.index()] > target {
                        metrics.prunes += 1;
                        continue 'candidates;
                    }
                }
            }
            for &qi in &pattern.group_quota_hits {
                if self.group_totals[qi as usize] + 1 > problem.group_targets[qi as usize] {
                    metrics.prunes += 1;
                    continue 'candidates;
                }
            }

            self.apply(pattern);
            self.chosen.push(k);

            match self.dfs(problem, patterns, r + 1, metrics) {
                Ok(true) => return Ok(true),
                Ok(false) => {
                    self.chosen.pop();
                    self.undo(pattern);
                    metrics.backtracks += 1;
                }
                Err(nodes) => return Err(nodes),
            }
        }

        Ok(false)
    }

    fn apply(&mut self, pattern: &Pattern) {
        for &pos in &pattern.cols {
            self.col_totals[pos as usize] += 1;
        }
        for kind in 0..ColumnKind::COUNT {
            self.kind_totals[kind] += pattern.kind_counts[kind];
        }
        for &qi in &pattern.group_quota_hits {
            self.group_totals[qi as usize] += 1;
        }
    }

    fn undo(&mut self, pattern: &Pattern) {
        for &pos in &pattern.cols {
            self.col_totals[pos as usize] -= 1;
        }
        for kind in 0..ColumnKind::COUNT {
            self.kind_totals[kind] -= pattern.kind_counts[kind];
        }
        for &qi in &pattern.group_quota_hits {
            self.group_totals[qi as usize] -= 1;
        }
    }
}
