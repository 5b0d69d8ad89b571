//! Per-row candidate blank patterns.
//!
//! For each row the search considers every size-`quota` subset of the open
//! columns, filtered to those containing all of the row's pinned cells. The
//! per-column-kind counts and (group, column) quota hits of each pattern are
//! precomputed here so the search only adds and compares integers.

use crate::table::ColumnKind;
use crate::validate::Problem;

/// One candidate way to place a row's blanks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pattern {
    /// Chosen eligible-column positions, ascending.
    pub cols: Vec<u16>,
    /// Blanks this pattern contributes per column kind.
    pub kind_counts: [u32; ColumnKind::COUNT],
    /// Indices into `Problem::group_targets` this pattern increments by one.
    pub group_quota_hits: Vec<u16>,
}

/// Enumerates candidate patterns for every row, in row order.
///
/// Patterns are produced in lexicographic order over the open column
/// positions, which makes the whole search deterministic. Columns whose
/// residual target is zero are closed and never appear in a pattern.
pub(crate) fn row_patterns(problem: &Problem) -> Vec<Vec<Pattern>> {
    let open: Vec<u16> = (0..problem.col_targets.len() as u16)
        .filter(|&pos| problem.col_targets[pos as usize] > 0)
        .collect();

    problem
        .rows
        .iter()
        .map(|row| {
            let mut patterns = Vec::new();
            for combo in Combinations::new(open.len(), row.quota as usize) {
                let cols: Vec<u16> = combo.iter().map(|&i| open[i]).collect();
                if !row.pins.iter().all(|pin| cols.contains(pin)) {
                    continue;
                }

                let mut kind_counts = [0u32; ColumnKind::COUNT];
                let mut group_quota_hits = Vec::new();
                for &pos in &cols {
                    kind_counts[problem.col_kinds[pos as usize].index()] += 1;
                    if let Some(&qi) = problem.group_quota_index.get(&(row.group, pos)) {
                        group_quota_hits.push(qi);
                    }
                }

                patterns.push(Pattern {
                    cols,
                    kind_counts,
                    group_quota_hits,
                });
            }
            patterns
        })
        .collect()
}

/// Iterator over all k-of-n index combinations in lexicographic order.
struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Combinations {
        Combinations {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }
        if self.k == 0 {
            self.done = true;
            return None;
        }

        // Advance the rightmost index that still has room.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] + (self.k - i) < self.n {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnKind, ColumnSpec, PinnedCell, QuotaSet, RowSpec, TableSpec};
    use crate::validate::resolve;

    #[test]
    fn combinations_enumerate_lexicographically() {
        let combos: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn combinations_handle_degenerate_sizes() {
        assert_eq!(Combinations::new(3, 0).count(), 1);
        assert_eq!(Combinations::new(3, 3).count(), 1);
        assert_eq!(Combinations::new(2, 3).count(), 0);
    }

    fn problem_with_pin(pin: Option<PinnedCell>) -> Problem {
        let table = TableSpec {
            rows: vec![RowSpec::new("Humedad", "Elementos principales", 1, vec![])],
            columns: vec![
                ColumnSpec::new("Besugo", ColumnKind::Flag, 1),
                ColumnSpec::new("Besugo", ColumnKind::Value, 1),
                ColumnSpec::new("Cabrilla", ColumnKind::Flag, 0),
            ],
        };
        let quotas = QuotaSet {
            pinned: pin.into_iter().collect(),
            ..QuotaSet::default()
        };
        resolve(&table, &quotas).unwrap()
    }

    #[test]
    fn zero_target_columns_never_appear() {
        let patterns = row_patterns(&problem_with_pin(None));
        assert_eq!(patterns.len(), 1);
        // Two open columns, quota one: two candidates.
        assert_eq!(patterns[0].len(), 2);
        for pattern in &patterns[0] {
            assert!(pattern.cols.iter().all(|&pos| pos < 2));
        }
    }

    #[test]
    fn pinned_cell_filters_patterns() {
        let pin = PinnedCell {
            nutrient: "Humedad".to_string(),
            item: "Besugo".to_string(),
            kind: ColumnKind::Value,
        };
        let patterns = row_patterns(&problem_with_pin(Some(pin)));
        assert_eq!(patterns[0].len(), 1);
        assert_eq!(patterns[0][0].cols, vec![1]);
        assert_eq!(patterns[0][0].kind_counts, [0, 1]);
    }
}
