//! Minimum-cost bipartite matching (Hungarian / Kuhn-Munkres).
//!
//! Rows are inserted one at a time; each insertion grows a shortest
//! augmenting path over reduced costs `cost - u[row] - v[col]`, so the
//! row and column potentials stay dual feasible and the matching stays
//! optimal for the rows inserted so far. O(n²m) for an n x m matrix with
//! n <= m; taller matrices are solved transposed.
//!
//! Tie-break: columns are scanned in ascending order and a candidate only
//! replaces the current best on a strictly smaller value, so among equal
//! slacks the lowest column index wins. Rows are inserted in ascending order.

use slotforge_core::{Cost, Result};
use tracing::trace;

use crate::matrix::CostMatrix;
use crate::scope::SolveScope;

const INF: i64 = i64::MAX / 4;

/// A matching between matrix rows and columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matching {
    /// `(row, col)` pairs sorted by row.
    pub pairs: Vec<(usize, usize)>,
    /// Sum of the matched cells.
    pub total_cost: Cost,
}

impl Matching {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Column matched to `row`, if any.
    pub fn col_for_row(&self, row: usize) -> Option<usize> {
        self.pairs
            .binary_search_by_key(&row, |&(r, _)| r)
            .ok()
            .map(|i| self.pairs[i].1)
    }

    /// Pairs sitting on forbidden cells of `matrix`.
    pub fn forbidden_pairs<'a>(
        &'a self,
        matrix: &'a CostMatrix,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.pairs
            .iter()
            .copied()
            .filter(|&(r, c)| matrix.is_forbidden(r, c))
    }
}

/// Unit-capacity minimum-cost matcher.
///
/// Matches `min(rows, cols)` pairs: every element of the smaller side is
/// matched and the larger side's excess stays unmatched.
///
/// # Examples
///
/// ```
/// use slotforge_solver::{BipartiteMatcher, CostMatrix};
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![4, 1, 3],
///     vec![2, 0, 5],
///     vec![3, 2, 2],
/// ]).unwrap();
///
/// let matching = BipartiteMatcher::new().solve(&matrix).unwrap();
/// assert_eq!(matching.pairs, vec![(0, 1), (1, 0), (2, 2)]);
/// assert_eq!(matching.total_cost.value(), 5);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BipartiteMatcher;

impl BipartiteMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Solves without termination conditions.
    pub fn solve(&self, matrix: &CostMatrix) -> Result<Matching> {
        let mut scope = SolveScope::new();
        scope.start_solving();
        self.solve_in(matrix, &mut scope)
    }

    /// Solves after checking the matrix against the declared entity and
    /// person counts.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionMismatch`](slotforge_core::SlotForgeError::DimensionMismatch)
    /// if the matrix is not `entity_count` x `person_count`.
    pub fn solve_labeled(
        &self,
        matrix: &CostMatrix,
        entity_count: usize,
        person_count: usize,
    ) -> Result<Matching> {
        matrix.expect_shape(entity_count, person_count)?;
        self.solve(matrix)
    }

    /// Solves within an existing scope, polling its termination conditions
    /// once per inserted row.
    pub fn solve_in(&self, matrix: &CostMatrix, scope: &mut SolveScope<'_>) -> Result<Matching> {
        if matrix.rows() == 0 || matrix.cols() == 0 {
            return Ok(Matching::default());
        }

        let mut pairs = if matrix.rows() <= matrix.cols() {
            hungarian(matrix, scope)?
        } else {
            hungarian(&matrix.transposed(), scope)?
                .into_iter()
                .map(|(c, r)| (r, c))
                .collect()
        };
        pairs.sort_unstable();

        let total_cost = pairs.iter().map(|&(r, c)| matrix.get(r, c)).sum();
        Ok(Matching { pairs, total_cost })
    }
}

/// Core routine for `rows <= cols`. Returns `(row, col)` pairs.
fn hungarian(matrix: &CostMatrix, scope: &mut SolveScope<'_>) -> Result<Vec<(usize, usize)>> {
    let n = matrix.rows();
    let m = matrix.cols();
    debug_assert!(n <= m);

    // 1-based; index 0 is the virtual root column.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut row_of = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];
    let mut min_slack = vec![INF; m + 1];
    let mut used = vec![false; m + 1];

    for row in 1..=n {
        scope.check_termination()?;

        row_of[0] = row;
        let mut col0 = 0usize;
        min_slack.fill(INF);
        used.fill(false);

        loop {
            used[col0] = true;
            let row0 = row_of[col0];
            let mut delta = INF;
            let mut col1 = 0usize;

            for col in 1..=m {
                if used[col] {
                    continue;
                }
                let reduced = matrix.get(row0 - 1, col - 1).as_i64() - u[row0] - v[col];
                if reduced < min_slack[col] {
                    min_slack[col] = reduced;
                    way[col] = col0;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    col1 = col;
                }
            }

            for col in 0..=m {
                if used[col] {
                    u[row_of[col]] += delta;
                    v[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }

            col0 = col1;
            if row_of[col0] == 0 {
                break;
            }
        }

        // Flip the augmenting path back to the root.
        loop {
            let prev = way[col0];
            row_of[col0] = row_of[prev];
            col0 = prev;
            if col0 == 0 {
                break;
            }
        }

        let count = scope.increment_augmentation_count();
        trace!(event = "augment", row = row - 1, augmentations = count);
    }

    Ok((1..=m)
        .filter(|&col| row_of[col] != 0)
        .map(|col| (row_of[col] - 1, col - 1))
        .collect())
}
