//! Dense cost matrices.

use rayon::prelude::*;
use slotforge_core::{AssignmentProblem, Cost, CostModel, Result, SlotForgeError};

/// A dense row-major matrix of costs.
///
/// Rows are entities and columns are persons. Excluded pairings hold
/// [`Cost::FORBIDDEN`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<Cost>,
}

impl CostMatrix {
    /// Creates a matrix from row-major cells.
    ///
    /// # Errors
    ///
    /// - [`SlotForgeError::DimensionMismatch`] if `cells.len() != rows * cols`
    /// - [`SlotForgeError::CostOutOfRange`] if a cell exceeds [`Cost::FORBIDDEN`]
    pub fn new(rows: usize, cols: usize, cells: Vec<Cost>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(SlotForgeError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: cols,
                rows: if cols == 0 { 0 } else { cells.len() / cols },
                cols,
            });
        }
        // Larger values overflow the potential arithmetic.
        if let Some(cost) = cells.iter().find(|c| c.value() > Cost::FORBIDDEN.value()) {
            return Err(SlotForgeError::CostOutOfRange(cost.value()));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Creates a matrix from nested rows of raw costs.
    ///
    /// # Errors
    ///
    /// Returns [`SlotForgeError::DimensionMismatch`] if the rows are ragged and
    /// [`SlotForgeError::CostOutOfRange`] for cells above [`Cost::FORBIDDEN`].
    ///
    /// # Examples
    ///
    /// ```
    /// use slotforge_solver::CostMatrix;
    ///
    /// let matrix = CostMatrix::from_rows(vec![vec![1, 4], vec![4, 1]]).unwrap();
    /// assert_eq!(matrix.rows(), 2);
    /// assert_eq!(matrix.get(1, 1).value(), 1);
    /// assert!(CostMatrix::from_rows(vec![vec![1, 4], vec![4]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(SlotForgeError::DimensionMismatch {
                expected_rows: row_count,
                expected_cols: cols,
                rows: row_count,
                cols: bad.len(),
            });
        }
        let cells = rows.into_iter().flatten().map(Cost::of).collect();
        Self::new(row_count, cols, cells)
    }

    /// Weights every preference of `problem` with `model`.
    ///
    /// Rows are built in parallel; cells excluded by the model become
    /// [`Cost::FORBIDDEN`].
    pub fn from_problem(problem: &AssignmentProblem, model: &CostModel) -> Self {
        let rows: Vec<Vec<Cost>> = (0..problem.entity_count())
            .into_par_iter()
            .map(|entity| {
                problem
                    .preference_row(entity)
                    .iter()
                    .map(|&p| model.cell_cost(p).unwrap_or(Cost::FORBIDDEN))
                    .collect()
            })
            .collect();

        Self {
            rows: problem.entity_count(),
            cols: problem.person_count(),
            cells: rows.into_iter().flatten().collect(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cost {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn is_forbidden(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_forbidden()
    }

    pub fn row(&self, row: usize) -> &[Cost] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn transposed(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                cells.push(self.get(row, col));
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Keeps only the listed rows and columns, in the given order.
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Self {
        let cells = rows
            .iter()
            .flat_map(|&r| cols.iter().map(move |&c| self.get(r, c)))
            .collect();
        Self {
            rows: rows.len(),
            cols: cols.len(),
            cells,
        }
    }

    /// Fails unless the matrix is `rows` x `cols`.
    pub fn expect_shape(&self, rows: usize, cols: usize) -> Result<()> {
        if self.rows == rows && self.cols == cols {
            Ok(())
        } else {
            Err(SlotForgeError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: cols,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use slotforge_core::{Entity, Person};

    use super::*;

    #[test]
    fn test_from_problem_weights_cells() {
        let problem = AssignmentProblem::new(
            vec![Entity::unit("E1"), Entity::unit("E2")],
            vec![Person::unit("P1"), Person::unit("P2"), Person::unit("P3")],
            vec![vec![1, 2, 3], vec![4, 1, 2]],
        )
        .unwrap();

        let matrix = CostMatrix::from_problem(&problem, &CostModel::default());
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
        let first: Vec<u64> = matrix.row(0).iter().map(|c| c.value()).collect();
        assert_eq!(first, vec![1, 4, 100]);
        assert_eq!(matrix.get(1, 0).value(), 10_000);
    }

    #[test]
    fn test_from_problem_forbidden() {
        let problem = AssignmentProblem::new(
            vec![Entity::unit("E1")],
            vec![Person::unit("P1"), Person::unit("P2")],
            vec![vec![4, 1]],
        )
        .unwrap();

        let model = CostModel::default().forbidding_unavailable();
        let matrix = CostMatrix::from_problem(&problem, &model);
        assert!(matrix.is_forbidden(0, 0));
        assert!(!matrix.is_forbidden(0, 1));
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = CostMatrix::new(2, 2, vec![Cost::ZERO; 3]).unwrap_err();
        assert!(matches!(err, SlotForgeError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_rejects_costs_above_forbidden() {
        let err = CostMatrix::from_rows(vec![vec![u64::MAX, 0], vec![0, u64::MAX]]).unwrap_err();
        assert_eq!(err, SlotForgeError::CostOutOfRange(u64::MAX));

        let sentinel = Cost::FORBIDDEN.value();
        assert!(CostMatrix::from_rows(vec![vec![sentinel, 0]]).is_ok());
        assert_eq!(
            CostMatrix::new(1, 1, vec![Cost::of(sentinel + 1)]),
            Err(SlotForgeError::CostOutOfRange(sentinel + 1))
        );
    }

    #[test]
    fn test_transpose_and_select() {
        let matrix = CostMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let t = matrix.transposed();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.get(2, 1).value(), 6);

        let s = matrix.select(&[1], &[2, 0]);
        assert_eq!((s.rows(), s.cols()), (1, 2));
        assert_eq!(s.get(0, 0).value(), 6);
        assert_eq!(s.get(0, 1).value(), 4);
    }

    #[test]
    fn test_expect_shape() {
        let matrix = CostMatrix::from_rows(vec![vec![1, 2]]).unwrap();
        assert!(matrix.expect_shape(1, 2).is_ok());
        assert_eq!(
            matrix.expect_shape(2, 2),
            Err(SlotForgeError::DimensionMismatch {
                expected_rows: 2,
                expected_cols: 2,
                rows: 1,
                cols: 2,
            })
        );
    }
}
