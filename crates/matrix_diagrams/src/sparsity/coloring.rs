//! Greedy column coloring for Jacobian compression
//!
//! Two columns conflict when they share a nonzero row. Greedy coloring walks
//! the columns in a chosen order and gives each the smallest color not used
//! by a conflicting, already-colored column. The result is not minimal in
//! general but is for the banded and block patterns the figures use.

use nalgebra::DMatrix;

use super::pattern::SparsityPattern;
use super::SparsityError;

/// Order in which greedy coloring visits columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColoringOrder {
    /// Left to right
    #[default]
    Natural,
    /// Columns with the most nonzeros first (ties keep natural order)
    LargestFirst,
}

/// Partition of a pattern's columns into structurally orthogonal groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnColoring {
    colors: Vec<usize>,
    num_colors: usize,
}

impl ColumnColoring {
    /// Color the columns of `pattern`
    pub fn greedy(pattern: &SparsityPattern, order: ColoringOrder) -> Self {
        let n = pattern.cols();
        let column_rows: Vec<Vec<usize>> = (0..n).map(|j| pattern.column_rows(j)).collect();

        let mut visit: Vec<usize> = (0..n).collect();
        if order == ColoringOrder::LargestFirst {
            visit.sort_by_key(|&j| std::cmp::Reverse(column_rows[j].len()));
        }

        // row_colors[i] holds colors already claimed by a column touching row i
        let mut row_colors: Vec<Vec<usize>> = vec![Vec::new(); pattern.rows()];
        let mut colors = vec![0; n];
        let mut num_colors = 0;

        for &j in &visit {
            let forbidden: Vec<usize> = column_rows[j]
                .iter()
                .flat_map(|&row| row_colors[row].iter().copied())
                .collect();
            let color = (0..).find(|c| !forbidden.contains(c)).unwrap_or(0);

            colors[j] = color;
            num_colors = num_colors.max(color + 1);
            for &row in &column_rows[j] {
                row_colors[row].push(color);
            }
        }

        log::debug!("Colored {n} columns with {num_colors} colors ({order:?})");
        Self { colors, num_colors }
    }

    /// Color assigned to each column
    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    /// Number of distinct colors
    pub const fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// Columns of each color, in color order
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.num_colors];
        for (column, &color) in self.colors.iter().enumerate() {
            groups[color].push(column);
        }
        groups
    }

    /// n×k seed matrix with `S[j, color(j)] = 1`
    pub fn seed_matrix(&self) -> DMatrix<f64> {
        let mut seed = DMatrix::zeros(self.colors.len(), self.num_colors);
        for (column, &color) in self.colors.iter().enumerate() {
            seed[(column, color)] = 1.0;
        }
        seed
    }

    /// Compressed Jacobian `J·S`: one column per color
    pub fn compress(&self, jacobian: &DMatrix<f64>) -> Result<DMatrix<f64>, SparsityError> {
        if jacobian.ncols() != self.colors.len() {
            return Err(SparsityError::ShapeMismatch {
                expected: (jacobian.nrows(), self.colors.len()),
                found: jacobian.shape(),
            });
        }
        Ok(jacobian * self.seed_matrix())
    }

    /// Recover the Jacobian from its compressed form
    ///
    /// Entry (i, j) is read from row i of column `color(j)`, which only
    /// column j contributes to when the coloring is valid for `pattern`.
    pub fn decompress(&self, compressed: &DMatrix<f64>, pattern: &SparsityPattern) -> Result<DMatrix<f64>, SparsityError> {
        let expected = (pattern.rows(), self.num_colors);
        if compressed.shape() != expected || pattern.cols() != self.colors.len() {
            return Err(SparsityError::ShapeMismatch {
                expected,
                found: compressed.shape(),
            });
        }

        let mut jacobian = DMatrix::zeros(pattern.rows(), pattern.cols());
        for (column, &color) in self.colors.iter().enumerate() {
            for row in pattern.column_rows(column) {
                jacobian[(row, column)] = compressed[(row, color)];
            }
        }
        Ok(jacobian)
    }

    /// Check that every group is pairwise structurally orthogonal
    pub fn is_valid_for(&self, pattern: &SparsityPattern) -> bool {
        self.groups().iter().all(|group| {
            group.iter().enumerate().all(|(k, &a)| {
                group[k + 1..].iter().all(|&b| pattern.structurally_orthogonal(a, b))
            })
        })
    }
}

/// Row coloring for reverse mode: a column coloring of the transpose
pub fn row_coloring(pattern: &SparsityPattern, order: ColoringOrder) -> ColumnColoring {
    ColumnColoring::greedy(&pattern.transpose(), order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded(n: usize, half_bandwidth: usize) -> SparsityPattern {
        let entries = (0..n)
            .flat_map(|i| (0..n).map(move |j| i.abs_diff(j) <= half_bandwidth))
            .collect();
        SparsityPattern::from_entries(n, n, entries).unwrap()
    }

    #[test]
    fn test_tridiagonal_needs_three_colors() {
        let pattern = banded(7, 1);
        let coloring = ColumnColoring::greedy(&pattern, ColoringOrder::Natural);
        assert_eq!(coloring.num_colors(), 3);
        assert_eq!(coloring.colors(), &[0, 1, 2, 0, 1, 2, 0]);
        assert!(coloring.is_valid_for(&pattern));
    }

    #[test]
    fn test_diagonal_needs_one_color() {
        let pattern = banded(5, 0);
        let coloring = ColumnColoring::greedy(&pattern, ColoringOrder::LargestFirst);
        assert_eq!(coloring.num_colors(), 1);
        assert_eq!(coloring.groups(), vec![vec![0, 1, 2, 3, 4]]);
    }

    #[test]
    fn test_dense_needs_one_color_per_column() {
        let pattern = SparsityPattern::from_entries(2, 3, vec![true; 6]).unwrap();
        let coloring = ColumnColoring::greedy(&pattern, ColoringOrder::Natural);
        assert_eq!(coloring.num_colors(), 3);
    }

    #[test]
    fn test_largest_first_on_arrow() {
        // Dense first row and column, diagonal elsewhere
        let n = 5;
        let entries = (0..n)
            .flat_map(|i| (0..n).map(move |j| i == 0 || j == 0 || i == j))
            .collect();
        let pattern = SparsityPattern::from_entries(n, n, entries).unwrap();

        let coloring = ColumnColoring::greedy(&pattern, ColoringOrder::LargestFirst);
        assert!(coloring.is_valid_for(&pattern));
        // Every column meets row 0, so all columns conflict
        assert_eq!(coloring.num_colors(), n);
    }

    #[test]
    fn test_compress_decompress() {
        let pattern = banded(6, 1);
        let coloring = ColumnColoring::greedy(&pattern, ColoringOrder::Natural);

        let mut jacobian = pattern.to_matrix();
        for (k, value) in jacobian.iter_mut().enumerate() {
            *value *= k as f64 + 1.0;
        }

        let compressed = coloring.compress(&jacobian).unwrap();
        assert_eq!(compressed.shape(), (6, 3));
        assert_eq!(coloring.decompress(&compressed, &pattern).unwrap(), jacobian);
    }

    #[test]
    fn test_seed_matrix() {
        let coloring = ColumnColoring::greedy(&banded(4, 1), ColoringOrder::Natural);
        let seed = coloring.seed_matrix();
        assert_eq!(seed.shape(), (4, 3));
        for j in 0..4 {
            assert_eq!(seed.row(j).sum(), 1.0);
        }
        assert_eq!(seed[(3, 0)], 1.0);
    }

    #[test]
    fn test_shape_errors() {
        let coloring = ColumnColoring::greedy(&banded(3, 1), ColoringOrder::Natural);
        assert!(coloring.compress(&DMatrix::zeros(3, 4)).is_err());
        assert!(coloring.decompress(&DMatrix::zeros(3, 1), &banded(3, 1)).is_err());
    }

    #[test]
    fn test_row_coloring_of_wide_pattern() {
        let pattern = SparsityPattern::from_entries(3, 2, vec![true, false, false, true, true, false]).unwrap();
        let coloring = row_coloring(&pattern, ColoringOrder::Natural);
        // Rows 0 and 2 share column 0; row 1 is alone in column 1
        assert_eq!(coloring.colors(), &[0, 0, 1]);
    }
}
