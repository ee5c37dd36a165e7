//! Boolean sparsity patterns

use nalgebra::{DMatrix, DVector};

use super::SparsityError;
use crate::autodiff::{jacobian_forward, VectorFunction};

/// Which entries of an m×n matrix are structurally nonzero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparsityPattern {
    rows: usize,
    cols: usize,
    /// Row-major flags
    entries: Vec<bool>,
}

impl SparsityPattern {
    /// Build from row-major flags; `entries` must hold `rows * cols` flags
    pub fn from_entries(rows: usize, cols: usize, entries: Vec<bool>) -> Result<Self, SparsityError> {
        if entries.len() != rows * cols {
            return Err(SparsityError::EntryCount {
                expected: rows * cols,
                found: entries.len(),
            });
        }
        Ok(Self { rows, cols, entries })
    }

    /// Entries whose magnitude exceeds `tolerance`
    pub fn from_matrix(matrix: &DMatrix<f64>, tolerance: f64) -> Self {
        let (rows, cols) = matrix.shape();
        let entries = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| matrix[(i, j)].abs() > tolerance)
            .collect();
        Self { rows, cols, entries }
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, columns)
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Check entry (row, column); out-of-range entries are zero
    pub fn get(&self, row: usize, column: usize) -> bool {
        row < self.rows && column < self.cols && self.entries[row * self.cols + column]
    }

    /// Flags in row-major order
    pub fn iter_row_major(&self) -> impl Iterator<Item = bool> + '_ {
        self.entries.iter().copied()
    }

    /// Number of structural nonzeros
    pub fn nnz(&self) -> usize {
        self.entries.iter().filter(|&&e| e).count()
    }

    /// Fraction of nonzero entries, 0 for an empty pattern
    pub fn density(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.nnz() as f64 / self.entries.len() as f64
        }
    }

    /// Rows in which `column` has a nonzero
    pub fn column_rows(&self, column: usize) -> Vec<usize> {
        (0..self.rows).filter(|&row| self.get(row, column)).collect()
    }

    /// Check that two columns share no nonzero row
    pub fn structurally_orthogonal(&self, a: usize, b: usize) -> bool {
        (0..self.rows).all(|row| !(self.get(row, a) && self.get(row, b)))
    }

    /// Transposed pattern
    #[must_use]
    pub fn transpose(&self) -> Self {
        let entries = (0..self.cols)
            .flat_map(|j| (0..self.rows).map(move |i| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .collect();
        Self { rows: self.cols, cols: self.rows, entries }
    }

    /// 1.0 where nonzero, 0.0 elsewhere
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_iterator(
            self.rows,
            self.cols,
            self.entries.iter().map(|&e| if e { 1.0 } else { 0.0 }),
        )
    }

    /// Check that `matrix` has no nonzero outside the pattern
    pub fn admits(&self, matrix: &DMatrix<f64>) -> Result<bool, SparsityError> {
        if matrix.shape() != self.shape() {
            return Err(SparsityError::ShapeMismatch {
                expected: self.shape(),
                found: matrix.shape(),
            });
        }
        Ok((0..self.rows).all(|i| (0..self.cols).all(|j| self.get(i, j) || matrix[(i, j)] == 0.0)))
    }
}

/// Sparsity pattern of `f`'s Jacobian at `x`
///
/// Entries that happen to vanish at `x` are missed, so callers pick a generic
/// point (e.g. seeded random values).
pub fn detect_pattern<F: VectorFunction>(f: &F, x: &DVector<f64>) -> Result<SparsityPattern, SparsityError> {
    let jacobian = jacobian_forward(f, x)?;
    let pattern = SparsityPattern::from_matrix(&jacobian, 0.0);
    log::debug!(
        "Detected {}x{} pattern with {} nonzeros",
        pattern.rows(),
        pattern.cols(),
        pattern.nnz(),
    );
    Ok(pattern)
}
