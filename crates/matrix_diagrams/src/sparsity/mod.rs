//! Sparsity patterns and Jacobian coloring
//!
//! Columns of a Jacobian that never share a nonzero row are structurally
//! orthogonal: one forward pass seeded with their sum recovers all of them.
//! Coloring partitions the columns into such groups, so a sparse Jacobian
//! costs one pass per color instead of one per column.

pub mod pattern;
pub mod coloring;

pub use pattern::{detect_pattern, SparsityPattern};
pub use coloring::{row_coloring, ColoringOrder, ColumnColoring};

/// Errors from sparsity operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SparsityError {
    /// Matrix shape does not match the pattern or seed
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Required (rows, columns)
        expected: (usize, usize),
        /// Supplied (rows, columns)
        found: (usize, usize),
    },

    /// Row-major flags do not fill the requested shape
    #[error("Pattern needs {expected} entries, found {found}")]
    EntryCount {
        /// `rows * cols`
        expected: usize,
        /// Supplied flags
        found: usize,
    },

    /// Detection failed to evaluate the Jacobian
    #[error("Pattern detection failed: {0}")]
    Detection(#[from] crate::autodiff::AutodiffError),
}
