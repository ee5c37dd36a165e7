//! Math utilities and types
//!
//! Layout runs in `f32` points; matrix data stays in `f64` through `nalgebra`.

pub use nalgebra::{DMatrix, DVector, Vector2};

/// 2D vector type used for positions and sizes
pub type Vec2 = Vector2<f32>;

/// Largest absolute entry of a matrix, ignoring non-finite values
///
/// Returns `0.0` for an empty matrix.
pub fn max_abs(matrix: &DMatrix<f64>) -> f64 {
    matrix
        .iter()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Standard basis vector `e_index` of the given dimension
///
/// An out-of-range index yields the zero vector.
pub fn basis_vector(dimension: usize, index: usize) -> DVector<f64> {
    let mut v = DVector::zeros(dimension);
    if index < dimension {
        v[index] = 1.0;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_abs_ignores_nan() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, -3.5, f64::NAN, 2.0]);
        assert_eq!(max_abs(&m), 3.5);
    }

    #[test]
    fn test_max_abs_empty() {
        let m = DMatrix::<f64>::zeros(0, 3);
        assert_eq!(max_abs(&m), 0.0);
    }

    #[test]
    fn test_basis_vector() {
        let e = basis_vector(3, 1);
        assert_eq!(e.as_slice(), &[0.0, 1.0, 0.0]);
        assert_eq!(basis_vector(2, 5).as_slice(), &[0.0, 0.0]);
    }
}
