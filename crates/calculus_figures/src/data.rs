//! Seeded figure data and the example functions being differentiated

use matrix_diagrams::autodiff::{Linear, Scalar, VectorFunction};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::Rng;

/// Matrix with entries drawn uniformly from [-1, 1], rounded to one decimal
pub fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, cols, |_, _| round_tenth(rng.gen_range(-1.0..=1.0)))
}

/// Evaluation point with coordinates drawn uniformly from [-1, 1]
pub fn random_point(rng: &mut StdRng, dimension: usize) -> DVector<f64> {
    DVector::from_fn(dimension, |_, _| round_tenth(rng.gen_range(-1.0..=1.0)))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A dense layer `x ↦ tanh(W·x)`
#[derive(Debug, Clone)]
pub struct Layer {
    linear: Linear,
}

impl Layer {
    /// Layer with random weights mapping ℝⁿ → ℝᵐ
    pub fn random(rng: &mut StdRng, outputs: usize, inputs: usize) -> Self {
        Self {
            linear: Linear::new(random_matrix(rng, outputs, inputs)),
        }
    }

    /// Input dimension
    pub fn inputs(&self) -> usize {
        self.linear.matrix.ncols()
    }
}

impl VectorFunction for Layer {
    fn eval<S: Scalar>(&self, x: &[S]) -> Vec<S> {
        self.linear.eval(x).into_iter().map(Scalar::tanh).collect()
    }

    fn inputs(&self) -> Option<usize> {
        self.linear.inputs()
    }
}

/// A small nonlinear map ℝ³ → ℝ⁴
///
/// `f(x) = [x₀·x₁, sin(x₁) + x₂, exp(x₀) - x₂², x₀ + x₁·x₂]`
#[derive(Debug, Clone, Copy)]
pub struct Warp;

impl Warp {
    /// Input dimension
    pub const INPUTS: usize = 3;
}

impl VectorFunction for Warp {
    fn eval<S: Scalar>(&self, x: &[S]) -> Vec<S> {
        vec![
            x[0] * x[1],
            x[1].sin() + x[2],
            x[0].exp() - x[2].powi(2),
            x[0] + x[1] * x[2],
        ]
    }

    fn inputs(&self) -> Option<usize> {
        Some(Self::INPUTS)
    }
}

/// A banded map ℝⁿ → ℝⁿ
///
/// `fᵢ(x) = exp(xᵢ) + Σ sin(xₖ)` over `0 < |k - i| ≤ half_bandwidth`, so the
/// Jacobian has exactly the band as its nonzeros on [-1, 1]ⁿ.
#[derive(Debug, Clone, Copy)]
pub struct Banded {
    /// Number of off-diagonals on each side
    pub half_bandwidth: usize,
}

impl Banded {
    /// Band with `half_bandwidth` off-diagonals on each side
    pub const fn new(half_bandwidth: usize) -> Self {
        Self { half_bandwidth }
    }
}

impl VectorFunction for Banded {
    fn eval<S: Scalar>(&self, x: &[S]) -> Vec<S> {
        let n = x.len();
        (0..n)
            .map(|i| {
                let lo = i.saturating_sub(self.half_bandwidth);
                let hi = (i + self.half_bandwidth).min(n.saturating_sub(1));
                (lo..=hi)
                    .filter(|&k| k != i)
                    .fold(x[i].exp(), |acc, k| acc + x[k].sin())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use matrix_diagrams::autodiff::{jacobian_forward, jacobian_reverse};
    use matrix_diagrams::sparsity::detect_pattern;
    use rand::SeedableRng;

    #[test]
    fn test_random_data_is_seeded() {
        let a = random_matrix(&mut StdRng::seed_from_u64(3), 3, 4);
        let b = random_matrix(&mut StdRng::seed_from_u64(3), 3, 4);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-1.0..=1.0).contains(v)));
        assert!(a.iter().all(|v| (v * 10.0 - (v * 10.0).round()).abs() < 1e-9));
    }

    #[test]
    fn test_banded_pattern() {
        let x = random_point(&mut StdRng::seed_from_u64(5), 6);
        let pattern = detect_pattern(&Banded::new(1), &x).unwrap();
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(pattern.get(i, j), i.abs_diff(j) <= 1, "entry ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_warp_modes_agree() {
        let x = DVector::from_vec(vec![0.5, -0.3, 0.8]);
        let forward = jacobian_forward(&Warp, &x).unwrap();
        let reverse = jacobian_reverse(&Warp, &x).unwrap();
        assert_eq!(forward.shape(), (4, Warp::INPUTS));
        assert_relative_eq!(forward, reverse, epsilon = 1e-12);
        assert_relative_eq!(forward[(2, 0)], 0.5_f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_layer_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::random(&mut rng, 2, 3);
        let x = random_point(&mut rng, layer.inputs());
        let j = jacobian_forward(&layer, &x).unwrap();
        assert_eq!(j.shape(), (2, 3));
    }
}
