//! Jacobians, Jacobian-vector products and vector-Jacobian products
//!
//! For F: ℝⁿ → ℝᵐ the Jacobian is the m×n matrix `J[i, j] = ∂Fᵢ/∂xⱼ`.
//! Forward mode builds it column by column from n JVPs; reverse mode builds
//! it row by row from m VJPs over a single recorded pass.

use nalgebra::{DMatrix, DVector};

use super::dual::Dual;
use super::scalar::Scalar;
use super::tape::Tape;
use super::AutodiffError;

/// A function ℝⁿ → ℝᵐ written once for every [`Scalar`]
pub trait VectorFunction {
    /// Evaluate at `x`
    fn eval<S: Scalar>(&self, x: &[S]) -> Vec<S>;

    /// Required input dimension, `None` when any length is accepted
    fn inputs(&self) -> Option<usize> {
        None
    }
}

/// The composition `outer ∘ inner`
#[derive(Debug, Clone)]
pub struct Compose<F, G> {
    /// Applied second
    pub outer: F,
    /// Applied first
    pub inner: G,
}

impl<F, G> Compose<F, G> {
    /// `outer(inner(x))`
    pub const fn new(outer: F, inner: G) -> Self {
        Self { outer, inner }
    }
}

impl<F: VectorFunction, G: VectorFunction> VectorFunction for Compose<F, G> {
    fn eval<S: Scalar>(&self, x: &[S]) -> Vec<S> {
        self.outer.eval(&self.inner.eval(x))
    }

    fn inputs(&self) -> Option<usize> {
        self.inner.inputs()
    }
}

/// The linear map `x ↦ A·x`
#[derive(Debug, Clone)]
pub struct Linear {
    /// The matrix `A`
    pub matrix: DMatrix<f64>,
}

impl Linear {
    /// Wrap a matrix
    pub const fn new(matrix: DMatrix<f64>) -> Self {
        Self { matrix }
    }
}

impl VectorFunction for Linear {
    fn eval<S: Scalar>(&self, x: &[S]) -> Vec<S> {
        let Some(first) = x.first() else {
            return Vec::new();
        };
        let zero = first.zero_like();

        self.matrix
            .row_iter()
            .map(|row| {
                row.iter()
                    .zip(x)
                    .fold(zero, |acc, (&a, &xj)| acc + xj * a)
            })
            .collect()
    }

    fn inputs(&self) -> Option<usize> {
        Some(self.matrix.ncols())
    }
}

fn check_input<F: VectorFunction>(f: &F, x: &DVector<f64>) -> Result<(), AutodiffError> {
    if x.is_empty() {
        return Err(AutodiffError::EmptyInput);
    }
    match f.inputs() {
        Some(expected) => check_len(expected, x.len()),
        None => Ok(()),
    }
}

fn check_len(expected: usize, found: usize) -> Result<(), AutodiffError> {
    if expected == found {
        Ok(())
    } else {
        Err(AutodiffError::DimensionMismatch { expected, found })
    }
}

/// Plain evaluation `F(x)`
pub fn evaluate<F: VectorFunction>(f: &F, x: &DVector<f64>) -> DVector<f64> {
    DVector::from_vec(f.eval(x.as_slice()))
}

/// Jacobian-vector product `J(x)·v` in one forward pass
pub fn jvp<F: VectorFunction>(f: &F, x: &DVector<f64>, v: &DVector<f64>) -> Result<DVector<f64>, AutodiffError> {
    check_input(f, x)?;
    check_len(x.len(), v.len())?;

    let seeded = Dual::seed(x.as_slice(), v.as_slice());
    let tangents = f.eval(&seeded).iter().map(|d| d.tangent).collect();
    Ok(DVector::from_vec(tangents))
}

/// Vector-Jacobian product `wᵀ·J(x)` in one reverse sweep
pub fn vjp<F: VectorFunction>(f: &F, x: &DVector<f64>, w: &DVector<f64>) -> Result<DVector<f64>, AutodiffError> {
    check_input(f, x)?;

    let tape = Tape::new();
    let inputs = tape.vars(x.as_slice());
    let outputs = f.eval(&inputs);
    check_len(outputs.len(), w.len())?;

    // Fold the cotangent into a single scalar output, then sweep once
    let Some(first) = outputs.first() else {
        return Ok(DVector::zeros(x.len()));
    };
    let weighted = outputs
        .iter()
        .zip(w.iter())
        .fold(first.zero_like(), |acc, (&y, &wi)| acc + y * wi);

    let adjoints = tape.gradient(&weighted);
    Ok(DVector::from_iterator(x.len(), inputs.iter().map(|v| adjoints[v.index()])))
}

/// Full Jacobian, one forward pass per input column
pub fn jacobian_forward<F: VectorFunction>(f: &F, x: &DVector<f64>) -> Result<DMatrix<f64>, AutodiffError> {
    check_input(f, x)?;
    let n = x.len();

    let mut columns = Vec::with_capacity(n);
    for j in 0..n {
        let direction = crate::foundation::math::basis_vector(n, j);
        columns.push(jvp(f, x, &direction)?);
    }

    let m = columns.first().map_or(0, |column| column.len());
    log::debug!("Forward-mode Jacobian {m}x{n} from {n} passes");
    Ok(DMatrix::from_columns(&columns))
}

/// Full Jacobian, one recorded pass and one backward sweep per output row
pub fn jacobian_reverse<F: VectorFunction>(f: &F, x: &DVector<f64>) -> Result<DMatrix<f64>, AutodiffError> {
    check_input(f, x)?;
    let n = x.len();

    let tape = Tape::new();
    let inputs = tape.vars(x.as_slice());
    let outputs = f.eval(&inputs);
    let m = outputs.len();

    let mut jacobian = DMatrix::zeros(m, n);
    for (i, output) in outputs.iter().enumerate() {
        let adjoints = tape.gradient(output);
        for (j, input) in inputs.iter().enumerate() {
            jacobian[(i, j)] = adjoints[input.index()];
        }
    }

    log::debug!("Reverse-mode Jacobian {m}x{n} from {m} sweeps over {} nodes", tape.len());
    Ok(jacobian)
}
