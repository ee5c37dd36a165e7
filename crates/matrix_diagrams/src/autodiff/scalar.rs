//! Scalar abstraction shared by plain, forward and reverse evaluation

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Number type a [`super::VectorFunction`] is written against
///
/// Constants enter expressions only through the mixed `f64` operators, which
/// keeps reverse-mode variables tied to their tape.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Primal value
    fn value(&self) -> f64;

    /// Sine
    #[must_use]
    fn sin(self) -> Self;

    /// Cosine
    #[must_use]
    fn cos(self) -> Self;

    /// Natural exponential
    #[must_use]
    fn exp(self) -> Self;

    /// Natural logarithm
    #[must_use]
    fn ln(self) -> Self;

    /// Hyperbolic tangent
    #[must_use]
    fn tanh(self) -> Self;

    /// Integer power
    #[must_use]
    fn powi(self, n: i32) -> Self;

    /// Zero with the same provenance as `self`
    #[must_use]
    fn zero_like(self) -> Self {
        self * 0.0
    }
}

impl Scalar for f64 {
    fn value(&self) -> f64 {
        *self
    }

    fn sin(self) -> Self {
        Self::sin(self)
    }

    fn cos(self) -> Self {
        Self::cos(self)
    }

    fn exp(self) -> Self {
        Self::exp(self)
    }

    fn ln(self) -> Self {
        Self::ln(self)
    }

    fn tanh(self) -> Self {
        Self::tanh(self)
    }

    fn powi(self, n: i32) -> Self {
        Self::powi(self, n)
    }
}
