//! Dual numbers for forward-mode automatic differentiation
//!
//! A dual number `a + b·ε` with `ε² = 0` carries a value and its directional
//! derivative. Evaluating `f(a + b·ε)` gives `f(a) + f'(a)·b·ε`, so seeding
//! the tangents with a direction `v` yields `J·v` in a single pass.

use std::ops::{Add, Div, Mul, Neg, Sub};

use super::scalar::Scalar;

/// Value plus tangent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    /// Primal value
    pub value: f64,
    /// Derivative along the seeded direction
    pub tangent: f64,
}

impl Dual {
    /// Create a dual number
    pub const fn new(value: f64, tangent: f64) -> Self {
        Self { value, tangent }
    }

    /// A constant (zero tangent)
    pub const fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Seed a whole input vector with direction `direction`
    pub fn seed(values: &[f64], direction: &[f64]) -> Vec<Self> {
        values
            .iter()
            .zip(direction)
            .map(|(&value, &tangent)| Self::new(value, tangent))
            .collect()
    }

    /// Apply `f` with derivative `df` (both evaluated at the value)
    fn chain(self, f: f64, df: f64) -> Self {
        Self::new(f, df * self.tangent)
    }
}

impl Add for Dual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value, self.tangent + rhs.tangent)
    }
}

impl Sub for Dual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value, self.tangent - rhs.tangent)
    }
}

impl Mul for Dual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.tangent * rhs.value + self.value * rhs.tangent,
        )
    }
}

impl Div for Dual {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.value / rhs.value,
            (self.tangent * rhs.value - self.value * rhs.tangent) / (rhs.value * rhs.value),
        )
    }
}

impl Neg for Dual {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.value, -self.tangent)
    }
}

impl Add<f64> for Dual {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self::new(self.value + rhs, self.tangent)
    }
}

impl Sub<f64> for Dual {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.value - rhs, self.tangent)
    }
}

impl Mul<f64> for Dual {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.tangent * rhs)
    }
}

impl Div<f64> for Dual {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs, self.tangent / rhs)
    }
}

impl Scalar for Dual {
    fn value(&self) -> f64 {
        self.value
    }

    fn sin(self) -> Self {
        self.chain(self.value.sin(), self.value.cos())
    }

    fn cos(self) -> Self {
        self.chain(self.value.cos(), -self.value.sin())
    }

    fn exp(self) -> Self {
        let e = self.value.exp();
        self.chain(e, e)
    }

    fn ln(self) -> Self {
        self.chain(self.value.ln(), self.value.recip())
    }

    fn tanh(self) -> Self {
        let t = self.value.tanh();
        self.chain(t, 1.0 - t * t)
    }

    fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::constant(1.0);
        }
        self.chain(self.value.powi(n), f64::from(n) * self.value.powi(n - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_product_rule() {
        let x = Dual::new(3.0, 1.0);
        let y = Dual::constant(2.0);
        let z = x * x * y;
        assert_relative_eq!(z.value, 18.0);
        assert_relative_eq!(z.tangent, 12.0);
    }

    #[test]
    fn test_quotient_rule() {
        let x = Dual::new(2.0, 1.0);
        let z = Dual::constant(1.0) / x;
        assert_relative_eq!(z.tangent, -0.25);
    }

    #[test]
    fn test_transcendental() {
        let x = Dual::new(0.5, 1.0);
        assert_relative_eq!(x.sin().tangent, 0.5_f64.cos());
        assert_relative_eq!(x.exp().tangent, 0.5_f64.exp());
        assert_relative_eq!(x.ln().tangent, 2.0);
        assert_relative_eq!(x.tanh().tangent, 1.0 - 0.5_f64.tanh().powi(2), epsilon = 1e-12);
        assert_relative_eq!(x.powi(3).tangent, 3.0 * 0.25);
    }

    #[test]
    fn test_seed_direction() {
        let seeded = Dual::seed(&[1.0, 2.0], &[0.0, 1.0]);
        assert_eq!(seeded, vec![Dual::new(1.0, 0.0), Dual::new(2.0, 1.0)]);
    }
}
