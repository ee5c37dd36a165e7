//! Reverse-mode automatic differentiation on a tape
//!
//! Every operation on a [`Var`] appends a node holding the indices of its (at
//! most two) operands and the local partial derivatives with respect to them.
//! A backward sweep from one output accumulates adjoints for every node.

use std::cell::RefCell;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::scalar::Scalar;

#[derive(Debug, Clone, Copy)]
struct Node {
    parents: [usize; 2],
    partials: [f64; 2],
}

/// Wengert list recording a computation
#[derive(Debug, Default)]
pub struct Tape {
    nodes: RefCell<Vec<Node>>,
}

impl Tape {
    /// Create an empty tape
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an input variable
    pub fn var(&self, value: f64) -> Var<'_> {
        let index = self.push_node([0, 0], [0.0, 0.0]);
        Var { tape: self, index, value }
    }

    /// Register a vector of input variables
    pub fn vars(&self, values: &[f64]) -> Vec<Var<'_>> {
        values.iter().map(|&value| self.var(value)).collect()
    }

    /// Number of recorded nodes
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn push_node(&self, parents: [usize; 2], partials: [f64; 2]) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node { parents, partials });
        nodes.len() - 1
    }

    fn unary(&self, operand: &Var<'_>, value: f64, partial: f64) -> Var<'_> {
        let index = self.push_node([operand.index, operand.index], [partial, 0.0]);
        Var { tape: self, index, value }
    }

    fn binary(&self, lhs: &Var<'_>, rhs: &Var<'_>, value: f64, partials: [f64; 2]) -> Var<'_> {
        debug_assert!(std::ptr::eq(lhs.tape, rhs.tape), "variables from different tapes");
        let index = self.push_node([lhs.index, rhs.index], partials);
        Var { tape: self, index, value }
    }

    /// Adjoints of every recorded node with respect to `output`
    ///
    /// Index the result with [`Var::index`] to read the partial derivative of
    /// `output` with respect to an input.
    pub fn gradient(&self, output: &Var<'_>) -> Vec<f64> {
        debug_assert!(std::ptr::eq(output.tape, self), "variable from a different tape");
        let nodes = self.nodes.borrow();
        let mut adjoints = vec![0.0; nodes.len()];
        adjoints[output.index] = 1.0;

        for i in (0..=output.index).rev() {
            let adjoint = adjoints[i];
            if adjoint == 0.0 {
                continue;
            }
            let node = nodes[i];
            for k in 0..2 {
                adjoints[node.parents[k]] += node.partials[k] * adjoint;
            }
        }

        adjoints
    }
}

/// A value recorded on a [`Tape`]
#[derive(Debug, Clone, Copy)]
pub struct Var<'t> {
    tape: &'t Tape,
    index: usize,
    value: f64,
}

impl<'t> Var<'t> {
    /// Position on the tape
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The tape this variable lives on
    pub const fn tape(&self) -> &'t Tape {
        self.tape
    }
}

impl<'t> Add for Var<'t> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.tape.binary(&self, &rhs, self.value + rhs.value, [1.0, 1.0])
    }
}

impl<'t> Sub for Var<'t> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.tape.binary(&self, &rhs, self.value - rhs.value, [1.0, -1.0])
    }
}

impl<'t> Mul for Var<'t> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.tape.binary(&self, &rhs, self.value * rhs.value, [rhs.value, self.value])
    }
}

impl<'t> Div for Var<'t> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let inv = rhs.value.recip();
        self.tape.binary(
            &self,
            &rhs,
            self.value * inv,
            [inv, -self.value * inv * inv],
        )
    }
}

impl<'t> Neg for Var<'t> {
    type Output = Self;
    fn neg(self) -> Self {
        self.tape.unary(&self, -self.value, -1.0)
    }
}

impl<'t> Add<f64> for Var<'t> {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        self.tape.unary(&self, self.value + rhs, 1.0)
    }
}

impl<'t> Sub<f64> for Var<'t> {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        self.tape.unary(&self, self.value - rhs, 1.0)
    }
}

impl<'t> Mul<f64> for Var<'t> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.tape.unary(&self, self.value * rhs, rhs)
    }
}

impl<'t> Div<f64> for Var<'t> {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        self.tape.unary(&self, self.value / rhs, rhs.recip())
    }
}

impl<'t> Scalar for Var<'t> {
    fn value(&self) -> f64 {
        self.value
    }

    fn sin(self) -> Self {
        self.tape.unary(&self, self.value.sin(), self.value.cos())
    }

    fn cos(self) -> Self {
        self.tape.unary(&self, self.value.cos(), -self.value.sin())
    }

    fn exp(self) -> Self {
        let e = self.value.exp();
        self.tape.unary(&self, e, e)
    }

    fn ln(self) -> Self {
        self.tape.unary(&self, self.value.ln(), self.value.recip())
    }

    fn tanh(self) -> Self {
        let t = self.value.tanh();
        self.tape.unary(&self, t, 1.0 - t * t)
    }

    fn powi(self, n: i32) -> Self {
        let partial = if n == 0 { 0.0 } else { f64::from(n) * self.value.powi(n - 1) };
        self.tape.unary(&self, self.value.powi(n), partial)
    }
}
