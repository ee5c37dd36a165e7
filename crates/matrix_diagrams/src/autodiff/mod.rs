//! Automatic differentiation for figure data
//!
//! Two modes over one generic function interface:
//!
//! - **Forward mode** ([`Dual`]): one pass per input seeds a tangent and yields
//!   one Jacobian column (a Jacobian-vector product).
//! - **Reverse mode** ([`Tape`] / [`Var`]): one recorded pass, then one
//!   backward sweep per output yields one Jacobian row (a vector-Jacobian
//!   product).
//!
//! Functions implement [`VectorFunction`] once, generically over [`Scalar`],
//! and can then be evaluated plainly or differentiated in either mode.

pub mod scalar;
pub mod dual;
pub mod tape;
pub mod jacobian;

pub use scalar::Scalar;
pub use dual::Dual;
pub use tape::{Tape, Var};
pub use jacobian::{
    evaluate, jacobian_forward, jacobian_reverse, jvp, vjp, Compose, Linear, VectorFunction,
};

/// Errors from differentiation helpers
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AutodiffError {
    /// A seed or cotangent vector has the wrong length
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Required length
        expected: usize,
        /// Supplied length
        found: usize,
    },

    /// The function was evaluated at a zero-dimensional point
    #[error("Cannot differentiate at an empty input")]
    EmptyInput,
}
