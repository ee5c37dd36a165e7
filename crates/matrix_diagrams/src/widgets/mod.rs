//! Widgets module
//!
//! Contains the drawable shapes figures are composed of.

pub mod label;
pub mod operator;
pub mod matrix;

pub use label::{estimate_text_width, Spacer, TextLabel};
pub use operator::OperatorGlyph;
pub use matrix::{CellHighlight, MatrixFlags, MatrixGlyph};
