//! A banded Jacobian next to its detected sparsity pattern

use matrix_diagrams::prelude::*;

use super::FigureContext;
use crate::data::{random_point, Banded};
use crate::error::FigureError;

/// File stem
pub const NAME: &str = "sparsity_pattern";

/// Canvas size in points
pub const SIZE: (f32, f32) = (520.0, 240.0);

const DIMENSION: usize = 8;
const HALF_BANDWIDTH: usize = 1;

/// `J → pattern(J)` for a tridiagonal map
pub fn build(ctx: &FigureContext) -> Result<Scene, FigureError> {
    let mut rng = ctx.rng();
    let f = Banded::new(HALF_BANDWIDTH);
    let x = random_point(&mut rng, DIMENSION);

    let jacobian = jacobian_reverse(&f, &x)?;
    let pattern = detect_pattern(&f, &x)?;
    if !pattern.admits(&jacobian)? {
        log::warn!("Reverse-mode Jacobian has entries outside the detected pattern");
    }

    let mut row = ctx.row();
    row.push(ctx.matrix(jacobian))
        .push(ctx.operator("\u{2192}"))
        .push(ctx.pattern(&pattern));

    let pattern_caption = format!("pattern, {} nonzeros", pattern.nnz());
    Ok(ctx.compose(SIZE, row.build(), &[(0, "J"), (2, pattern_caption.as_str())]))
}
