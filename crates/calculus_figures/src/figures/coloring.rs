//! Column coloring: `J·S` packs structurally orthogonal columns together

use matrix_diagrams::foundation::math::max_abs;
use matrix_diagrams::prelude::*;

use super::FigureContext;
use crate::data::{random_point, Banded};
use crate::error::FigureError;

/// File stem
pub const NAME: &str = "coloring";

/// Canvas size in points
pub const SIZE: (f32, f32) = (560.0, 260.0);

const DIMENSION: usize = 8;
const HALF_BANDWIDTH: usize = 1;

/// Colored pattern · seed matrix = compressed Jacobian
///
/// Every column of the pattern takes its group's color, the seed matrix
/// shows which columns are summed, and the compressed Jacobian has one
/// column per group.
pub fn build(ctx: &FigureContext) -> Result<Scene, FigureError> {
    let mut rng = ctx.rng();
    let f = Banded::new(HALF_BANDWIDTH);
    let x = random_point(&mut rng, DIMENSION);

    let pattern = detect_pattern(&f, &x)?;
    let jacobian = jacobian_forward(&f, &x)?;
    let coloring = ColumnColoring::greedy(&pattern, ColoringOrder::Natural);
    let compressed = coloring.compress(&jacobian)?;

    let recovered = coloring.decompress(&compressed, &pattern)?;
    log::debug!(
        "{} columns in {} groups, recovery error {:e}",
        pattern.cols(),
        coloring.num_colors(),
        max_abs(&(recovered - &jacobian)),
    );

    let palette = Palette::categorical(coloring.num_colors());
    let column_colors: Vec<Color> = coloring.colors().iter().map(|&color| palette[color]).collect();

    let mut row = ctx.row();
    row.push(ctx.structure(pattern.to_matrix()).with_column_colors(&column_colors))
        .push(ctx.times())
        .push(ctx.structure(coloring.seed_matrix()).with_column_colors(&palette))
        .push(ctx.equals())
        .push(ctx.structure(compressed).with_column_colors(&palette));

    let compressed_caption = format!("J S, {} colors", coloring.num_colors());
    Ok(ctx.compose(
        SIZE,
        row.build(),
        &[(0, "pattern of J"), (2, "S"), (4, compressed_caption.as_str())],
    ))
}
