//! Forward mode: one tangent pass yields one Jacobian column, `J·eⱼ = J[:, j]`

use matrix_diagrams::foundation::math::{basis_vector, max_abs};
use matrix_diagrams::prelude::*;

use super::{FigureContext, HIGHLIGHT};
use crate::data::{random_point, Warp};
use crate::error::FigureError;

/// File stem
pub const NAME: &str = "forward_mode";

/// Canvas size in points
pub const SIZE: (f32, f32) = (400.0, 200.0);

/// Seeded input direction (zero-based)
const COLUMN: usize = 1;

/// Jacobian, seed direction and tangent product at the seeded point
fn operands(ctx: &FigureContext) -> Result<(DMatrix<f64>, DVector<f64>, DVector<f64>), FigureError> {
    let mut rng = ctx.rng();
    let x = random_point(&mut rng, Warp::INPUTS);
    let jacobian = jacobian_forward(&Warp, &x)?;
    let seed = basis_vector(Warp::INPUTS, COLUMN);
    let product = jvp(&Warp, &x, &seed)?;
    Ok((jacobian, seed, product))
}

/// `J · eⱼ = J eⱼ`, with column j outlined in J and the product
pub fn build(ctx: &FigureContext) -> Result<Scene, FigureError> {
    let (jacobian, seed, product) = operands(ctx)?;

    let scale = ColorScale::Fixed(max_abs(&jacobian));
    let (rows, cols) = jacobian.shape();

    let mut row = ctx.row();
    row.push(ctx.matrix(jacobian).with_scale(scale))
        .push(ctx.times())
        .push(ctx.matrix(DMatrix::from_column_slice(cols, 1, seed.as_slice())).highlight_cell(COLUMN, 0, HIGHLIGHT))
        .push(ctx.equals())
        .push(
            ctx.matrix(DMatrix::from_column_slice(rows, 1, product.as_slice()))
                .with_scale(scale)
                .highlight_column(0, HIGHLIGHT),
        );

    let mut items = row.build();
    let frame = place_on_top(&items[0], ctx.outline(rows, cols).highlight_column(COLUMN, HIGHLIGHT));
    items.push(frame.boxed());

    let seed_caption = format!("e{}", COLUMN + 1);
    let product_caption = format!("J e{}", COLUMN + 1);
    Ok(ctx.compose(
        SIZE,
        items,
        &[(0, "J"), (2, seed_caption.as_str()), (4, product_caption.as_str())],
    ))
}
