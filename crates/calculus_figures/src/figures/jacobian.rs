//! A Jacobian with its entries printed

use matrix_diagrams::prelude::*;

use super::FigureContext;
use crate::data::{random_point, Warp};
use crate::error::FigureError;

/// File stem
pub const NAME: &str = "jacobian";

/// Canvas size in points
pub const SIZE: (f32, f32) = (360.0, 240.0);

/// `J(x) = [∂fᵢ/∂xⱼ]` of [`Warp`] at a random point, cells twice the usual size
pub fn build(ctx: &FigureContext) -> Result<Scene, FigureError> {
    let mut rng = ctx.rng();
    let x = random_point(&mut rng, Warp::INPUTS);
    let jacobian = jacobian_forward(&Warp, &x)?;

    let diagram = ctx.diagram();
    let values = ctx
        .matrix(jacobian)
        .with_cell_size(diagram.layout.cell_size * 2.0)
        .with_values(2, diagram.font.value_size);

    let mut row = ctx.row();
    row.push(ctx.label("J(x)")).push(ctx.equals()).push(values);

    let point = x.iter().map(|v| format!("{v:.1}")).collect::<Vec<_>>().join(", ");
    let caption = format!("x = ({point})");
    Ok(ctx.compose(SIZE, row.build(), &[(2, caption.as_str())]))
}
