//! Reverse mode: one adjoint sweep yields one Jacobian row, `eᵢᵀ·J = J[i, :]`

use matrix_diagrams::foundation::math::{basis_vector, max_abs};
use matrix_diagrams::prelude::*;

use super::{FigureContext, HIGHLIGHT};
use crate::data::{random_point, Warp};
use crate::error::FigureError;

/// File stem
pub const NAME: &str = "reverse_mode";

/// Canvas size in points
pub const SIZE: (f32, f32) = (480.0, 200.0);

/// Selected output (zero-based)
const ROW: usize = 2;

/// Jacobian, output cotangent and adjoint product at the seeded point
fn operands(ctx: &FigureContext) -> Result<(DMatrix<f64>, DVector<f64>, DVector<f64>), FigureError> {
    let mut rng = ctx.rng();
    let x = random_point(&mut rng, Warp::INPUTS);
    let jacobian = jacobian_reverse(&Warp, &x)?;
    let cotangent = basis_vector(jacobian.nrows(), ROW);
    let product = vjp(&Warp, &x, &cotangent)?;
    Ok((jacobian, cotangent, product))
}

/// `eᵢᵀ · J = eᵢᵀ J`, with row i outlined in J and the product
pub fn build(ctx: &FigureContext) -> Result<Scene, FigureError> {
    let (jacobian, cotangent, product) = operands(ctx)?;
    let (rows, cols) = jacobian.shape();

    let scale = ColorScale::Fixed(max_abs(&jacobian));

    let mut row = ctx.row();
    row.push(ctx.matrix(DMatrix::from_row_slice(1, rows, cotangent.as_slice())).highlight_cell(0, ROW, HIGHLIGHT))
        .push(ctx.times())
        .push(ctx.matrix(jacobian).with_scale(scale))
        .push(ctx.equals())
        .push(
            ctx.matrix(DMatrix::from_row_slice(1, cols, product.as_slice()))
                .with_scale(scale)
                .highlight_row(0, HIGHLIGHT),
        );

    let mut items = row.build();
    let frame = place_on_top(&items[2], ctx.outline(rows, cols).highlight_row(ROW, HIGHLIGHT));
    items.push(frame.boxed());

    let cotangent_caption = format!("e{}\u{1d40}", ROW + 1);
    let product_caption = format!("e{}\u{1d40} J", ROW + 1);
    Ok(ctx.compose(
        SIZE,
        items,
        &[(0, cotangent_caption.as_str()), (2, "J"), (4, product_caption.as_str())],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FiguresConfig;
    use approx::assert_relative_eq;

    #[test]
    fn test_product_is_the_selected_row() {
        let config = FiguresConfig::default();
        let context = FigureContext::new(&config);
        let (jacobian, cotangent, product) = operands(&context).unwrap();

        assert_eq!(cotangent.len(), jacobian.nrows());
        assert_eq!(product.len(), jacobian.ncols());
        assert_relative_eq!(product, jacobian.row(ROW).transpose(), epsilon = 1e-12);
    }

    #[test]
    fn test_reverse_and_forward_jacobians_agree() {
        let config = FiguresConfig::default();
        let context = FigureContext::new(&config);
        let x = random_point(&mut context.rng(), Warp::INPUTS);
        let (jacobian, _, _) = operands(&context).unwrap();
        assert_relative_eq!(jacobian, jacobian_forward(&Warp, &x).unwrap(), epsilon = 1e-12);
    }
}
