//! Chain rule: `J(f∘g)(x) = Jf(g(x)) · Jg(x)`

use matrix_diagrams::foundation::math::max_abs;
use matrix_diagrams::prelude::*;

use super::FigureContext;
use crate::data::{random_point, Layer};
use crate::error::FigureError;

/// File stem
pub const NAME: &str = "chain_rule";

/// Canvas size in points
pub const SIZE: (f32, f32) = (480.0, 200.0);

/// Two random tanh layers, their Jacobians and the Jacobian of the composition
///
/// All three matrices share one color scale so equal magnitudes get equal
/// shades across the equation.
pub fn build(ctx: &FigureContext) -> Result<Scene, FigureError> {
    let mut rng = ctx.rng();
    let inner = Layer::random(&mut rng, 3, 4);
    let outer = Layer::random(&mut rng, 2, 3);
    let x = random_point(&mut rng, inner.inputs());

    let j_inner = jacobian_forward(&inner, &x)?;
    let j_outer = jacobian_reverse(&outer, &evaluate(&inner, &x))?;
    let j_composed = jacobian_forward(&Compose::new(outer, inner), &x)?;

    let scale = ColorScale::Fixed(
        [&j_composed, &j_outer, &j_inner]
            .into_iter()
            .map(max_abs)
            .fold(0.0, f64::max),
    );

    let mut row = ctx.row();
    row.push(ctx.matrix(j_composed).with_scale(scale))
        .push(ctx.equals())
        .push(ctx.matrix(j_outer).with_scale(scale))
        .push(ctx.times())
        .push(ctx.matrix(j_inner).with_scale(scale));

    Ok(ctx.compose(
        SIZE,
        row.build(),
        &[(0, "J(f\u{2218}g)(x)"), (2, "Jf(g(x))"), (4, "Jg(x)")],
    ))
}
