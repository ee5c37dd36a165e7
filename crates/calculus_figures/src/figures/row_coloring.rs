//! Row coloring, the reverse-mode counterpart: `Sᵀ·J` packs rows together

use matrix_diagrams::prelude::*;

use super::FigureContext;
use crate::data::{random_point, Banded};
use crate::error::FigureError;

/// File stem
pub const NAME: &str = "row_coloring";

/// Canvas size in points
pub const SIZE: (f32, f32) = (760.0, 260.0);

const DIMENSION: usize = 8;
const HALF_BANDWIDTH: usize = 1;

struct Operands {
    pattern: SparsityPattern,
    coloring: ColumnColoring,
    compressed: DMatrix<f64>,
}

fn operands(ctx: &FigureContext) -> Result<Operands, FigureError> {
    let mut rng = ctx.rng();
    let f = Banded::new(HALF_BANDWIDTH);
    let x = random_point(&mut rng, DIMENSION);

    let pattern = detect_pattern(&f, &x)?;
    let jacobian = jacobian_reverse(&f, &x)?;
    let coloring = row_coloring(&pattern, ColoringOrder::Natural);
    let compressed = coloring.compress(&jacobian.transpose())?.transpose();
    Ok(Operands { pattern, coloring, compressed })
}

/// Transposed seed · row-colored pattern = row-compressed Jacobian
pub fn build(ctx: &FigureContext) -> Result<Scene, FigureError> {
    let Operands { pattern, coloring, compressed } = operands(ctx)?;

    let palette = Palette::categorical(coloring.num_colors());
    let row_colors: Vec<Color> = coloring.colors().iter().map(|&color| palette[color]).collect();

    let mut row = ctx.row();
    row.push(ctx.row_colored(coloring.seed_matrix().transpose(), &palette))
        .push(ctx.times())
        .push(ctx.row_colored(pattern.to_matrix(), &row_colors))
        .push(ctx.equals())
        .push(ctx.row_colored(compressed, &palette));

    let compressed_caption = format!("S\u{1d40} J, {} colors", coloring.num_colors());
    Ok(ctx.compose(
        SIZE,
        row.build(),
        &[(0, "S\u{1d40}"), (2, "pattern of J"), (4, compressed_caption.as_str())],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FiguresConfig;
    use approx::assert_relative_eq;

    #[test]
    fn test_compressed_has_one_row_per_color() {
        let config = FiguresConfig::default();
        let ops = operands(&FigureContext::new(&config)).unwrap();

        // Tridiagonal rows need three colors
        assert_eq!(ops.coloring.num_colors(), 3);
        assert_eq!(ops.compressed.shape(), (ops.coloring.num_colors(), DIMENSION));
        assert!(ops.coloring.is_valid_for(&ops.pattern.transpose()));
    }

    #[test]
    fn test_compressed_rows_recover_the_jacobian() {
        let config = FiguresConfig::default();
        let context = FigureContext::new(&config);
        let ops = operands(&context).unwrap();
        let x = random_point(&mut context.rng(), DIMENSION);
        let jacobian = jacobian_forward(&Banded::new(HALF_BANDWIDTH), &x).unwrap();

        let seed = ops.coloring.seed_matrix();
        assert_relative_eq!(ops.compressed, seed.transpose() * &jacobian, epsilon = 1e-12);

        let recovered = ops
            .coloring
            .decompress(&ops.compressed.transpose(), &ops.pattern.transpose())
            .unwrap()
            .transpose();
        assert_relative_eq!(recovered, jacobian, epsilon = 1e-12);
    }
}
