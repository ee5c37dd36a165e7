//! The figure catalogue
//!
//! Every figure is a function from a [`FigureContext`] to a [`Scene`] with a
//! fixed file name and canvas size. [`run`] renders all of them in every
//! configured format.

pub mod chain_rule;
pub mod coloring;
pub mod forward_mode;
pub mod jacobian;
pub mod reverse_mode;
pub mod row_coloring;
pub mod sparsity_pattern;

use std::path::PathBuf;

use matrix_diagrams::prelude::*;
use matrix_diagrams::scene::SceneItem;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::FiguresConfig;
use crate::error::FigureError;

/// Outline color for highlighted rows, columns and cells
pub const HIGHLIGHT: Color = Color::rgb(0.839, 0.153, 0.157);

/// Shared inputs of every figure builder
pub struct FigureContext<'a> {
    /// Run configuration
    pub config: &'a FiguresConfig,
    /// Seed of every figure's random data
    pub seed: u64,
}

impl<'a> FigureContext<'a> {
    /// Context for one run
    pub const fn new(config: &'a FiguresConfig) -> Self {
        Self {
            config,
            seed: config.seed,
        }
    }

    /// Fresh generator; each figure draws the same stream for a given seed
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Drawing style
    pub const fn diagram(&self) -> &DiagramConfig {
        &self.config.diagram
    }

    /// Magnitude-colored matrix in the configured style
    pub fn matrix(&self, values: DMatrix<f64>) -> MatrixGlyph {
        MatrixGlyph::new(values)
            .with_cell_size(self.diagram().layout.cell_size)
            .with_colormap(self.diagram().colormap.to_colormap())
    }

    /// Matrix whose exact zeros stay blank
    pub fn structure(&self, values: DMatrix<f64>) -> MatrixGlyph {
        self.matrix(values)
            .with_flags(MatrixFlags::GRID | MatrixFlags::BRACKETS | MatrixFlags::BLANK_ZEROS)
    }

    /// Structure whose nonzeros in row `i` are filled with `colors[i]`
    pub fn row_colored(&self, values: DMatrix<f64>, colors: &[Color]) -> MatrixGlyph {
        let (rows, cols) = values.shape();
        let fills = (0..rows)
            .flat_map(|i| (0..cols).map(move |j| (i, j)))
            .map(|(i, j)| {
                if values[(i, j)] == 0.0 {
                    None
                } else {
                    colors.get(i).copied()
                }
            })
            .collect();
        self.structure(values).with_cell_colors(fills)
    }

    /// Sparsity pattern drawn in the colormap's darkest shade
    pub fn pattern(&self, pattern: &SparsityPattern) -> MatrixGlyph {
        MatrixGlyph::pattern(pattern, self.diagram().colormap.to_colormap().saturated())
            .with_cell_size(self.diagram().layout.cell_size)
    }

    /// Invisible grid of the given shape, used to overlay outlines on a matrix
    pub fn outline(&self, rows: usize, cols: usize) -> MatrixGlyph {
        MatrixGlyph::new(DMatrix::zeros(rows, cols))
            .with_cell_size(self.diagram().layout.cell_size)
            .with_flags(MatrixFlags::BLANK_ZEROS)
    }

    /// Label at the configured label size
    pub fn label(&self, text: impl Into<String>) -> TextLabel {
        TextLabel::new(text, self.diagram().font.label_size)
    }

    /// Operator symbol at the configured operator size
    pub fn operator(&self, symbol: impl Into<String>) -> OperatorGlyph {
        OperatorGlyph::new(symbol, self.diagram().font.operator_size)
    }

    /// `=`
    pub fn equals(&self) -> OperatorGlyph {
        OperatorGlyph::equals(self.diagram().font.operator_size)
    }

    /// `·`
    pub fn times(&self) -> OperatorGlyph {
        OperatorGlyph::times(self.diagram().font.operator_size)
    }

    /// Empty row with the configured spacing
    pub fn row(&self) -> Row {
        Row::new(self.diagram().layout.spacing)
    }

    /// Put laid-out `items` on a canvas with `captions` under the chosen items
    ///
    /// Captions refer to items by index. The result is centered on the canvas.
    pub fn compose(&self, size: (f32, f32), items: Vec<SceneItem>, captions: &[(usize, &str)]) -> Scene {
        let gap = self.diagram().layout.padding;
        let labels: Vec<Positioned<TextLabel>> = captions
            .iter()
            .filter_map(|&(index, text)| {
                items.get(index).map(|anchor| place_below(anchor, self.label(text), gap))
            })
            .collect();

        let mut scene = Scene::new(size.0, size.1);
        scene.extend(items);
        for label in labels {
            scene.add(label);
        }
        scene.center_content();
        scene
    }
}

/// Builds one figure
pub type BuildFn = fn(&FigureContext) -> Result<Scene, FigureError>;

/// A catalogue entry
pub struct Figure {
    /// File stem of the output files
    pub name: &'static str,
    /// Scene builder
    pub build: BuildFn,
}

/// Every figure, in output order
pub const CATALOGUE: [Figure; 7] = [
    Figure { name: chain_rule::NAME, build: chain_rule::build },
    Figure { name: jacobian::NAME, build: jacobian::build },
    Figure { name: forward_mode::NAME, build: forward_mode::build },
    Figure { name: reverse_mode::NAME, build: reverse_mode::build },
    Figure { name: sparsity_pattern::NAME, build: sparsity_pattern::build },
    Figure { name: coloring::NAME, build: coloring::build },
    Figure { name: row_coloring::NAME, build: row_coloring::build },
];

/// Render every figure in every configured format
///
/// Returns the written paths in catalogue order.
pub fn run(config: &FiguresConfig) -> Result<Vec<PathBuf>, FigureError> {
    std::fs::create_dir_all(&config.output_dir)?;
    let context = FigureContext::new(config);
    let mut written = Vec::with_capacity(CATALOGUE.len() * config.formats.len());

    for figure in &CATALOGUE {
        let scene = (figure.build)(&context)?;
        log::debug!("Built {} with {} shapes", figure.name, scene.len());

        for format in &config.formats {
            let path = config
                .output_dir
                .join(format!("{}.{}", figure.name, format.extension()));
            render_to_file(&scene, &path, &config.diagram)?;
            written.push(path);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = CATALOGUE.iter().map(|figure| figure.name).collect();
        assert_eq!(names.len(), CATALOGUE.len());
    }

    #[test]
    fn test_every_figure_fits_its_canvas() {
        let config = FiguresConfig::default();
        let context = FigureContext::new(&config);
        for figure in &CATALOGUE {
            let scene = (figure.build)(&context).unwrap();
            assert!(!scene.is_empty(), "{} is empty", figure.name);
            assert!(scene.fit_check(), "{} overflows its canvas", figure.name);
        }
    }

    #[test]
    fn test_figures_are_reproducible() {
        let config = FiguresConfig::default();
        let context = FigureContext::new(&config);
        for figure in &CATALOGUE {
            let first = (figure.build)(&context).unwrap().draw_list();
            let second = (figure.build)(&context).unwrap().draw_list();
            assert_eq!(first, second, "{} differs between runs", figure.name);
        }
    }

    #[test]
    fn test_compose_places_captions_below() {
        let config = FiguresConfig::default();
        let context = FigureContext::new(&config);
        let mut row = context.row();
        row.push(context.matrix(DMatrix::identity(2, 2)));
        let items = row.build();

        let scene = context.compose((200.0, 120.0), items, &[(0, "I"), (5, "missing")]);
        assert_eq!(scene.len(), 2);
        let caption = &scene.items()[1];
        assert!(caption.top() > scene.items()[0].bottom());
        assert_eq!(caption.center.x, scene.items()[0].center.x);
    }

    #[test]
    fn test_run_writes_every_format() {
        let dir = std::env::temp_dir().join("calculus_figures_run_test");
        let config = FiguresConfig::new().with_output_dir(&dir);
        let written = run(&config).unwrap();

        assert_eq!(written.len(), CATALOGUE.len() * 2);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        assert!(written[0].ends_with("chain_rule.svg"));
        assert!(written[1].ends_with("chain_rule.png"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
