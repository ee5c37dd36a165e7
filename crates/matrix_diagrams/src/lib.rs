//! # Matrix Diagrams
//!
//! A small layout and drawing framework for static matrix-calculus figures.
//!
//! ## Features
//!
//! - **Positioned drawables**: place shapes to the right of, or on top of, one another
//! - **Matrix glyphs**: cell grids colored by entry magnitude along a fixed hue
//! - **Two backends**: SVG documents and PNG rasters from the same draw list
//! - **Figure math**: forward/reverse-mode Jacobians, sparsity patterns and column coloring
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use matrix_diagrams::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DiagramConfig::default();
//!     let a = DMatrix::from_row_slice(2, 2, &[1.0, -2.0, 0.0, 4.0]);
//!
//!     let mut row = Row::new(config.layout.spacing);
//!     row.push(MatrixGlyph::new(a.clone()).with_colormap(config.colormap.to_colormap()));
//!     row.push(OperatorGlyph::new("=", config.font.operator_size));
//!     row.push(MatrixGlyph::new(a).with_colormap(config.colormap.to_colormap()));
//!
//!     let mut scene = Scene::new(400.0, 200.0);
//!     scene.extend(row.build());
//!     render_to_file(&scene, "figure.svg", &config)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Configuration
pub mod config;
pub mod core;

// Drawing framework
pub mod foundation;
pub mod color;
pub mod scene;
pub mod widgets;
pub mod render;

// Figure math
pub mod autodiff;
pub mod sparsity;

/// Common imports for figure builders
pub mod prelude {
    pub use crate::{
        color::{Color, ColorScale, MagnitudeColormap, Palette},
        config::{Config, ConfigError},
        core::config::{CanvasConfig, ColormapConfig, DiagramConfig, FontConfig, LayoutConfig},
        foundation::math::Vec2,
        scene::{
            layout_row, place_above, place_below, place_on_top, place_right_of,
            Bounds, Drawable, HorizontalAlign, Positioned, Row, Scene,
        },
        widgets::{MatrixFlags, MatrixGlyph, OperatorGlyph, Spacer, TextLabel},
        render::{
            render_to_file, DrawCommand, DrawList, OutputFormat, RasterBackend,
            RenderBackend, RenderError, Stroke, SvgBackend,
        },
        autodiff::{
            evaluate, jacobian_forward, jacobian_reverse, jvp, vjp, AutodiffError, Compose, Dual,
            Linear, Scalar, Tape, Var, VectorFunction,
        },
        sparsity::{
            detect_pattern, row_coloring, ColoringOrder, ColumnColoring, SparsityError,
            SparsityPattern,
        },
    };
    pub use nalgebra::{DMatrix, DVector};
}
