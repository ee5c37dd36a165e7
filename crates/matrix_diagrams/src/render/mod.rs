//! Rendering system
//!
//! Scenes are flattened into a [`DrawList`] and handed to a backend. Two
//! backends exist: [`SvgBackend`] writes a vector document and
//! [`RasterBackend`] paints an RGBA image that is saved as PNG.

pub mod commands;
pub mod backend;
pub mod raster;
pub mod svg;
pub mod text;

pub use commands::{DrawCommand, DrawList, Stroke};
pub use backend::{render_to_file, OutputFormat, RenderBackend};
pub use raster::RasterBackend;
pub use svg::SvgBackend;
pub use text::{FontError, FontRasterizer};

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Font loading failed
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    /// Output path has no supported extension
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Canvas has no pixels
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas {
        /// Requested width
        width: f32,
        /// Requested height
        height: f32,
    },

    /// Nothing has been rendered yet
    #[error("Nothing rendered: call render() before save()")]
    NotRendered,
}
