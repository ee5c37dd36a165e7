//! Error type for the figure run

use matrix_diagrams::autodiff::AutodiffError;
use matrix_diagrams::config::ConfigError;
use matrix_diagrams::render::RenderError;
use matrix_diagrams::sparsity::SparsityError;

/// Anything that can stop a figure from being written
#[derive(Debug, thiserror::Error)]
pub enum FigureError {
    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration was read but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Differentiating figure data failed
    #[error("Autodiff error: {0}")]
    Autodiff(#[from] AutodiffError),

    /// Sparsity or coloring computation failed
    #[error("Sparsity error: {0}")]
    Sparsity(#[from] SparsityError),

    /// Rendering or writing a file failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Creating the output directory failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
