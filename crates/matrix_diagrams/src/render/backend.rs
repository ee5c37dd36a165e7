//! Backend abstraction for the rendering system
//!
//! A backend turns a scene into an output document and writes it to disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::raster::RasterBackend;
use super::svg::SvgBackend;
use super::{RenderError, RenderResult};
use crate::core::config::DiagramConfig;
use crate::scene::Scene;

/// Main rendering backend trait
pub trait RenderBackend {
    /// Paint the scene, replacing anything rendered before
    fn render(&mut self, scene: &Scene) -> RenderResult<()>;

    /// Write the last rendered scene to `path`
    fn save(&self, path: &Path) -> RenderResult<()>;
}

/// Output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Scalable vector graphics
    Svg,
    /// Portable network graphics
    Png,
}

impl OutputFormat {
    /// File extension without the dot
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Format for a file extension, case-insensitive
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Format implied by a path's extension
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| RenderError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Render `scene` to `path`, choosing the backend from the file extension
pub fn render_to_file<P: AsRef<Path>>(scene: &Scene, path: P, config: &DiagramConfig) -> RenderResult<()> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    scene.fit_check();

    match format {
        OutputFormat::Svg => {
            let mut backend = SvgBackend::from_config(config);
            backend.render(scene)?;
            backend.save(path)?;
        }
        OutputFormat::Png => {
            let mut backend = RasterBackend::from_config(config)?;
            backend.render(scene)?;
            backend.save(path)?;
        }
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}
