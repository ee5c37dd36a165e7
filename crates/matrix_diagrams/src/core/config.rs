//! # Unified Configuration System
//!
//! All configuration consumed by the drawing framework lives here: canvas,
//! fonts, layout metrics and the magnitude colormap.
//!
//! ## Configuration Categories
//!
//! - **Canvas Config**: background and raster resolution
//! - **Font Config**: font file resolution and text sizes
//! - **Layout Config**: cell size and spacing between shapes
//! - **Colormap Config**: hue and lightness bounds for matrix cells

use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::color::{Color, MagnitudeColormap};

pub use crate::config::{Config, ConfigError};

/// # Canvas Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Background fill of every figure
    pub background: Color,
    /// Raster pixels per layout point
    pub raster_scale: f32,
}

impl CanvasConfig {
    /// Create a new canvas configuration
    pub const fn new() -> Self {
        Self {
            background: Color::WHITE,
            raster_scale: 2.0,
        }
    }

    /// Set background color
    pub const fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set raster scale
    pub const fn with_raster_scale(mut self, scale: f32) -> Self {
        self.raster_scale = scale;
        self
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Font Configuration
///
/// Raster output needs a TrueType/OpenType file; SVG output only names the
/// family and lets the viewer pick the face.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Explicit font file, searched for when absent
    pub path: Option<String>,
    /// Font family written into SVG output
    pub family: String,
    /// Size of figure labels in points
    pub label_size: f32,
    /// Size of numbers printed inside cells
    pub value_size: f32,
    /// Size of operator glyphs
    pub operator_size: f32,
}

impl FontConfig {
    /// Common font locations tried when no explicit path is configured
    pub const SEARCH_PATHS: [&'static str; 8] = [
        "fonts/DejaVuSans.ttf",
        "resources/fonts/default.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    /// Create a new font configuration
    pub fn new() -> Self {
        Self {
            path: None,
            family: "DejaVu Sans, Helvetica, Arial, sans-serif".to_string(),
            label_size: 16.0,
            value_size: 9.0,
            operator_size: 28.0,
        }
    }

    /// Use an explicit font file
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Resolve the font file to load
    ///
    /// An explicit path is returned as-is (loading reports if it is missing);
    /// otherwise the first existing entry of [`Self::SEARCH_PATHS`].
    pub fn resolve_path(&self) -> Option<String> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        Self::SEARCH_PATHS
            .iter()
            .find(|candidate| Path::new(candidate).exists())
            .map(|found| (*found).to_string())
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Layout Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Side length of a matrix cell in points
    pub cell_size: f32,
    /// Horizontal gap between neighbouring shapes in a row
    pub spacing: f32,
    /// Gap between a shape and its caption
    pub padding: f32,
}

impl LayoutConfig {
    /// Create a new layout configuration
    pub const fn new() -> Self {
        Self {
            cell_size: 20.0,
            spacing: 16.0,
            padding: 10.0,
        }
    }

    /// Set cell size
    pub const fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set spacing
    pub const fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Colormap Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColormapConfig {
    /// Hue in degrees
    pub hue: f32,
    /// Saturation (0-1)
    pub saturation: f32,
    /// Lightness of the largest magnitude
    pub lightness_min: f32,
    /// Lightness of zero
    pub lightness_max: f32,
}

impl ColormapConfig {
    /// Build the colormap described by this configuration
    pub const fn to_colormap(&self) -> MagnitudeColormap {
        MagnitudeColormap {
            hue: self.hue,
            saturation: self.saturation,
            lightness_min: self.lightness_min,
            lightness_max: self.lightness_max,
        }
    }
}

impl Default for ColormapConfig {
    fn default() -> Self {
        let map = MagnitudeColormap::default();
        Self {
            hue: map.hue,
            saturation: map.saturation,
            lightness_min: map.lightness_min,
            lightness_max: map.lightness_max,
        }
    }
}

/// # Complete Diagram Configuration
///
/// Top-level configuration handed to every scene builder and backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Canvas configuration
    pub canvas: CanvasConfig,
    /// Font configuration
    pub font: FontConfig,
    /// Layout metrics
    pub layout: LayoutConfig,
    /// Matrix colormap
    pub colormap: ColormapConfig,
}

impl DiagramConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        let scale = self.canvas.raster_scale;
        if scale.is_nan() || scale <= 0.0 {
            return Err("Raster scale must be positive".to_string());
        }

        if self.layout.cell_size <= 0.0 {
            return Err("Cell size must be positive".to_string());
        }

        if self.layout.spacing < 0.0 || self.layout.padding < 0.0 {
            return Err("Spacing and padding cannot be negative".to_string());
        }

        let map = &self.colormap;
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(map.saturation) || !in_unit(map.lightness_min) || !in_unit(map.lightness_max) {
            return Err("Colormap saturation and lightness must lie in [0, 1]".to_string());
        }

        if map.lightness_min > map.lightness_max {
            return Err("Colormap lightness_min must not exceed lightness_max".to_string());
        }

        if self.font.label_size <= 0.0 || self.font.value_size <= 0.0 || self.font.operator_size <= 0.0 {
            return Err("Font sizes must be positive".to_string());
        }

        Ok(())
    }
}

impl Config for DiagramConfig {}
