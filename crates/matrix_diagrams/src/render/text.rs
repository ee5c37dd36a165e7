//! Font loading and glyph rasterization for raster output
//!
//! Uses the `fontdue` library for pure Rust font rendering. Rasterized glyphs
//! are cached per character and pixel size, since figures repeat the same few
//! digits and symbols many times.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to parse font data
    #[error("Failed to load font: {0}")]
    LoadError(String),

    /// Font file could not be read
    #[error("Font file not found: {0}")]
    NotFound(String),
}

/// A rasterized glyph: fontdue metrics plus an 8-bit coverage bitmap
#[derive(Debug, Clone)]
pub struct RasterGlyph {
    /// Placement metrics in pixels
    pub metrics: Metrics,
    /// Row-major coverage, `metrics.width * metrics.height` bytes
    pub coverage: Vec<u8>,
}

/// Loaded font with a glyph cache
pub struct FontRasterizer {
    font: Font,
    glyph_cache: HashMap<(char, u32), RasterGlyph>,
}

impl FontRasterizer {
    /// Create a rasterizer from TrueType/OpenType font data
    pub fn from_bytes(font_data: &[u8]) -> FontResult<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::LoadError(format!("fontdue error: {e}")))?;

        Ok(Self {
            font,
            glyph_cache: HashMap::new(),
        })
    }

    /// Load a font file
    pub fn from_file<P: AsRef<Path>>(path: P) -> FontResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| FontError::NotFound(format!("{}: {e}", path.display())))?;

        log::info!("Loaded font from {}", path.display());
        Self::from_bytes(&bytes)
    }

    /// Rasterize (or fetch from cache) a glyph at `px` pixels
    pub fn glyph(&mut self, ch: char, px: f32) -> &RasterGlyph {
        let font = &self.font;
        self.glyph_cache
            .entry((ch, px.to_bits()))
            .or_insert_with(|| {
                let (metrics, coverage) = font.rasterize(ch, px);
                RasterGlyph { metrics, coverage }
            })
    }

    /// Advance width of `text` at `px` pixels
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars().map(|ch| self.font.metrics(ch, px).advance_width).sum()
    }

    /// Ascent and descent (negative) at `px` pixels
    ///
    /// Falls back to 0.8/-0.2 of the size for fonts without horizontal metrics.
    pub fn line_extent(&self, px: f32) -> (f32, f32) {
        self.font
            .horizontal_line_metrics(px)
            .map_or((px * 0.8, -px * 0.2), |m| (m.ascent, m.descent))
    }

    /// Number of cached glyphs
    pub fn cached_glyphs(&self) -> usize {
        self.glyph_cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_font_is_rejected() {
        let result = FontRasterizer::from_bytes(&[0u8, 1, 2, 3]);
        assert!(matches!(result, Err(FontError::LoadError(_))));
    }

    #[test]
    fn test_missing_font_file() {
        let result = FontRasterizer::from_file("definitely/not/a/font.ttf");
        assert!(matches!(result, Err(FontError::NotFound(_))));
    }
}
