//! Raster backend painting into an RGBA image
//!
//! Scene points are scaled by `raster_scale` pixels per point, with the scene
//! origin mapped to the image center. All fills are alpha-blended over what
//! is already on the canvas.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use super::backend::RenderBackend;
use super::commands::{DrawCommand, Stroke};
use super::text::FontRasterizer;
use super::{RenderError, RenderResult};
use crate::color::Color;
use crate::core::config::DiagramConfig;
use crate::foundation::math::Vec2;
use crate::scene::{HorizontalAlign, Scene};

/// Paints scenes into an [`RgbaImage`] and saves them as PNG
pub struct RasterBackend {
    background: Color,
    scale: f32,
    font: Option<FontRasterizer>,
    canvas: Option<RgbaImage>,
    origin: Vec2,
    warned_missing_font: bool,
}

impl RasterBackend {
    /// Create a backend without a font; text commands are skipped
    pub fn new(background: Color, scale: f32) -> Self {
        Self {
            background,
            scale,
            font: None,
            canvas: None,
            origin: Vec2::zeros(),
            warned_missing_font: false,
        }
    }

    /// Create a backend from configuration
    ///
    /// An explicitly configured font that fails to load is an error; when no
    /// font is configured and none of the search paths exist, the backend
    /// still works but cannot draw text.
    pub fn from_config(config: &DiagramConfig) -> RenderResult<Self> {
        let mut backend = Self::new(config.canvas.background, config.canvas.raster_scale);

        match config.font.resolve_path() {
            Some(path) => match FontRasterizer::from_file(&path) {
                Ok(font) => backend.font = Some(font),
                Err(e) if config.font.path.is_some() => return Err(e.into()),
                Err(e) => log::warn!("Skipping font {path}: {e}"),
            },
            None => log::warn!("No font found; raster text will be skipped"),
        }

        Ok(backend)
    }

    /// Use a specific font for text
    pub fn with_font(mut self, font: FontRasterizer) -> Self {
        self.font = Some(font);
        self
    }

    /// The painted canvas, if a scene has been rendered
    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref()
    }

    fn to_pixels(&self, point: Vec2) -> Vec2 {
        (point + self.origin) * self.scale
    }

    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Rect { min, size, fill, stroke } => {
                let top_left = self.to_pixels(*min);
                let bottom_right = self.to_pixels(min + size);
                if let Some(color) = fill {
                    self.fill_pixels(top_left, bottom_right, *color);
                }
                if let Some(stroke) = stroke {
                    self.stroke_pixels(top_left, bottom_right, *stroke);
                }
            }
            DrawCommand::Line { from, to, stroke } => {
                let from = self.to_pixels(*from);
                let to = self.to_pixels(*to);
                self.line_pixels(from, to, *stroke);
            }
            DrawCommand::Text { anchor, text, size, color, align } => {
                let anchor = self.to_pixels(*anchor);
                self.text_pixels(anchor, text, size * self.scale, *color, *align);
            }
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
            return;
        }

        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let pixel = canvas.get_pixel_mut(x as u32, y as u32);
        let src = color.to_rgba8();
        let mix = |s: u8, d: u8| (f32::from(s) * alpha + f32::from(d) * (1.0 - alpha)).round() as u8;
        let out_alpha = alpha + f32::from(pixel[3]) / 255.0 * (1.0 - alpha);

        *pixel = Rgba([
            mix(src[0], pixel[0]),
            mix(src[1], pixel[1]),
            mix(src[2], pixel[2]),
            (out_alpha * 255.0).round() as u8,
        ]);
    }

    fn fill_pixels(&mut self, top_left: Vec2, bottom_right: Vec2, color: Color) {
        let x0 = top_left.x.min(bottom_right.x).round() as i64;
        let x1 = top_left.x.max(bottom_right.x).round() as i64;
        let y0 = top_left.y.min(bottom_right.y).round() as i64;
        let y1 = top_left.y.max(bottom_right.y).round() as i64;

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn stroke_pixels(&mut self, top_left: Vec2, bottom_right: Vec2, stroke: Stroke) {
        let half = (stroke.width * self.scale).max(1.0) / 2.0;
        let (x0, y0, x1, y1) = (top_left.x, top_left.y, bottom_right.x, bottom_right.y);

        self.fill_pixels(Vec2::new(x0 - half, y0 - half), Vec2::new(x1 + half, y0 + half), stroke.color);
        self.fill_pixels(Vec2::new(x0 - half, y1 - half), Vec2::new(x1 + half, y1 + half), stroke.color);
        self.fill_pixels(Vec2::new(x0 - half, y0 + half), Vec2::new(x0 + half, y1 - half), stroke.color);
        self.fill_pixels(Vec2::new(x1 - half, y0 + half), Vec2::new(x1 + half, y1 - half), stroke.color);
    }

    fn line_pixels(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        let half = (stroke.width * self.scale).max(1.0) / 2.0;
        let delta = to - from;

        // Axis-aligned lines are exact rectangles
        if delta.x.abs() < f32::EPSILON || delta.y.abs() < f32::EPSILON {
            let min = Vec2::new(from.x.min(to.x) - half, from.y.min(to.y) - half);
            let max = Vec2::new(from.x.max(to.x) + half, from.y.max(to.y) + half);
            self.fill_pixels(min, max, stroke.color);
            return;
        }

        let steps = (delta.norm() * 2.0).ceil().max(1.0) as usize;
        let radius = half.ceil() as i64;
        let mut last = None;
        for step in 0..=steps {
            let p = from + delta * (step as f32 / steps as f32);
            let center = (p.x.round() as i64, p.y.round() as i64);
            if last == Some(center) {
                continue;
            }
            last = Some(center);
            for dy in -radius..radius {
                for dx in -radius..radius {
                    self.blend(center.0 + dx, center.1 + dy, stroke.color, 1.0);
                }
            }
        }
    }

    fn text_pixels(&mut self, anchor: Vec2, text: &str, px: f32, color: Color, align: HorizontalAlign) {
        let Some(mut font) = self.font.take() else {
            if !self.warned_missing_font {
                log::warn!("No font loaded; skipping text such as {text:?}");
                self.warned_missing_font = true;
            }
            return;
        };

        let width = font.measure(text, px);
        let (ascent, descent) = font.line_extent(px);
        let mut pen_x = anchor.x - width * align.offset_factor();
        let baseline = anchor.y + (ascent + descent) / 2.0;

        for ch in text.chars() {
            let glyph = font.glyph(ch, px);
            let metrics = glyph.metrics;
            let left = (pen_x + metrics.xmin as f32).round() as i64;
            let top = (baseline - (metrics.height as f32 + metrics.ymin as f32)).round() as i64;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = glyph.coverage[row * metrics.width + col];
                    if coverage > 0 {
                        self.blend(left + col as i64, top + row as i64, color, f32::from(coverage) / 255.0);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }

        self.font = Some(font);
    }
}

impl RenderBackend for RasterBackend {
    fn render(&mut self, scene: &Scene) -> RenderResult<()> {
        let width = (scene.width * self.scale).ceil();
        let height = (scene.height * self.scale).ceil();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(RenderError::InvalidCanvas {
                width: scene.width,
                height: scene.height,
            });
        }

        self.canvas = Some(RgbaImage::from_pixel(
            width as u32,
            height as u32,
            Rgba(self.background.to_rgba8()),
        ));
        self.origin = Vec2::new(scene.width / 2.0, scene.height / 2.0);

        let list = scene.draw_list();
        for command in &list {
            self.execute(command);
        }

        log::debug!("Rasterized {} commands onto {}x{} pixels", list.len(), width, height);
        Ok(())
    }

    fn save(&self, path: &Path) -> RenderResult<()> {
        let canvas = self.canvas.as_ref().ok_or(RenderError::NotRendered)?;
        canvas.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Positioned;
    use crate::widgets::{OperatorGlyph, Spacer};

    struct Swatch {
        size: Vec2,
        color: Color,
    }

    impl crate::scene::Drawable for Swatch {
        fn size(&self) -> Vec2 {
            self.size
        }

        fn draw(&self, center: Vec2, list: &mut crate::render::DrawList) {
            list.fill_rect(center - self.size / 2.0, self.size, self.color);
        }
    }

    #[test]
    fn test_canvas_size_and_background() {
        let mut scene = Scene::new(10.0, 5.0);
        scene.add(Positioned::at_origin(Spacer::new(1.0, 1.0)));

        let mut backend = RasterBackend::new(Color::WHITE, 2.0);
        backend.render(&scene).unwrap();
        let canvas = backend.canvas().unwrap();
        assert_eq!(canvas.dimensions(), (20, 10));
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_filled_rect_is_centered() {
        let mut scene = Scene::new(10.0, 10.0);
        scene.add(Positioned::at_origin(Swatch {
            size: Vec2::new(4.0, 4.0),
            color: Color::rgb(1.0, 0.0, 0.0),
        }));

        let mut backend = RasterBackend::new(Color::WHITE, 1.0);
        backend.render(&scene).unwrap();
        let canvas = backend.canvas().unwrap();

        // Rect spans pixels 3..7 on both axes
        assert_eq!(canvas.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(6, 6).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(2, 3).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(7, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_half_transparent_fill_blends() {
        let mut scene = Scene::new(2.0, 2.0);
        scene.add(Positioned::at_origin(Swatch {
            size: Vec2::new(2.0, 2.0),
            color: Color::BLACK.with_alpha(0.5),
        }));

        let mut backend = RasterBackend::new(Color::WHITE, 1.0);
        backend.render(&scene).unwrap();
        let pixel = backend.canvas().unwrap().get_pixel(0, 0).0;
        assert!((127..=128).contains(&pixel[0]));
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn test_text_without_font_is_skipped() {
        let mut scene = Scene::new(40.0, 40.0);
        scene.add(Positioned::at_origin(OperatorGlyph::new("=", 20.0)));

        let mut backend = RasterBackend::new(Color::WHITE, 1.0);
        backend.render(&scene).unwrap();
        let canvas = backend.canvas().unwrap();
        assert!(canvas.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        let scene = Scene::new(0.0, 10.0);
        let mut backend = RasterBackend::new(Color::WHITE, 1.0);
        assert!(matches!(backend.render(&scene), Err(RenderError::InvalidCanvas { .. })));
    }

    #[test]
    fn test_save_before_render_fails() {
        let backend = RasterBackend::new(Color::WHITE, 1.0);
        let path = std::env::temp_dir().join("matrix_diagrams_unrendered.png");
        assert!(matches!(backend.save(&path), Err(RenderError::NotRendered)));
    }

    #[test]
    fn test_png_is_written() {
        let mut scene = Scene::new(8.0, 8.0);
        scene.add(Positioned::at_origin(Swatch {
            size: Vec2::new(2.0, 2.0),
            color: Color::BLACK,
        }));

        let mut backend = RasterBackend::new(Color::WHITE, 1.0);
        backend.render(&scene).unwrap();
        let path = std::env::temp_dir().join("matrix_diagrams_raster_test.png");
        backend.save(&path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(reloaded.dimensions(), (8, 8));
        assert_eq!(reloaded.get_pixel(4, 4).0, [0, 0, 0, 255]);
    }
}
