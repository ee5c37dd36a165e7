//! Operator glyphs placed between matrices (`=`, `·`, `+`, ...)

use crate::color::Color;
use crate::foundation::math::Vec2;
use crate::render::DrawList;
use crate::scene::{Drawable, HorizontalAlign};

/// A centered operator symbol
#[derive(Debug, Clone)]
pub struct OperatorGlyph {
    /// Symbol text
    pub symbol: String,
    /// Font size in points
    pub font_size: f32,
    /// Symbol color
    pub color: Color,
}

impl OperatorGlyph {
    /// Create a black operator symbol
    pub fn new(symbol: impl Into<String>, font_size: f32) -> Self {
        Self {
            symbol: symbol.into(),
            font_size,
            color: Color::BLACK,
        }
    }

    /// `=`
    pub fn equals(font_size: f32) -> Self {
        Self::new("=", font_size)
    }

    /// Matrix product dot `·`
    pub fn times(font_size: f32) -> Self {
        Self::new("\u{00b7}", font_size)
    }

    /// `+`
    pub fn plus(font_size: f32) -> Self {
        Self::new("+", font_size)
    }

    /// Function composition `∘`
    pub fn compose(font_size: f32) -> Self {
        Self::new("\u{2218}", font_size)
    }

    /// Set color
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Drawable for OperatorGlyph {
    fn size(&self) -> Vec2 {
        // Single glyphs still get one and a half advances of room
        let glyphs = self.symbol.chars().count().max(1) as f32;
        Vec2::new(self.font_size * 0.6 * glyphs.max(1.5), self.font_size)
    }

    fn draw(&self, center: Vec2, list: &mut DrawList) {
        list.text(center, self.symbol.clone(), self.font_size, self.color, HorizontalAlign::Center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_glyph_box() {
        let op = OperatorGlyph::equals(20.0);
        assert_relative_eq!(op.size().x, 18.0, epsilon = 1e-4);
        assert_relative_eq!(op.size().y, 20.0);
    }

    #[test]
    fn test_wide_symbol_grows() {
        let op = OperatorGlyph::new("=>>", 10.0);
        assert_relative_eq!(op.size().x, 18.0, epsilon = 1e-4);
    }
}
