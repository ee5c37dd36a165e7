//! Text label widget and spacer

use crate::color::Color;
use crate::foundation::math::Vec2;
use crate::render::DrawList;
use crate::scene::{Drawable, HorizontalAlign};

/// Approximate advance of `text` at `size` points
///
/// Layout must not depend on whether a font file is available, so widths are
/// estimated from the character count.
pub fn estimate_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.6
}

/// Single line text label
#[derive(Debug, Clone)]
pub struct TextLabel {
    /// Text content to display
    pub text: String,
    
    /// Font size in points
    pub font_size: f32,
    
    /// Text color
    pub color: Color,
    
    /// Horizontal alignment within the label box
    pub align: HorizontalAlign,
}

impl TextLabel {
    /// Create a black, centered label
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            ..Self::default()
        }
    }

    /// Set text color
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set alignment
    pub const fn with_align(mut self, align: HorizontalAlign) -> Self {
        self.align = align;
        self
    }
}

impl Default for TextLabel {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 16.0,
            color: Color::BLACK,
            align: HorizontalAlign::Center,
        }
    }
}

impl Drawable for TextLabel {
    fn size(&self) -> Vec2 {
        Vec2::new(estimate_text_width(&self.text, self.font_size), self.font_size)
    }

    fn draw(&self, center: Vec2, list: &mut DrawList) {
        let width = self.size().x;
        let anchor_x = center.x - width / 2.0 + width * self.align.offset_factor();
        list.text(Vec2::new(anchor_x, center.y), self.text.clone(), self.font_size, self.color, self.align);
    }
}

/// Empty box that only takes up room
#[derive(Debug, Clone, Copy)]
pub struct Spacer {
    size: Vec2,
}

impl Spacer {
    /// Create a spacer of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self { size: Vec2::new(width, height) }
    }
}

impl Drawable for Spacer {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn draw(&self, _center: Vec2, _list: &mut DrawList) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawCommand;
    use approx::assert_relative_eq;

    #[test]
    fn test_estimated_size() {
        let label = TextLabel::new("abcd", 10.0);
        assert_relative_eq!(label.size().x, 24.0, epsilon = 1e-4);
        assert_relative_eq!(label.size().y, 10.0);
        assert_eq!(estimate_text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_left_aligned_anchor_is_left_edge() {
        let label = TextLabel::new("ab", 10.0).with_align(HorizontalAlign::Left);
        let mut list = DrawList::new();
        label.draw(Vec2::new(100.0, 5.0), &mut list);

        match list.iter().next() {
            Some(DrawCommand::Text { anchor, .. }) => {
                assert_relative_eq!(anchor.x, 94.0, epsilon = 1e-4);
                assert_relative_eq!(anchor.y, 5.0);
            }
            other => panic!("expected text command, got {other:?}"),
        }
    }

    #[test]
    fn test_spacer_draws_nothing() {
        let mut list = DrawList::new();
        Spacer::new(5.0, 5.0).draw(Vec2::zeros(), &mut list);
        assert!(list.is_empty());
    }
}
