//! Row layout calculations
//!
//! Boxes are laid out left-to-right with a fixed gap, and the row as a whole
//! is centered on x = 0.

use super::drawable::Drawable;
use super::positioned::Positioned;
use crate::foundation::math::Vec2;

/// Center x coordinates of boxes with the given widths
///
/// The total row width is the sum of the widths plus `spacing` between each
/// neighbouring pair; the row's left edge sits at minus half of that.
pub fn layout_row(widths: &[f32], spacing: f32) -> Vec<f32> {
    if widths.is_empty() {
        return Vec::new();
    }

    let total: f32 = widths.iter().sum::<f32>() + spacing * (widths.len() - 1) as f32;
    let mut cursor = -total / 2.0;

    widths
        .iter()
        .map(|width| {
            let center = cursor + width / 2.0;
            cursor += width + spacing;
            center
        })
        .collect()
}

/// Builder for a horizontally centered row of mixed drawables
pub struct Row {
    spacing: f32,
    y: f32,
    items: Vec<Box<dyn Drawable>>,
}

impl Row {
    /// Create an empty row with the given gap between neighbours
    pub fn new(spacing: f32) -> Self {
        Self {
            spacing,
            y: 0.0,
            items: Vec::new(),
        }
    }

    /// Vertical center of the row (default 0)
    pub const fn at_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Append a drawable to the right end
    pub fn push<D: Drawable + 'static>(&mut self, object: D) -> &mut Self {
        self.items.push(Box::new(object));
        self
    }

    /// Number of drawables in the row
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the row is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total width including gaps
    pub fn width(&self) -> f32 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().map(|item| item.size().x).sum::<f32>()
            + self.spacing * (self.items.len() - 1) as f32
    }

    /// Position every drawable
    pub fn build(self) -> Vec<Positioned<Box<dyn Drawable>>> {
        let widths: Vec<f32> = self.items.iter().map(|item| item.size().x).collect();
        let centers = layout_row(&widths, self.spacing);
        let y = self.y;

        self.items
            .into_iter()
            .zip(centers)
            .map(|(object, x)| Positioned::new(object, Vec2::new(x, y)))
            .collect()
    }
}
