//! Core scene primitives
//!
//! Shared types used by every drawable and by the layout helpers.

use crate::foundation::math::Vec2;

/// Axis-aligned bounding box in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Bounds {
    /// Bounds of a box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Width in points
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in points
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Check if a point lies inside (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Horizontal text alignment relative to the text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    /// Anchor is the left edge
    Left,
    /// Anchor is the center
    #[default]
    Center,
    /// Anchor is the right edge
    Right,
}

impl HorizontalAlign {
    /// Fraction of the text width that lies left of the anchor
    pub const fn offset_factor(&self) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let b = Bounds::from_center(Vec2::new(10.0, 0.0), Vec2::new(4.0, 2.0));
        assert_eq!(b.min, Vec2::new(8.0, -1.0));
        assert_eq!(b.max, Vec2::new(12.0, 1.0));
        assert_eq!(b.center(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_union_and_contains() {
        let a = Bounds::from_center(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Bounds::from_center(Vec2::new(5.0, 0.0), Vec2::new(2.0, 4.0));
        let u = a.union(&b);
        assert_eq!(u.width(), 7.0);
        assert_eq!(u.height(), 4.0);
        assert!(u.contains(Vec2::new(3.0, 1.5)));
        assert!(!a.contains(Vec2::new(3.0, 0.0)));
    }
}
