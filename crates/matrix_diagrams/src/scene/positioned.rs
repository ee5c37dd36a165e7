//! Positioned drawables and placement helpers
//!
//! A [`Positioned`] pairs a drawable with the point its box is centered on.
//! The free functions build a new positioned value relative to an existing
//! one, which is all the composition the figures need.

use super::core::Bounds;
use super::drawable::Drawable;
use crate::foundation::math::Vec2;
use crate::render::DrawList;

/// A drawable together with its center coordinate
#[derive(Debug, Clone)]
pub struct Positioned<D> {
    /// The wrapped drawable
    pub object: D,
    /// Center of the drawable's box in scene coordinates
    pub center: Vec2,
}

impl<D: Drawable> Positioned<D> {
    /// Place `object` centered on `center`
    pub const fn new(object: D, center: Vec2) -> Self {
        Self { object, center }
    }

    /// Place `object` at the scene origin
    pub fn at_origin(object: D) -> Self {
        Self::new(object, Vec2::zeros())
    }

    /// Width of the wrapped drawable
    pub fn width(&self) -> f32 {
        self.object.size().x
    }

    /// Height of the wrapped drawable
    pub fn height(&self) -> f32 {
        self.object.size().y
    }

    /// Left edge x coordinate
    pub fn left(&self) -> f32 {
        self.center.x - self.width() / 2.0
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.center.x + self.width() / 2.0
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.center.y - self.height() / 2.0
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.center.y + self.height() / 2.0
    }

    /// Bounding box in scene coordinates
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center, self.object.size())
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec2) {
        self.center += offset;
    }

    /// Emit the drawable's commands at its center
    pub fn draw(&self, list: &mut DrawList) {
        self.object.draw(self.center, list);
    }

    /// Erase the concrete drawable type so mixed shapes can share a scene
    pub fn boxed(self) -> Positioned<Box<dyn Drawable>>
    where
        D: 'static,
    {
        Positioned {
            object: Box::new(self.object),
            center: self.center,
        }
    }
}

/// Place `object` immediately right of `anchor`, `spacing` points away,
/// vertically centered on the anchor
pub fn place_right_of<A: Drawable, B: Drawable>(
    anchor: &Positioned<A>,
    object: B,
    spacing: f32,
) -> Positioned<B> {
    let x = anchor.right() + spacing + object.size().x / 2.0;
    Positioned::new(object, Vec2::new(x, anchor.center.y))
}

/// Place `object` centered on top of `anchor`
///
/// The new shape shares the anchor's center and is drawn over it when added
/// to a scene after the anchor.
pub fn place_on_top<A: Drawable, B: Drawable>(anchor: &Positioned<A>, object: B) -> Positioned<B> {
    Positioned::new(object, anchor.center)
}

/// Place `object` below `anchor`, horizontally centered on it
pub fn place_below<A: Drawable, B: Drawable>(
    anchor: &Positioned<A>,
    object: B,
    spacing: f32,
) -> Positioned<B> {
    let y = anchor.bottom() + spacing + object.size().y / 2.0;
    Positioned::new(object, Vec2::new(anchor.center.x, y))
}

/// Place `object` above `anchor`, horizontally centered on it
pub fn place_above<A: Drawable, B: Drawable>(
    anchor: &Positioned<A>,
    object: B,
    spacing: f32,
) -> Positioned<B> {
    let y = anchor.top() - spacing - object.size().y / 2.0;
    Positioned::new(object, Vec2::new(anchor.center.x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Spacer;

    #[test]
    fn test_edges() {
        let p = Positioned::new(Spacer::new(40.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(p.left(), 80.0);
        assert_eq!(p.right(), 120.0);
        assert_eq!(p.top(), 40.0);
        assert_eq!(p.bottom(), 60.0);
    }

    #[test]
    fn test_place_right_of() {
        let anchor = Positioned::new(Spacer::new(40.0, 20.0), Vec2::new(0.0, 5.0));
        let next = place_right_of(&anchor, Spacer::new(10.0, 80.0), 6.0);
        // anchor right edge 20, gap 6, half width 5
        assert_eq!(next.center, Vec2::new(31.0, 5.0));
        assert_eq!(next.left() - anchor.right(), 6.0);
    }

    #[test]
    fn test_place_on_top_shares_center() {
        let anchor = Positioned::new(Spacer::new(40.0, 20.0), Vec2::new(-3.0, 7.0));
        let overlay = place_on_top(&anchor, Spacer::new(8.0, 8.0));
        assert_eq!(overlay.center, anchor.center);
    }

    #[test]
    fn test_vertical_stacking() {
        let anchor = Positioned::new(Spacer::new(40.0, 20.0), Vec2::zeros());
        let below = place_below(&anchor, Spacer::new(10.0, 10.0), 4.0);
        let above = place_above(&anchor, Spacer::new(10.0, 10.0), 4.0);
        assert_eq!(below.center, Vec2::new(0.0, 19.0));
        assert_eq!(above.center, Vec2::new(0.0, -19.0));
    }

    #[test]
    fn test_boxed_keeps_geometry() {
        let p = Positioned::new(Spacer::new(12.0, 6.0), Vec2::new(1.0, 2.0)).boxed();
        assert_eq!(p.width(), 12.0);
        assert_eq!(p.center, Vec2::new(1.0, 2.0));
    }
}
