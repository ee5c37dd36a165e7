//! The drawable abstraction

use crate::foundation::math::Vec2;
use crate::render::DrawList;

/// Anything that occupies a box and can emit draw commands
///
/// Drawables do not know where they are; a [`super::Positioned`] supplies
/// the center when the scene is drawn.
pub trait Drawable {
    /// Size (width, height) in points
    fn size(&self) -> Vec2;

    /// Append draw commands for this shape centered on `center`
    fn draw(&self, center: Vec2, list: &mut DrawList);
}

impl<D: Drawable + ?Sized> Drawable for Box<D> {
    fn size(&self) -> Vec2 {
        (**self).size()
    }

    fn draw(&self, center: Vec2, list: &mut DrawList) {
        (**self).draw(center, list);
    }
}
