//! Scene container
//!
//! A scene is a fixed-size canvas and an ordered list of positioned shapes.
//! Shapes are drawn in insertion order, so overlays go in after their anchor.

use super::core::Bounds;
use super::drawable::Drawable;
use super::positioned::Positioned;
use crate::foundation::math::Vec2;
use crate::render::DrawList;

/// Positioned shape with its concrete type erased
pub type SceneItem = Positioned<Box<dyn Drawable>>;

/// A figure ready to hand to a render backend
pub struct Scene {
    /// Canvas width in points
    pub width: f32,
    /// Canvas height in points
    pub height: f32,
    items: Vec<SceneItem>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
        }
    }

    /// Add a positioned shape on top of everything added so far
    pub fn add<D: Drawable + 'static>(&mut self, item: Positioned<D>) -> &mut Self {
        self.items.push(item.boxed());
        self
    }

    /// Add already type-erased shapes, e.g. the output of [`super::Row::build`]
    pub fn extend<I: IntoIterator<Item = SceneItem>>(&mut self, items: I) -> &mut Self {
        self.items.extend(items);
        self
    }

    /// Shapes in draw order
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the scene has no shapes
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Canvas bounds in scene coordinates (origin at the center)
    pub fn canvas_bounds(&self) -> Bounds {
        Bounds::from_center(Vec2::zeros(), Vec2::new(self.width, self.height))
    }

    /// Union of all shape bounds, `None` for an empty scene
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.items
            .iter()
            .map(Positioned::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Move every shape by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        for item in &mut self.items {
            item.translate(offset);
        }
    }

    /// Shift all content so its bounding box is centered on the canvas
    pub fn center_content(&mut self) {
        if let Some(bounds) = self.content_bounds() {
            self.translate(-bounds.center());
        }
    }

    /// Check that all content lies on the canvas, logging a warning if not
    pub fn fit_check(&self) -> bool {
        let canvas = self.canvas_bounds();
        match self.content_bounds() {
            Some(content) if !(canvas.contains(content.min) && canvas.contains(content.max)) => {
                log::warn!(
                    "Scene content {:.1}x{:.1} exceeds canvas {:.1}x{:.1}",
                    content.width(),
                    content.height(),
                    self.width,
                    self.height,
                );
                false
            }
            _ => true,
        }
    }

    /// Collect the draw commands of every shape in order
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::new();
        for item in &self.items {
            item.draw(&mut list);
        }
        log::debug!("Scene produced {} draw commands from {} shapes", list.len(), self.items.len());
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{place_right_of, Row};
    use crate::widgets::Spacer;

    #[test]
    fn test_content_bounds() {
        let mut scene = Scene::new(100.0, 50.0);
        assert!(scene.content_bounds().is_none());

        let first = Positioned::new(Spacer::new(10.0, 10.0), Vec2::new(-20.0, 0.0));
        let second = place_right_of(&first, Spacer::new(10.0, 20.0), 5.0);
        scene.add(first).add(second);

        let bounds = scene.content_bounds().unwrap();
        assert_eq!(bounds.min, Vec2::new(-25.0, -10.0));
        assert_eq!(bounds.max, Vec2::new(0.0, 10.0));
        assert!(scene.fit_check());
    }

    #[test]
    fn test_center_content() {
        let mut scene = Scene::new(100.0, 50.0);
        scene.add(Positioned::new(Spacer::new(10.0, 10.0), Vec2::new(30.0, 12.0)));
        scene.center_content();
        assert_eq!(scene.items()[0].center, Vec2::zeros());
    }

    #[test]
    fn test_fit_check_detects_overflow() {
        let mut scene = Scene::new(20.0, 20.0);
        let mut row = Row::new(2.0);
        row.push(Spacer::new(15.0, 5.0)).push(Spacer::new(15.0, 5.0));
        scene.extend(row.build());
        assert_eq!(scene.len(), 2);
        assert!(!scene.fit_check());
    }
}
