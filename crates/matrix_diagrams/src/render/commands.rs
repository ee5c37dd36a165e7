//! Backend-agnostic draw commands

use crate::color::Color;
use crate::foundation::math::Vec2;
use crate::scene::HorizontalAlign;

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color
    pub color: Color,
    /// Line width in points
    pub width: f32,
}

impl Stroke {
    /// Create a stroke
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A single primitive in scene coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned rectangle
    Rect {
        /// Top-left corner
        min: Vec2,
        /// Width and height
        size: Vec2,
        /// Fill color, if any
        fill: Option<Color>,
        /// Outline, if any
        stroke: Option<Stroke>,
    },
    /// Straight line segment
    Line {
        /// Start point
        from: Vec2,
        /// End point
        to: Vec2,
        /// Line style
        stroke: Stroke,
    },
    /// Single line of text, vertically centered on the anchor
    Text {
        /// Anchor point
        anchor: Vec2,
        /// Text content
        text: String,
        /// Font size in points
        size: f32,
        /// Text color
        color: Color,
        /// Horizontal alignment relative to the anchor
        align: HorizontalAlign,
    },
}

/// Ordered list of draw commands; later commands paint over earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Append a filled rectangle without outline
    pub fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.push(DrawCommand::Rect { min, size, fill: Some(color), stroke: None });
    }

    /// Append an outlined rectangle without fill
    pub fn stroke_rect(&mut self, min: Vec2, size: Vec2, stroke: Stroke) {
        self.push(DrawCommand::Rect { min, size, fill: None, stroke: Some(stroke) });
    }

    /// Append a line
    pub fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }

    /// Append a text command
    pub fn text(&mut self, anchor: Vec2, text: impl Into<String>, size: f32, color: Color, align: HorizontalAlign) {
        self.push(DrawCommand::Text { anchor, text: text.into(), size, color, align });
    }

    /// Append every command of another list
    pub fn extend(&mut self, other: Self) {
        self.commands.extend(other.commands);
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate in paint order
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
