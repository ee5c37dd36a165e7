//! Scene Module
//!
//! The positioned-drawable layout mechanism every figure is built from.
//!
//! Architecture:
//! - core: bounds and alignment primitives
//! - drawable: the `Drawable` trait shapes implement
//! - positioned: a drawable plus its center, and placement helpers
//! - layout: left-to-right row layout with fixed gaps
//! - scene_graph: the ordered collection handed to a render backend
//!
//! Scene coordinates are in points with the origin at the canvas center and
//! y growing downward.

pub mod core;
pub mod drawable;
pub mod positioned;
pub mod layout;
pub mod scene_graph;

pub use self::core::{Bounds, HorizontalAlign};
pub use drawable::Drawable;
pub use positioned::{place_above, place_below, place_on_top, place_right_of, Positioned};
pub use layout::{layout_row, Row};
pub use scene_graph::{Scene, SceneItem};
