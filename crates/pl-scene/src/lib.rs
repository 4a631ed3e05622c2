//! Declarative 2D scenes for physlab experiments.
//!
//! Experiments describe what to draw as plain values; front ends paint the
//! flattened primitives. Screen coordinates are pixels with y pointing down.
//!
//! Contains:
//! - color (RGBA colors and the lab palette)
//! - shape (primitives, groups, transforms, vector arrows)
//! - scene (canvas size, shape list, flattening)
//! - viewport (meter/pixel mapping with world y up)
//! - grid (background grid)
//! - render (`Render` / `Draggable` traits, `DisplaySettings`)

pub mod color;
pub mod grid;
pub mod render;
pub mod scene;
pub mod shape;
pub mod viewport;

pub use color::Color;
pub use grid::{GRID_SPACING_PX, grid};
pub use render::{DisplaySettings, DragHandle, Draggable, Render, Theme, hit_handle};
pub use scene::{CanvasSize, Scene};
pub use shape::{ARROW_MIN_LEN_PX, Shape, Transform, VectorArrow};
pub use viewport::Viewport;

pub use nalgebra::{Point2, Vector2};
