//! Rendering and dragging contracts.

use crate::color::Color;
use crate::scene::{CanvasSize, Scene};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn background(self) -> Color {
        match self {
            Theme::Light => Color::WHITE,
            Theme::Dark => Color::INK_DARK,
        }
    }

    /// Color for labels and outlines.
    pub fn ink(self) -> Color {
        match self {
            Theme::Light => Color::INK,
            Theme::Dark => Color::TEXT_LIGHT,
        }
    }

    pub fn grid_line(self) -> Color {
        match self {
            Theme::Light => Color::GRID,
            Theme::Dark => Color::GRID_DARK,
        }
    }

    pub fn axis_line(self) -> Color {
        Color::GROUND
    }
}

/// Presentation settings handed to every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub show_grid: bool,
    pub theme: Theme,
    /// Label font size in pixels.
    pub font_size: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            theme: Theme::Light,
            font_size: 14.0,
        }
    }
}

impl DisplaySettings {
    /// Size for secondary annotations (position readouts and the like).
    pub fn small_font(&self) -> f64 {
        (self.font_size - 2.0).max(8.0)
    }
}

/// Produces a scene from the current state. Must not fail.
pub trait Render {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene;
}

/// A grab point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragHandle {
    pub id: &'static str,
    pub at: Point2<f64>,
    /// Grab radius in pixels.
    pub radius: f64,
}

/// Experiments whose state can be edited by dragging on the canvas.
pub trait Draggable: Sized {
    fn handles(&self, size: CanvasSize) -> Vec<DragHandle>;

    /// Replacement model after dragging `handle` to screen point `to`.
    ///
    /// `None` for unknown handles.
    fn drag_to(&self, handle: &str, to: Point2<f64>, size: CanvasSize) -> Option<Self>;
}

/// Closest handle whose grab radius contains `p`.
pub fn hit_handle(handles: &[DragHandle], p: Point2<f64>) -> Option<&DragHandle> {
    handles
        .iter()
        .map(|h| (h, (h.at - p).norm()))
        .filter(|(h, d)| *d <= h.radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h)
}
