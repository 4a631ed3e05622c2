//! A scene: canvas size plus a shape list.

use crate::color::Color;
use crate::grid::{GRID_SPACING_PX, grid};
use crate::render::DisplaySettings;
use crate::shape::Shape;
use nalgebra::Similarity2;

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: CanvasSize,
    pub background: Color,
    shapes: Vec<Shape>,
}

impl Scene {
    /// Empty scene, with the background grid when the settings ask for it.
    pub fn new(size: CanvasSize, display: &DisplaySettings) -> Self {
        let mut scene = Self {
            size,
            background: display.theme.background(),
            shapes: Vec::new(),
        };
        if display.show_grid {
            scene.push(grid(size, GRID_SPACING_PX, display.theme));
        }
        scene
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Push when present; arrow builders return `None` for negligible vectors.
    pub fn push_opt(&mut self, shape: Option<Shape>) {
        if let Some(shape) = shape {
            self.shapes.push(shape);
        }
    }

    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.shapes.extend(shapes);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Resolve every group transform, in paint order.
    ///
    /// The result contains no `Shape::Group`.
    pub fn flatten(&self) -> Vec<Shape> {
        let mut out = Vec::with_capacity(self.shapes.len());
        let identity = Similarity2::identity();
        for shape in &self.shapes {
            shape.flatten_into(&identity, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Transform, VectorArrow};
    use nalgebra::Point2;

    fn plain() -> DisplaySettings {
        DisplaySettings {
            show_grid: false,
            ..DisplaySettings::default()
        }
    }

    #[test]
    fn grid_only_when_requested() {
        assert!(Scene::new(CanvasSize::default(), &plain()).is_empty());
        let with_grid = Scene::new(CanvasSize::default(), &DisplaySettings::default());
        assert_eq!(with_grid.len(), 1);
        assert!(with_grid.flatten().len() > 10);
    }

    #[test]
    fn flatten_leaves_no_groups() {
        let mut scene = Scene::new(CanvasSize::default(), &plain());
        scene.push(Shape::group(
            Transform::translate(100.0, 100.0),
            vec![
                Shape::rect(-25.0, -20.0, 50.0, 40.0, Color::BLUE),
                Shape::group(
                    Transform::translate(15.0, 20.0),
                    vec![Shape::circle(0.0, 0.0, 8.0, Color::WHEEL)],
                ),
            ],
        ));
        scene.push_opt(VectorArrow::new(Point2::new(0.0, 0.0), 0.0, 0.0, Color::RED).into_shape());

        let flat = scene.flatten();
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|s| !s.is_group()));
        match &flat[1] {
            Shape::Circle { center, .. } => assert_eq!(*center, Point2::new(115.0, 120.0)),
            other => panic!("expected circle, got {other:?}"),
        }
    }
}
