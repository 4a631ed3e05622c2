//! World (meters, y up) to screen (pixels, y down) mapping.

use nalgebra::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub px_per_m: f64,
    /// Screen position of the world origin.
    pub origin: Point2<f64>,
}

impl Viewport {
    pub fn new(px_per_m: f64, origin_x: f64, origin_y: f64) -> Self {
        Self {
            px_per_m,
            origin: Point2::new(origin_x, origin_y),
        }
    }

    pub fn to_screen(&self, x_m: f64, y_m: f64) -> Point2<f64> {
        Point2::new(
            self.origin.x + x_m * self.px_per_m,
            self.origin.y - y_m * self.px_per_m,
        )
    }

    pub fn to_world(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            (p.x - self.origin.x) / self.px_per_m,
            (self.origin.y - p.y) / self.px_per_m,
        )
    }

    /// Meters to pixels, for lengths.
    pub fn px(&self, meters: f64) -> f64 {
        meters * self.px_per_m
    }
}
