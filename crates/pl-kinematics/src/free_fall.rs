//! Vertical drop from a height, downward positive.

use pl_controls::{ParamSpec, Parameterized, Staged};
use pl_core::kinematics::{displacement_time, velocity_time};
use pl_core::units::constants::G_SLIDER_MPS2;
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow,
};
use pl_sim::{LabModel, MetricSpec, Sample};

const SCALE: f64 = 10.0;
const TOP_PADDING: f64 = 30.0;
const BOTTOM_PADDING: f64 = 20.0;

/// Drop with initial downward speed `v0` from height `y0`.
///
/// The height stops at the ground; the velocity keeps growing, so `v` in the
/// sample is the free-flight value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFall {
    pub v0: f64,
    pub y0: f64,
    pub g: f64,
    pub t: f64,
}

impl FreeFall {
    /// Distance fallen since release (down positive).
    pub fn fallen(&self) -> f64 {
        displacement_time(self.v0, self.g, self.t)
    }

    pub fn height(&self) -> f64 {
        (self.y0 - self.fallen()).max(0.0)
    }

    pub fn velocity(&self) -> f64 {
        velocity_time(self.v0, self.g, self.t)
    }

    /// Time to reach the ground, `None` when it never does.
    pub fn landing_time(&self) -> Option<f64> {
        if self.g == 0.0 {
            return (self.v0 > 0.0).then(|| self.y0 / self.v0);
        }
        let disc = self.v0 * self.v0 + 2.0 * self.g * self.y0;
        if disc < 0.0 {
            return None;
        }
        let t = (-self.v0 + disc.sqrt()) / self.g;
        (t >= 0.0).then_some(t)
    }

    fn ground_y(size: CanvasSize) -> f64 {
        size.height - BOTTOM_PADDING
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::slider("v0", "Initial velocity", -20.0, 20.0, 0.5, "m/s"),
    ParamSpec::slider("y0", "Height", 0.0, 100.0, 1.0, "m"),
    ParamSpec::slider("g", "Gravitational acceleration", 0.0, 20.0, 0.1, "m/s²"),
    ParamSpec::readonly("t", "Time", "s"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("y", "Height", "m"),
    MetricSpec::new("v", "Velocity", "m/s"),
];

impl LabModel for FreeFall {
    fn defaults() -> Self {
        Self {
            v0: 0.0,
            y0: 90.0,
            g: G_SLIDER_MPS2,
            t: 0.0,
        }
    }

    fn advance(&self, dt: f64) -> Self {
        Self {
            t: self.t + dt,
            ..*self
        }
    }

    fn sample(&self) -> Sample {
        Sample::new()
            .with("t", self.t)
            .with("y", self.height())
            .with("v", self.velocity())
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for FreeFall {
    fn param_specs() -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        match key {
            "v0" => Some(self.v0),
            "y0" => Some(self.y0),
            "g" => Some(self.g),
            "t" => Some(self.t),
            _ => None,
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        match key {
            "v0" => next.v0 = value,
            "y0" => next.y0 = value,
            "g" => next.g = value,
            "t" => next.t = value,
            _ => return None,
        }
        Some(next)
    }
}

impl Staged for FreeFall {}

impl Render for FreeFall {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        let ground_y = Self::ground_y(size);
        let height = self.height();
        let v = self.velocity();

        scene.push(Shape::rect(0.0, ground_y, 2000.0, 6.0, Color::GROUND));

        let mut ball = vec![
            Shape::circle(0.0, 0.0, 15.0, Color::ORANGE),
            Shape::text(
                0.0,
                -30.0,
                format!("y={height:.1} m"),
                display.small_font(),
                display.theme.ink(),
            ),
        ];
        ball.extend(
            VectorArrow::new(Point2::new(0.0, 20.0), v.abs() * SCALE, 90.0, Color::RED)
                .label(format!("v={v:.1}m/s"))
                .label_size(display.font_size)
                .into_shape(),
        );
        scene.push(Shape::group(
            Transform::translate(size.width / 2.0, ground_y - height * SCALE),
            ball,
        ));

        scene.push(Shape::text(
            10.0,
            TOP_PADDING - 20.0,
            "Height (m)",
            display.small_font(),
            display.theme.ink(),
        ));
        scene
    }
}

impl Draggable for FreeFall {
    fn handles(&self, size: CanvasSize) -> Vec<DragHandle> {
        vec![DragHandle {
            id: "ball",
            at: Point2::new(
                size.width / 2.0,
                Self::ground_y(size) - self.height() * SCALE,
            ),
            radius: 15.0,
        }]
    }

    fn drag_to(&self, handle: &str, to: Point2<f64>, size: CanvasSize) -> Option<Self> {
        if handle != "ball" {
            return None;
        }
        let ground_y = Self::ground_y(size);
        let py = to.y.clamp(TOP_PADDING, (ground_y - 10.0).max(TOP_PADDING));
        let height = ((ground_y - py) / SCALE).max(0.0);
        Some(Self {
            y0: (height + self.fallen()).max(0.0),
            ..*self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_time_from_default_height() {
        let t = FreeFall::defaults().landing_time().unwrap();
        assert!((t - (2.0 * 90.0 / 9.8_f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn velocity_keeps_growing_after_landing() {
        let m = FreeFall::defaults().advance(10.0);
        assert_eq!(m.height(), 0.0);
        assert!((m.velocity() - 98.0).abs() < 1e-9);
    }

    #[test]
    fn upward_throw_rises_first() {
        let m = FreeFall {
            v0: -10.0,
            ..FreeFall::defaults()
        };
        assert!(m.advance(0.5).height() > m.y0);
    }

    #[test]
    fn drag_sets_release_height() {
        let size = CanvasSize::new(800.0, 500.0);
        let m = FreeFall::defaults();
        let dragged = m.drag_to("ball", Point2::new(0.0, 280.0), size).unwrap();
        assert!((dragged.y0 - 20.0).abs() < 1e-12);

        let clamped = m.drag_to("ball", Point2::new(0.0, -100.0), size).unwrap();
        assert!((clamped.y0 - 45.0).abs() < 1e-12);
    }
}
