//! Constant acceleration along a straight track.

use crate::track::{cart, start_marker, track};
use pl_controls::{ParamSpec, Parameterized, Staged};
use pl_core::kinematics::{displacement_time, velocity_time};
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow,
};
use pl_sim::{LabModel, MetricSpec, Sample};

const SCALE: f64 = 10.0;
const TRACK_Y: f64 = 300.0;
const LEFT_PADDING: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformAcceleration {
    pub v0: f64,
    pub a: f64,
    pub x0: f64,
    pub t: f64,
}

impl UniformAcceleration {
    pub fn displacement(&self) -> f64 {
        displacement_time(self.v0, self.a, self.t)
    }

    pub fn position(&self) -> f64 {
        self.x0 + self.displacement()
    }

    pub fn velocity(&self) -> f64 {
        velocity_time(self.v0, self.a, self.t)
    }

    fn screen_x(&self) -> f64 {
        LEFT_PADDING + self.position() * SCALE
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::slider("v0", "Initial velocity", -20.0, 20.0, 0.5, "m/s"),
    ParamSpec::slider("a", "Acceleration", -10.0, 10.0, 0.1, "m/s²"),
    ParamSpec::slider("x0", "Initial position", 0.0, 50.0, 1.0, "m"),
    ParamSpec::readonly("t", "Time", "s"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("x", "Position", "m"),
    MetricSpec::new("v", "Velocity", "m/s"),
];

impl LabModel for UniformAcceleration {
    fn defaults() -> Self {
        Self {
            v0: 5.0,
            a: 2.0,
            x0: 0.0,
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
            .with("x", self.position())
            .with("v", self.velocity())
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for UniformAcceleration {
    fn param_specs() -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        match key {
            "v0" => Some(self.v0),
            "a" => Some(self.a),
            "x0" => Some(self.x0),
            "t" => Some(self.t),
            _ => None,
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        match key {
            "v0" => next.v0 = value,
            "a" => next.a = value,
            "x0" => next.x0 = value,
            "t" => next.t = value,
            _ => return None,
        }
        Some(next)
    }
}

impl Staged for UniformAcceleration {}

impl Render for UniformAcceleration {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        scene.push(track(TRACK_Y + 20.0, 5.0, Color::TRACK));

        let v = self.velocity();
        let mut car = cart(Color::GREEN, Color::INK_DARK);
        car.push(Shape::text(
            -20.0,
            -40.0,
            format!("x={:.1}m", self.position()),
            display.small_font(),
            display.theme.ink(),
        ));
        car.extend(
            VectorArrow::new(Point2::origin(), v * SCALE, 0.0, Color::RED)
                .label(format!("v={v:.1}m/s"))
                .label_size(display.font_size)
                .into_shape(),
        );
        // Acceleration is drawn at half scale under the velocity.
        car.extend(
            VectorArrow::new(Point2::new(0.0, 18.0), self.a * SCALE * 0.5, 0.0, Color::BLUE)
                .label(format!("a={:.1}m/s²", self.a))
                .label_offset(12.0)
                .label_size(display.font_size)
                .into_shape(),
        );
        scene.push(Shape::group(
            Transform::translate(self.screen_x(), TRACK_Y),
            car,
        ));

        scene.push(start_marker(
            LEFT_PADDING + self.x0 * SCALE,
            TRACK_Y + 20.0,
            display,
        ));
        scene
    }
}

impl Draggable for UniformAcceleration {
    fn handles(&self, _size: CanvasSize) -> Vec<DragHandle> {
        vec![DragHandle {
            id: "body",
            at: Point2::new(self.screen_x(), TRACK_Y),
            radius: 25.0,
        }]
    }

    fn drag_to(&self, handle: &str, to: Point2<f64>, _size: CanvasSize) -> Option<Self> {
        if handle != "body" {
            return None;
        }
        let x = (to.x.max(LEFT_PADDING) - LEFT_PADDING) / SCALE;
        Some(Self {
            x0: x - self.displacement(),
            ..*self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_form_at_two_seconds() {
        let m = UniformAcceleration::defaults().advance(2.0);
        assert_eq!(m.velocity(), 9.0);
        assert_eq!(m.position(), 14.0);
    }

    #[test]
    fn drag_cannot_pass_left_edge() {
        let m = UniformAcceleration::defaults().advance(1.0);
        let dragged = m.drag_to("body", Point2::new(0.0, 0.0), CanvasSize::default()).unwrap();
        assert!(dragged.position().abs() < 1e-12);
        assert_eq!(dragged.v0, m.v0);
    }

    #[test]
    fn negative_acceleration_reverses() {
        let m = UniformAcceleration {
            v0: 4.0,
            a: -2.0,
            x0: 10.0,
            t: 3.0,
        };
        assert_eq!(m.velocity(), -2.0);
        assert_eq!(m.position(), 13.0);
    }
}
