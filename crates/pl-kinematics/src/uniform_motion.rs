//! Constant-velocity motion along a straight track.

use crate::track::{cart, start_marker, track};
use pl_controls::{ParamSpec, Parameterized, Staged};
use pl_core::kinematics::uniform_displacement;
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow,
};
use pl_sim::{LabModel, MetricSpec, Sample};

/// Pixels per meter.
const SCALE: f64 = 10.0;
const TRACK_Y: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformMotion {
    /// Velocity (m/s)
    pub v: f64,
    /// Initial position (m)
    pub x0: f64,
    pub t: f64,
}

impl UniformMotion {
    pub fn position(&self) -> f64 {
        self.x0 + uniform_displacement(self.v, self.t)
    }

    fn screen_x(&self) -> f64 {
        self.position() * SCALE
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::slider("v", "Velocity", -20.0, 20.0, 0.5, "m/s"),
    ParamSpec::slider("x0", "Initial position", 0.0, 50.0, 1.0, "m"),
    ParamSpec::readonly("t", "Time", "s"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("x", "Position", "m"),
    MetricSpec::new("v", "Velocity", "m/s"),
];

impl LabModel for UniformMotion {
    fn defaults() -> Self {
        Self {
            v: 5.0,
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
            .with("v", self.v)
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for UniformMotion {
    fn param_specs() -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        match key {
            "v" => Some(self.v),
            "x0" => Some(self.x0),
            "t" => Some(self.t),
            _ => None,
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        match key {
            "v" => next.v = value,
            "x0" => next.x0 = value,
            "t" => next.t = value,
            _ => return None,
        }
        Some(next)
    }
}

impl Staged for UniformMotion {}

impl Render for UniformMotion {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        scene.push(track(TRACK_Y + 20.0, 5.0, Color::TRACK));

        let mut car = cart(Color::BLUE, Color::WHEEL);
        car.push(Shape::text(
            -20.0,
            -40.0,
            format!("x={:.1}m", self.position()),
            display.small_font(),
            display.theme.ink(),
        ));
        car.extend(
            VectorArrow::new(Point2::origin(), self.v * SCALE, 0.0, Color::RED)
                .label(format!("v={:.1}m/s", self.v))
                .label_size(display.font_size)
                .into_shape(),
        );
        // Velocity grab point at the arrow tip.
        car.push(Shape::Circle {
            center: Point2::new(self.v * SCALE, 0.0),
            radius: 6.0,
            fill: Color::RED,
            stroke: Some(Color::WHITE),
        });
        scene.push(Shape::group(
            Transform::translate(self.screen_x(), TRACK_Y),
            car,
        ));

        scene.push(start_marker(self.x0 * SCALE, TRACK_Y + 20.0, display));
        scene
    }
}

impl Draggable for UniformMotion {
    fn handles(&self, _size: CanvasSize) -> Vec<DragHandle> {
        let x = self.screen_x();
        vec![
            DragHandle {
                id: "velocity",
                at: Point2::new(x + self.v * SCALE, TRACK_Y),
                radius: 8.0,
            },
            DragHandle {
                id: "body",
                at: Point2::new(x, TRACK_Y),
                radius: 25.0,
            },
        ]
    }

    fn drag_to(&self, handle: &str, to: Point2<f64>, _size: CanvasSize) -> Option<Self> {
        match handle {
            // Keep the current position under the cursor: x0 = x - v t.
            "body" => Some(Self {
                x0: to.x / SCALE - self.v * self.t,
                ..*self
            }),
            "velocity" => Some(Self {
                v: (to.x - self.screen_x()) / SCALE,
                ..*self
            }),
            _ => None,
        }
    }
}
