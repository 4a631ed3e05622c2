//! Oblique launch under uniform gravity.

use crate::ballistic::{Ballistic, Launch};
use pl_controls::{ParamSpec, Parameterized, Staged};
use pl_core::units::constants::G_SLIDER_MPS2;
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow, Viewport,
};
use pl_sim::{LabModel, MetricSpec, Sample};

const SCALE: f64 = 10.0;
const TOP_PADDING: f64 = 20.0;
const BOTTOM_PADDING: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub v: f64,
    /// Launch angle above the horizontal, degrees.
    pub angle: f64,
    pub x0: f64,
    pub y0: f64,
    pub g: f64,
    pub t: f64,
}

impl Projectile {
    pub fn launch(&self) -> Launch {
        Launch {
            v: self.v,
            angle_deg: self.angle,
            x0: self.x0,
            y0: self.y0,
            g: self.g,
        }
    }

    pub fn state(&self) -> Ballistic {
        self.launch().at(self.t)
    }

    /// Launch point sits left of centre, on the ground line.
    fn viewport(size: CanvasSize) -> Viewport {
        Viewport::new(SCALE, size.width / 2.0 - 100.0, size.height - BOTTOM_PADDING)
    }
}

pub(crate) const LAUNCH_PARAMS: &[ParamSpec] = &[
    ParamSpec::slider("v", "Initial speed", 0.0, 100.0, 1.0, "m/s"),
    ParamSpec::slider("angle", "Launch angle", 0.0, 90.0, 1.0, "°"),
    ParamSpec::slider("x0", "Initial x", -50.0, 50.0, 1.0, "m"),
    ParamSpec::slider("y0", "Initial height", 0.0, 200.0, 1.0, "m"),
    ParamSpec::slider("g", "Gravity", 0.0, 20.0, 0.1, "m/s²"),
    ParamSpec::readonly("t", "Time", "s"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("x", "Horizontal position", "m"),
    MetricSpec::new("y", "Height", "m"),
    MetricSpec::new("v", "Speed", "m/s"),
];

impl LabModel for Projectile {
    fn defaults() -> Self {
        Self {
            v: 20.0,
            angle: 45.0,
            x0: 0.0,
            y0: 10.0,
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
        let s = self.state();
        Sample::new()
            .with("t", self.t)
            .with("x", s.x)
            .with("y", s.y)
            .with("v", s.speed())
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for Projectile {
    fn param_specs() -> &'static [ParamSpec] {
        LAUNCH_PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        match key {
            "v" => Some(self.v),
            "angle" => Some(self.angle),
            "x0" => Some(self.x0),
            "y0" => Some(self.y0),
            "g" => Some(self.g),
            "t" => Some(self.t),
            _ => None,
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        match key {
            "v" => next.v = value,
            "angle" => next.angle = value,
            "x0" => next.x0 = value,
            "y0" => next.y0 = value,
            "g" => next.g = value,
            "t" => next.t = value,
            _ => return None,
        }
        Some(next)
    }
}

impl Staged for Projectile {}

impl Render for Projectile {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        let vp = Self::viewport(size);
        let s = self.state();

        scene.push(Shape::rect(0.0, vp.origin.y, 2000.0, 6.0, Color::GROUND));

        let launch = vp.to_screen(self.x0, self.y0);
        scene.push(Shape::Circle {
            center: launch,
            radius: 5.0,
            fill: Color::WHITE,
            stroke: Some(Color::CYAN),
        });

        let ink = display.theme.ink();
        let mut ball = vec![
            Shape::circle(0.0, 0.0, 8.0, Color::CYAN),
            Shape::text(0.0, -28.0, format!("x={:.1}m", s.x), display.small_font(), ink),
            Shape::text(0.0, -14.0, format!("y={:.1}m", s.y), display.small_font(), ink),
        ];
        // Right triangle: vx along the ground, vy from its tip, v as hypotenuse.
        ball.extend(
            VectorArrow::new(
                Point2::origin(),
                s.vx.abs() * SCALE,
                if s.vx >= 0.0 { 0.0 } else { 180.0 },
                Color::RED,
            )
            .label(format!("vx={:.1}m/s", s.vx))
            .into_shape(),
        );
        ball.extend(
            VectorArrow::new(
                Point2::new(s.vx * SCALE, 0.0),
                s.vy.abs() * SCALE,
                if s.vy >= 0.0 { -90.0 } else { 90.0 },
                Color::BLUE,
            )
            .label(format!("vy={:.1}m/s", s.vy))
            .label_offset(if s.vy >= 0.0 { -20.0 } else { 8.0 })
            .into_shape(),
        );
        ball.extend(
            VectorArrow::new(Point2::origin(), s.speed() * SCALE, -s.heading_deg(), Color::GREEN)
                .label(format!("v={:.1}m/s", s.speed()))
                .label_offset(-28.0)
                .into_shape(),
        );

        let at = vp.to_screen(s.x, s.y);
        scene.push(Shape::group(Transform::translate(at.x, at.y), ball));
        scene
    }
}

impl Draggable for Projectile {
    fn handles(&self, size: CanvasSize) -> Vec<DragHandle> {
        vec![DragHandle {
            id: "launch",
            at: Self::viewport(size).to_screen(self.x0, self.y0),
            radius: 10.0,
        }]
    }

    fn drag_to(&self, handle: &str, to: Point2<f64>, size: CanvasSize) -> Option<Self> {
        if handle != "launch" {
            return None;
        }
        let (x0, y0) = drag_launch_point(&Self::viewport(size), to);
        Some(Self { x0, y0, ..*self })
    }
}

/// Launch point for a screen drag, kept between the top padding and the ground.
pub(crate) fn drag_launch_point(vp: &Viewport, to: Point2<f64>) -> (f64, f64) {
    let ground_y = vp.origin.y;
    let clamped = Point2::new(
        to.x.clamp(0.0, 2000.0),
        to.y.clamp(TOP_PADDING, (ground_y - 8.0).max(TOP_PADDING)),
    );
    let world = vp.to_world(clamped);
    (world.x, world.y.max(0.0))
}
