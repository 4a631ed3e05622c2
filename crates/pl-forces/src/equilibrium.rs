//! Concurrent forces acting on a free body.
//!
//! Force components use screen orientation: `(F cos θ, -F sin θ)`, so a
//! positive angle points up on the canvas and the weight `(0, m g)` points
//! down.

use nalgebra::{Vector2, SVector};
use pl_controls::{ParamSpec, Parameterized, Staged};
use pl_core::numeric::deg_to_rad;
use pl_core::units::constants::G_MPS2;
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow,
};
use pl_sim::{Dynamics, Integrator, Kinematic, LabModel, MetricSpec, Sample, SemiImplicitEuler};

/// Velocity retained per step.
pub const EQUILIBRIUM_DAMPING: f64 = 0.98;

const POS_SCALE: f64 = 40.0;
const FORCE_SCALE: f64 = 6.0;

const F2_COLOR: Color = Color::rgb(0x22, 0xc5, 0x5e);
const F3_COLOR: Color = Color::rgb(0xa7, 0x8b, 0xfa);
const WEIGHT_COLOR: Color = Color::rgb(0x0e, 0xa5, 0xe9);
const BASELINE: Color = Color::rgb(0xe5, 0xe7, 0xeb);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equilibrium {
    pub m: f64,
    pub f1: f64,
    pub theta1: f64,
    pub f2: f64,
    pub theta2: f64,
    pub f3: f64,
    pub theta3: f64,
    pub include_weight: bool,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub t: f64,
}

/// Every force on the body and their sum, in newtons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetForce {
    pub applied: [Vector2<f64>; 3],
    /// Zero when the weight is excluded.
    pub weight: Vector2<f64>,
    pub sum: Vector2<f64>,
}

impl NetForce {
    pub fn magnitude(&self) -> f64 {
        self.sum.norm()
    }

    /// Within `tol` newtons of balanced.
    pub fn is_balanced(&self, tol: f64) -> bool {
        self.magnitude() <= tol
    }
}

fn component(f: f64, theta_deg: f64) -> Vector2<f64> {
    let theta = deg_to_rad(theta_deg);
    Vector2::new(f * theta.cos(), -f * theta.sin())
}

/// Screen angle in degrees of a screen-oriented vector.
fn screen_angle(v: &Vector2<f64>) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

impl Equilibrium {
    pub fn net_force(&self) -> NetForce {
        let applied = [
            component(self.f1, self.theta1),
            component(self.f2, self.theta2),
            component(self.f3, self.theta3),
        ];
        let weight = if self.include_weight {
            Vector2::new(0.0, self.m * G_MPS2)
        } else {
            Vector2::zeros()
        };
        let sum = applied.iter().sum::<Vector2<f64>>() + weight;
        NetForce {
            applied,
            weight,
            sum,
        }
    }

    fn origin(size: CanvasSize) -> Point2<f64> {
        Point2::new(size.width / 2.0, size.height / 2.0 + 60.0)
    }

    fn body_at(&self, size: CanvasSize) -> Point2<f64> {
        Self::origin(size) + Vector2::new(self.x, self.y) * POS_SCALE
    }
}

impl Dynamics<2> for Equilibrium {
    fn acceleration(&self, _state: &Kinematic<2>) -> SVector<f64, 2> {
        if self.m <= 0.0 {
            return Vector2::zeros();
        }
        self.net_force().sum / self.m
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::slider("m", "Mass", 0.5, 10.0, 0.5, "kg"),
    ParamSpec::slider("F1", "F1 magnitude", 0.0, 50.0, 1.0, "N"),
    ParamSpec::slider("theta1", "F1 angle", -180.0, 180.0, 5.0, "°"),
    ParamSpec::slider("F2", "F2 magnitude", 0.0, 50.0, 1.0, "N"),
    ParamSpec::slider("theta2", "F2 angle", -180.0, 180.0, 5.0, "°"),
    ParamSpec::slider("F3", "F3 magnitude", 0.0, 50.0, 1.0, "N"),
    ParamSpec::slider("theta3", "F3 angle", -180.0, 180.0, 5.0, "°"),
    ParamSpec::toggle("includeWeight", "Include weight"),
    ParamSpec::readonly("x", "x", "m"),
    ParamSpec::readonly("y", "y", "m"),
    ParamSpec::readonly("vx", "vx", "m/s"),
    ParamSpec::readonly("vy", "vy", "m/s"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("x", "Position x", "m"),
    MetricSpec::new("y", "Position y", "m"),
    MetricSpec::new("vx", "Velocity x", "m/s"),
    MetricSpec::new("vy", "Velocity y", "m/s"),
    MetricSpec::new("Fx", "Net force x", "N"),
    MetricSpec::new("Fy", "Net force y", "N"),
    MetricSpec::new("F", "Net force", "N"),
];

impl LabModel for Equilibrium {
    fn defaults() -> Self {
        Self {
            m: 2.0,
            f1: 10.0,
            theta1: 0.0,
            f2: 10.0,
            theta2: 120.0,
            f3: 10.0,
            theta3: 240.0,
            include_weight: false,
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            t: 0.0,
        }
    }

    fn advance(&self, dt: f64) -> Self {
        let body = Kinematic::new(Vector2::new(self.x, self.y), Vector2::new(self.vx, self.vy));
        let next = SemiImplicitEuler::new()
            .with_damping(EQUILIBRIUM_DAMPING)
            .step(self, &body, dt);
        Self {
            x: next.position.x,
            y: next.position.y,
            vx: next.velocity.x,
            vy: next.velocity.y,
            t: self.t + dt,
            ..*self
        }
    }

    fn sample(&self) -> Sample {
        let net = self.net_force();
        Sample::new()
            .with("t", self.t)
            .with("x", self.x)
            .with("y", self.y)
            .with("vx", self.vx)
            .with("vy", self.vy)
            .with("Fx", net.sum.x)
            .with("Fy", net.sum.y)
            .with("F", net.magnitude())
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for Equilibrium {
    fn param_specs() -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        match key {
            "m" => Some(self.m),
            "F1" => Some(self.f1),
            "theta1" => Some(self.theta1),
            "F2" => Some(self.f2),
            "theta2" => Some(self.theta2),
            "F3" => Some(self.f3),
            "theta3" => Some(self.theta3),
            "includeWeight" => Some(if self.include_weight { 1.0 } else { 0.0 }),
            "x" => Some(self.x),
            "y" => Some(self.y),
            "vx" => Some(self.vx),
            "vy" => Some(self.vy),
            _ => None,
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        match key {
            "m" => next.m = value,
            "F1" => next.f1 = value,
            "theta1" => next.theta1 = value,
            "F2" => next.f2 = value,
            "theta2" => next.theta2 = value,
            "F3" => next.f3 = value,
            "theta3" => next.theta3 = value,
            "includeWeight" => next.include_weight = value >= 0.5,
            "x" => next.x = value,
            "y" => next.y = value,
            "vx" => next.vx = value,
            "vy" => next.vy = value,
            _ => return None,
        }
        Some(next)
    }
}

impl Staged for Equilibrium {}

impl Render for Equilibrium {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        let origin = Self::origin(size);
        let body = self.body_at(size);
        let net = self.net_force();

        scene.push(Shape::rect(0.0, origin.y + 24.0, 2000.0, 4.0, BASELINE));

        let mut children = vec![Shape::Rect {
            min: Point2::new(-20.0, -14.0),
            size: Vector2::new(40.0, 28.0),
            fill: WEIGHT_COLOR,
            corner_radius: 6.0,
        }];
        let labelled = |v: &Vector2<f64>, color: Color, name: &str| {
            VectorArrow::new(Point2::origin(), v.norm() * FORCE_SCALE, screen_angle(v), color)
                .label(format!("{name}={:.1}N", v.norm()))
                .label_size(display.font_size)
        };
        let mut arrows = vec![
            labelled(&net.applied[0], Color::RED, "F1"),
            labelled(&net.applied[1], F2_COLOR, "F2"),
            labelled(&net.applied[2], F3_COLOR, "F3"),
        ];
        if self.include_weight {
            arrows.push(labelled(&net.weight, WEIGHT_COLOR, "mg"));
        }
        arrows.push(labelled(&net.sum, Color::ORANGE, "ΣF").label_offset(-28.0));
        children.extend(arrows.into_iter().filter_map(VectorArrow::into_shape));

        scene.push(Shape::group(Transform::translate(body.x, body.y), children));
        scene
    }
}

impl Draggable for Equilibrium {
    fn handles(&self, _size: CanvasSize) -> Vec<DragHandle> {
        Vec::new()
    }

    fn drag_to(&self, _handle: &str, _to: Point2<f64>, _size: CanvasSize) -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_forces_cancel() {
        let net = Equilibrium::defaults().net_force();
        assert!(net.is_balanced(1e-9), "net = {:?}", net.sum);
    }

    #[test]
    fn angles_point_up_on_screen() {
        let up = component(10.0, 90.0);
        assert!(up.x.abs() < 1e-12);
        assert!((up.y + 10.0).abs() < 1e-12);
    }

    #[test]
    fn weight_pulls_down() {
        let m = Equilibrium {
            include_weight: true,
            ..Equilibrium::defaults()
        };
        let net = m.net_force();
        assert!((net.sum.y - 2.0 * 9.81).abs() < 1e-9);

        let next = m.advance(0.1);
        assert!(next.vy > 0.0);
        assert!(next.y > 0.0);
    }

    #[test]
    fn damping_applies_each_step() {
        let m = Equilibrium {
            f2: 0.0,
            f3: 0.0,
            ..Equilibrium::defaults()
        };
        let next = m.advance(0.1);
        // a = 10 / 2 = 5
        assert!((next.vx - 0.5 * EQUILIBRIUM_DAMPING).abs() < 1e-12);
        assert!((next.x - next.vx * 0.1).abs() < 1e-12);
    }

    #[test]
    fn weight_toggle_is_a_param() {
        let m = Equilibrium::defaults().with_param("includeWeight", 1.0).unwrap();
        assert!(m.include_weight);
        assert_eq!(m.param("includeWeight"), Some(1.0));
    }

    #[test]
    fn scene_has_one_arrow_per_force_plus_net() {
        let scene = Equilibrium {
            f1: 20.0,
            ..Equilibrium::defaults()
        }
        .render(CanvasSize::default(), &DisplaySettings::default());
        let arrows = scene
            .flatten()
            .into_iter()
            .filter(|s| matches!(s, Shape::Arrow { .. }))
            .count();
        assert_eq!(arrows, 4);
    }
}
