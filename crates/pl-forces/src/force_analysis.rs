//! A block pulled along a rough horizontal track.

use crate::friction::{FrictionResolution, resolve_friction};
use nalgebra::{SVector, Vector1};
use pl_controls::{ParamSpec, Parameterized, PhaseSequencer, SequencerState, Staged};
use pl_core::numeric::sign;
use pl_core::units::constants::G_MPS2;
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow,
};
use pl_sim::{
    Dynamics, Integrator, Kinematic, LabModel, MetricSpec, Sample, SemiImplicitEuler,
    ZERO_SNAP_MPS,
};

/// Pixels per meter.
const SCALE_POS: f64 = 40.0;
/// Pixels per newton.
const FORCE_SCALE: f64 = 6.0;
const LEFT_PADDING: f64 = 60.0;
const BOTTOM_PADDING: f64 = 120.0;

const GRAVITY: Color = Color::rgb(0x0e, 0xa5, 0xe9);
const NORMAL: Color = Color::rgb(0x63, 0x66, 0xf1);
const NET: Color = Color::rgb(0x11, 0x18, 0x27);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceAnalysis {
    pub m: f64,
    /// Applied force magnitude (N)
    pub f: f64,
    /// Applied force angle above the horizontal (deg)
    pub theta: f64,
    pub mu: f64,
    pub v: f64,
    pub x: f64,
    pub t: f64,
    pub decomposition: PhaseSequencer,
}

impl ForceAnalysis {
    /// Force terms at the current velocity.
    pub fn forces(&self) -> FrictionResolution {
        self.forces_at(self.v)
    }

    fn forces_at(&self, v: f64) -> FrictionResolution {
        resolve_friction(self.m, self.f, self.theta, self.mu, v, G_MPS2)
    }

    pub fn acceleration(&self) -> f64 {
        if self.m > 0.0 {
            self.forces().net / self.m
        } else {
            0.0
        }
    }

    fn track_y(size: CanvasSize) -> f64 {
        size.height - BOTTOM_PADDING
    }

    fn body_x(&self) -> f64 {
        LEFT_PADDING + self.x * SCALE_POS
    }

    /// Applied force, split into Fx and Fy while the decomposition runs.
    fn applied_arrows(&self, r: &FrictionResolution) -> Vec<VectorArrow> {
        let at = Point2::new(0.0, -10.0);
        let full = VectorArrow::new(at, self.f * FORCE_SCALE, -self.theta, Color::RED)
            .label(format!("F={:.1}N", self.f));
        let fx = |scale: f64| {
            VectorArrow::new(
                at,
                r.fx.abs() * FORCE_SCALE * scale,
                if r.fx >= 0.0 { 0.0 } else { 180.0 },
                Color::AMBER,
            )
        };
        let fy = |scale: f64| {
            VectorArrow::new(
                at,
                r.fy.abs() * FORCE_SCALE * scale,
                if r.fy >= 0.0 { -90.0 } else { 90.0 },
                Color::PURPLE,
            )
        };
        match self.decomposition.state() {
            SequencerState::Idle => vec![full],
            SequencerState::Running { phase: 1, progress } => vec![fx(progress)],
            SequencerState::Running { phase: 2, progress } => {
                vec![fx(1.0).label(format!("Fx={:.1}N", r.fx)), fy(progress)]
            }
            SequencerState::Running { progress, .. } => vec![
                fx(1.0).label(format!("Fx={:.1}N", r.fx)),
                fy(1.0).label(format!("Fy={:.1}N", r.fy)),
                VectorArrow::new(at, self.f * FORCE_SCALE * progress, -self.theta, Color::RED),
            ],
        }
    }
}

impl Dynamics<1> for ForceAnalysis {
    fn acceleration(&self, state: &Kinematic<1>) -> SVector<f64, 1> {
        if self.m <= 0.0 {
            return Vector1::zeros();
        }
        Vector1::new(self.forces_at(state.velocity[0]).net / self.m)
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::slider("m", "Mass", 0.1, 20.0, 0.1, "kg"),
    ParamSpec::slider("F", "Applied force", 0.0, 50.0, 0.5, "N"),
    ParamSpec::slider("theta", "Force angle", -89.0, 89.0, 1.0, "°"),
    ParamSpec::slider("mu", "Friction coefficient", 0.0, 1.0, 0.01, ""),
    ParamSpec::readonly("v", "Velocity", "m/s"),
    ParamSpec::readonly("x", "Position", "m"),
    ParamSpec::readonly("t", "Time", "s"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("x", "Position", "m"),
    MetricSpec::new("v", "Velocity", "m/s"),
    MetricSpec::new("Fx", "Applied force (Fx)", "N"),
    MetricSpec::new("f", "Friction (f)", "N"),
    MetricSpec::new("fSigned", "Friction, signed", "N"),
    MetricSpec::new("netFx", "Net force", "N"),
    MetricSpec::new("N", "Normal force", "N"),
];

impl LabModel for ForceAnalysis {
    fn defaults() -> Self {
        Self {
            m: 2.0,
            f: 0.0,
            theta: 0.0,
            mu: 0.2,
            v: 0.0,
            x: 0.0,
            t: 0.0,
            decomposition: PhaseSequencer::decomposition(),
        }
    }

    fn advance(&self, dt: f64) -> Self {
        let t = self.t + dt;
        let forces = self.forces();
        if forces.holds() {
            return Self { v: 0.0, t, ..*self };
        }

        let body = Kinematic::new(Vector1::new(self.x), Vector1::new(self.v));
        let next = SemiImplicitEuler::new()
            .with_zero_snap(ZERO_SNAP_MPS)
            .step(self, &body, dt);
        let (mut x, mut v) = (next.position[0], next.velocity[0]);

        // Kinetic friction cannot reverse the motion on its own.
        if sign(v) * sign(self.v) < 0.0 && forces.fx.abs() <= forces.f_max {
            v = 0.0;
            x = self.x;
        }
        Self { x, v, t, ..*self }
    }

    fn animate(&self, dt: f64) -> Self {
        Self {
            decomposition: self.decomposition.advanced(dt),
            ..*self
        }
    }

    fn sample(&self) -> Sample {
        let r = self.forces();
        Sample::new()
            .with("t", self.t)
            .with("x", self.x)
            .with("v", self.v)
            .with("Fx", r.fx)
            .with("f", r.friction.abs())
            .with("fSigned", r.friction)
            .with("netFx", r.net)
            .with("N", r.normal)
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for ForceAnalysis {
    fn param_specs() -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        match key {
            "m" => Some(self.m),
            "F" => Some(self.f),
            "theta" => Some(self.theta),
            "mu" => Some(self.mu),
            "v" => Some(self.v),
            "x" => Some(self.x),
            "t" => Some(self.t),
            _ => None,
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        match key {
            "m" => next.m = value,
            "F" => next.f = value,
            "theta" => next.theta = value,
            "mu" => next.mu = value,
            "v" => next.v = value,
            "x" => next.x = value,
            "t" => next.t = value,
            _ => return None,
        }
        Some(next)
    }
}

impl Staged for ForceAnalysis {
    fn sequencer(&self) -> Option<PhaseSequencer> {
        Some(self.decomposition)
    }

    fn with_sequencer(&self, seq: PhaseSequencer) -> Option<Self> {
        Some(Self {
            decomposition: seq,
            ..*self
        })
    }
}

impl Render for ForceAnalysis {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        let r = self.forces();
        let weight = self.m * G_MPS2;
        let track_y = Self::track_y(size);

        scene.push(Shape::rect(0.0, track_y + 24.0, 2000.0, 6.0, Color::TRACK));

        let mut block = vec![
            Shape::Rect {
                min: Point2::new(-30.0, -30.0),
                size: pl_scene::Vector2::new(60.0, 40.0),
                fill: Color::GREEN,
                corner_radius: 6.0,
            },
            Shape::circle(-18.0, 12.0, 8.0, Color::INK_DARK),
            Shape::circle(18.0, 12.0, 8.0, Color::INK_DARK),
        ];
        let mut arrows = self.applied_arrows(&r);
        arrows.push(
            VectorArrow::new(Point2::new(20.0, 0.0), weight * FORCE_SCALE, 90.0, GRAVITY)
                .label(format!("mg={weight:.1}N")),
        );
        arrows.push(
            VectorArrow::new(Point2::new(-20.0, 0.0), r.normal * FORCE_SCALE, 270.0, NORMAL)
                .label(format!("N={:.2}N", r.normal)),
        );
        if r.friction.abs() > 0.01 {
            arrows.push(
                VectorArrow::new(
                    Point2::new(0.0, 20.0),
                    r.friction.abs() * FORCE_SCALE,
                    if r.friction < 0.0 { 180.0 } else { 0.0 },
                    Color::AMBER,
                )
                .label(format!("f={:.2}N", r.friction))
                .label_offset(10.0),
            );
        }
        arrows.push(
            VectorArrow::new(
                Point2::new(0.0, -40.0),
                r.net.abs() * FORCE_SCALE,
                if r.net >= 0.0 { 0.0 } else { 180.0 },
                NET,
            )
            .label(format!("ΣF={:.2}N", r.net)),
        );
        block.extend(
            arrows
                .into_iter()
                .filter_map(|a| a.label_size(display.font_size).into_shape()),
        );
        scene.push(Shape::group(
            Transform::translate(self.body_x(), track_y),
            block,
        ));

        let ink = display.theme.ink();
        let text = display.font_size;
        let left = [
            (format!("m = {:.2} kg", self.m), ink),
            (format!("F = {:.2} N", self.f), ink),
            (format!("θ = {:.1}°", self.theta), ink),
            (format!("Fx = {:.2} N", r.fx), Color::RED),
            (format!("Fy = {:.2} N", r.fy), GRAVITY),
            (format!("N = {:.2} N", r.normal), NORMAL),
        ];
        let right = [
            (format!("μN = {:.2} N", r.f_max), Color::AMBER),
            (format!("f = {:.2} N", r.friction), Color::AMBER),
            (format!("ΣFx = {:.2} N", r.net), ink),
            (format!("a = {:.3} m/s²", self.acceleration()), ink),
            (format!("v = {:.3} m/s", self.v), Color::GREEN),
            (format!("x = {:.3} m", self.x), Color::GREEN),
        ];
        let mut panel = vec![Shape::text(0.0, 0.0, "Live values", text + 4.0, ink)];
        for (col, rows) in [(0.0, left), (220.0, right)] {
            for (i, (line, color)) in rows.into_iter().enumerate() {
                panel.push(Shape::text(col, 30.0 + 24.0 * i as f64, line, text, color));
            }
        }
        scene.push(Shape::group(
            Transform::translate(LEFT_PADDING + 10.0 + 8.0 * SCALE_POS, 40.0),
            panel,
        ));
        scene
    }
}

impl Draggable for ForceAnalysis {
    fn handles(&self, size: CanvasSize) -> Vec<DragHandle> {
        vec![DragHandle {
            id: "body",
            at: Point2::new(self.body_x(), Self::track_y(size) - 10.0),
            radius: 30.0,
        }]
    }

    fn drag_to(&self, handle: &str, to: Point2<f64>, _size: CanvasSize) -> Option<Self> {
        if handle != "body" {
            return None;
        }
        Some(Self {
            x: (to.x.max(LEFT_PADDING) - LEFT_PADDING) / SCALE_POS,
            ..*self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulled(f: f64) -> ForceAnalysis {
        ForceAnalysis {
            f,
            ..ForceAnalysis::defaults()
        }
    }

    #[test]
    fn rest_branch_only_advances_time() {
        let m = pulled(3.0).advance(0.1);
        assert_eq!((m.x, m.v), (0.0, 0.0));
        assert!((m.t - 0.1).abs() < 1e-15);
    }

    #[test]
    fn slips_when_pull_beats_static_limit() {
        let m = pulled(10.0).advance(0.1);
        assert!(m.v > 0.0);
        assert!(m.x > 0.0);
        assert!((m.acceleration() - (10.0 - 3.924) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn coasting_block_stops_without_reversing() {
        let mut m = ForceAnalysis {
            v: 1.0,
            ..ForceAnalysis::defaults()
        };
        for _ in 0..120 {
            m = m.advance(1.0 / 60.0);
            assert!(m.v >= 0.0);
        }
        assert_eq!(m.v, 0.0);
        let parked = m.advance(1.0 / 60.0);
        assert_eq!(parked.x, m.x);
    }

    #[test]
    fn sample_reports_friction_magnitude_and_sign() {
        let s = pulled(3.0).sample();
        assert_eq!(s.get("fSigned"), Some(-3.0));
        assert_eq!(s.get("f"), Some(3.0));
        assert_eq!(s.get("netFx"), Some(0.0));
        assert!((s.get("N").unwrap() - 19.62).abs() < 1e-12);
    }

    #[test]
    fn decomposition_splits_applied_force() {
        let m = pulled(10.0)
            .toggle_sequence()
            .unwrap()
            .animate(2.0);
        assert_eq!(m.decomposition.phase(), 3);
        let arrows = m.applied_arrows(&m.forces());
        assert_eq!(arrows.len(), 3);
    }

    #[test]
    fn drag_moves_block_not_velocity() {
        let m = ForceAnalysis {
            v: 2.0,
            ..ForceAnalysis::defaults()
        };
        let dragged = m
            .drag_to("body", Point2::new(140.0, 0.0), CanvasSize::default())
            .unwrap();
        assert_eq!(dragged.x, 2.0);
        assert_eq!(dragged.v, 2.0);
    }
}
