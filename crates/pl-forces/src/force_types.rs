//! Static force breakdown for a block resting on an incline.

use pl_controls::{ParamSpec, Parameterized, PhaseSequencer, SequencerState, Staged};
use pl_core::numeric::deg_to_rad;
use pl_core::units::constants::G_ROUNDED_MPS2;
use pl_core::units::{Force, in_newtons, kg, mps2, newton};
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, Vector2, VectorArrow,
};
use pl_sim::{LabModel, MetricSpec, Sample};

/// Pixels per newton.
const SCALE: f64 = 10.0;
const BLOCK_W: f64 = 50.0;
const BLOCK_H: f64 = 30.0;
/// Where the block sits along the incline, 0..1.
const BLOCK_ALONG: f64 = 0.5;

const PARALLEL: Color = Color::rgb(0xfb, 0xbf, 0x24);
const PERPENDICULAR: Color = Color::rgb(0xa7, 0x8b, 0xfa);
const INCLINE_FILL: Color = Color::rgb(0xe5, 0xe7, 0xeb);
const INCLINE_EDGE: Color = Color::rgb(0x9c, 0xa3, 0xaf);

/// Forces the breakdown can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceKind {
    Gravity,
    Normal,
    Friction,
    Tension,
}

impl ForceKind {
    pub const ALL: [ForceKind; 4] = [
        ForceKind::Gravity,
        ForceKind::Normal,
        ForceKind::Friction,
        ForceKind::Tension,
    ];

    /// Key of the visibility toggle.
    pub fn toggle_key(self) -> &'static str {
        match self {
            ForceKind::Gravity => "showGravity",
            ForceKind::Normal => "showNormal",
            ForceKind::Friction => "showFriction",
            ForceKind::Tension => "showTension",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ForceKind::Gravity => "Gravity",
            ForceKind::Normal => "Normal force",
            ForceKind::Friction => "Friction",
            ForceKind::Tension => "Tension",
        }
    }

    fn from_toggle_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.toggle_key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Force magnitudes on the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBreakdown {
    pub gravity: Force,
    pub gravity_parallel: Force,
    pub gravity_perpendicular: Force,
    pub normal: Force,
    /// Maximum friction, μN.
    pub friction: Force,
    pub tension: Force,
}

impl ForceBreakdown {
    /// Net tendency along the incline, up positive (N).
    pub fn along_plane(&self) -> f64 {
        in_newtons(self.tension) - in_newtons(self.gravity_parallel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceTypes {
    pub mass: f64,
    /// Incline angle (deg)
    pub angle: f64,
    pub applied_force: f64,
    pub mu: f64,
    /// Visibility per [`ForceKind`], in `ForceKind::ALL` order.
    pub selected: [bool; 4],
    pub show_components: bool,
    /// Reveals the parallel, then the perpendicular component.
    pub components: PhaseSequencer,
}

impl ForceTypes {
    pub fn breakdown(&self) -> ForceBreakdown {
        let alpha = deg_to_rad(self.angle);
        let gravity: Force = kg(self.mass) * mps2(G_ROUNDED_MPS2);
        let gravity_parallel = gravity * alpha.sin();
        let gravity_perpendicular = gravity * alpha.cos();
        let normal = gravity_perpendicular;
        ForceBreakdown {
            gravity,
            gravity_parallel,
            gravity_perpendicular,
            normal,
            friction: normal * self.mu,
            tension: newton(self.applied_force),
        }
    }

    pub fn shows(&self, kind: ForceKind) -> bool {
        self.selected[kind.index()]
    }

    /// Draw scale of the (parallel, perpendicular) components.
    fn component_scales(&self) -> (f64, f64) {
        if !self.show_components {
            return (0.0, 0.0);
        }
        match self.components.state() {
            SequencerState::Idle => (1.0, 1.0),
            SequencerState::Running { phase: 1, progress } => (progress, 0.0),
            SequencerState::Running { progress, .. } => (1.0, progress),
        }
    }

    /// Incline width that keeps the slope on the canvas.
    fn incline_width(&self, size: CanvasSize) -> f64 {
        let max_w = size.width * 2.0 / 3.0;
        let tan = deg_to_rad(self.angle).tan();
        if tan > 1e-9 {
            max_w.min((size.height - 120.0) / tan)
        } else {
            max_w
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::slider("mass", "Mass", 0.5, 10.0, 0.5, "kg"),
    ParamSpec::slider("angle", "Incline angle", 0.0, 60.0, 5.0, "°"),
    ParamSpec::slider("appliedForce", "Applied force", 0.0, 50.0, 1.0, "N"),
    ParamSpec::slider("coefficientFriction", "Friction coefficient", 0.0, 1.0, 0.1, ""),
    ParamSpec::toggle("showGravity", "Show gravity"),
    ParamSpec::toggle("showNormal", "Show normal force"),
    ParamSpec::toggle("showFriction", "Show friction"),
    ParamSpec::toggle("showTension", "Show tension"),
    ParamSpec::toggle("showComponents", "Decompose gravity"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("mass", "Mass", "kg"),
    MetricSpec::new("gravity", "Gravity", "N"),
    MetricSpec::new("normal", "Normal force", "N"),
    MetricSpec::new("friction", "Friction", "N"),
    MetricSpec::new("tension", "Tension", "N"),
    MetricSpec::new("gravityParallel", "Gravity along incline", "N"),
    MetricSpec::new("gravityPerpendicular", "Gravity into incline", "N"),
];

impl LabModel for ForceTypes {
    fn defaults() -> Self {
        Self {
            mass: 2.0,
            angle: 0.0,
            applied_force: 5.0,
            mu: 0.3,
            selected: [true; 4],
            show_components: false,
            components: PhaseSequencer::new(2, pl_controls::DECOMPOSITION_PHASE_S),
        }
    }

    /// Nothing moves.
    fn advance(&self, _dt: f64) -> Self {
        *self
    }

    fn animate(&self, dt: f64) -> Self {
        Self {
            components: self.components.advanced(dt),
            ..*self
        }
    }

    fn sample(&self) -> Sample {
        let b = self.breakdown();
        Sample::new()
            .with("mass", self.mass)
            .with("gravity", in_newtons(b.gravity))
            .with("normal", in_newtons(b.normal))
            .with("friction", in_newtons(b.friction))
            .with("tension", in_newtons(b.tension))
            .with("gravityParallel", in_newtons(b.gravity_parallel))
            .with("gravityPerpendicular", in_newtons(b.gravity_perpendicular))
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        0.0
    }

    fn playable() -> bool {
        false
    }
}

impl Parameterized for ForceTypes {
    fn param_specs() -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        match key {
            "mass" => Some(self.mass),
            "angle" => Some(self.angle),
            "appliedForce" => Some(self.applied_force),
            "coefficientFriction" => Some(self.mu),
            "showComponents" => Some(flag(self.show_components)),
            _ => ForceKind::from_toggle_key(key).map(|k| flag(self.shows(k))),
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        let on = value >= 0.5;
        match key {
            "mass" => next.mass = value,
            "angle" => next.angle = value,
            "appliedForce" => next.applied_force = value,
            "coefficientFriction" => next.mu = value,
            "showComponents" => {
                next.show_components = on;
                next.components = if on {
                    self.components.started()
                } else {
                    self.components.stopped()
                };
            }
            _ => {
                let kind = ForceKind::from_toggle_key(key)?;
                next.selected[kind.index()] = on;
            }
        }
        Some(next)
    }
}

impl Staged for ForceTypes {
    fn sequencer(&self) -> Option<PhaseSequencer> {
        Some(self.components)
    }

    fn with_sequencer(&self, seq: PhaseSequencer) -> Option<Self> {
        Some(Self {
            components: seq,
            show_components: seq.is_running(),
            ..*self
        })
    }
}

impl Render for ForceTypes {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        let ink = display.theme.ink();
        let b = self.breakdown();
        let alpha = deg_to_rad(self.angle);
        let (sin, cos) = alpha.sin_cos();

        let base = Point2::new(size.width / 6.0, size.height - 60.0);
        let width = self.incline_width(size);
        let height = width * alpha.tan();
        if self.angle > 0.0 {
            scene.push(Shape::Polygon {
                points: vec![
                    base,
                    Point2::new(base.x + width, base.y),
                    Point2::new(base.x + width, base.y - height),
                ],
                fill: INCLINE_FILL,
                stroke: Some(INCLINE_EDGE),
            });
        } else {
            scene.push(Shape::rect(base.x, base.y, width, 3.0, INCLINE_EDGE));
        }

        // Block center, lifted half a block off the surface along the normal.
        let on_plane = Point2::new(base.x + BLOCK_ALONG * width, base.y - BLOCK_ALONG * height);
        let center = on_plane + Vector2::new(-sin, -cos) * (BLOCK_H / 2.0);
        scene.push(Shape::group(
            Transform::translate(center.x, center.y).rotated(-self.angle),
            vec![
                Shape::Rect {
                    min: Point2::new(-BLOCK_W / 2.0, -BLOCK_H / 2.0),
                    size: Vector2::new(BLOCK_W, BLOCK_H),
                    fill: Color::BLUE,
                    corner_radius: 4.0,
                },
                Shape::text(-6.0, -8.0, "m", display.font_size, Color::WHITE),
            ],
        ));

        // Screen-space force vectors in newtons, y down.
        let n = in_newtons;
        let friction_dir = if b.along_plane() < 0.0 { 1.0 } else { -1.0 };
        let gravity = Vector2::new(0.0, n(b.gravity));
        let normal = Vector2::new(-sin, -cos) * n(b.normal);
        let tension = Vector2::new(cos, -sin) * n(b.tension);
        let friction = Vector2::new(cos, -sin) * (friction_dir * n(b.friction));
        let (par_scale, perp_scale) = self.component_scales();
        let parallel = Vector2::new(-cos, sin) * (n(b.gravity_parallel) * par_scale);
        let perpendicular = Vector2::new(sin, cos) * (n(b.gravity_perpendicular) * perp_scale);

        let arrow = |v: Vector2<f64>, color: Color, label: String| {
            VectorArrow::new(center, v.norm() * SCALE, v.y.atan2(v.x).to_degrees(), color)
                .label(label)
                .label_offset(-18.0)
                .label_size(display.font_size)
        };
        let mut arrows = Vec::new();
        if self.shows(ForceKind::Gravity) {
            arrows.push(arrow(gravity, Color::RED, format!("G={:.1}N", n(b.gravity))));
            if self.angle > 0.0 {
                arrows.push(arrow(
                    parallel,
                    PARALLEL,
                    format!("G∥={:.1}N", n(b.gravity_parallel)),
                ));
                arrows.push(arrow(
                    perpendicular,
                    PERPENDICULAR,
                    format!("G⊥={:.1}N", n(b.gravity_perpendicular)),
                ));
            }
        }
        if self.shows(ForceKind::Normal) {
            arrows.push(arrow(normal, Color::GREEN, format!("N={:.1}N", n(b.normal))));
        }
        if self.shows(ForceKind::Friction) {
            arrows.push(arrow(
                friction,
                Color::rgb(0xec, 0x48, 0x99),
                format!("f={:.1}N", n(b.friction)),
            ));
        }
        if self.shows(ForceKind::Tension) {
            arrows.push(arrow(tension, Color::CYAN, format!("F={:.1}N", n(b.tension))));
        }
        let net = gravity + normal + tension + friction;
        if net.norm() > 1e-3 {
            arrows.push(arrow(net, Color::ORANGE, format!("ΣF={:.1}N", net.norm())));
        }
        scene.extend(arrows.into_iter().filter_map(VectorArrow::into_shape));

        let mut rows = vec![
            (format!("G = {:.2} N", n(b.gravity)), Color::RED),
            (format!("N = {:.2} N", n(b.normal)), Color::GREEN),
            (format!("f = {:.2} N", n(b.friction)), Color::rgb(0xec, 0x48, 0x99)),
            (format!("F = {:.2} N", n(b.tension)), Color::CYAN),
        ];
        if self.angle > 0.0 {
            rows.push((format!("G∥ = {:.2} N", n(b.gravity_parallel)), PARALLEL));
            rows.push((format!("G⊥ = {:.2} N", n(b.gravity_perpendicular)), PERPENDICULAR));
        }
        rows.push((format!("m = {:.1} kg", self.mass), ink));
        rows.push((format!("θ = {}°", self.angle), ink));
        rows.push((format!("μ = {:.2}", self.mu), ink));
        rows.push((format!("g = {G_ROUNDED_MPS2} m/s²"), ink));
        let card = rows
            .into_iter()
            .enumerate()
            .map(|(i, (line, color))| Shape::text(0.0, 22.0 * i as f64, line, display.font_size, color))
            .collect();
        scene.push(Shape::group(Transform::translate(size.width - 260.0, 20.0), card));
        scene
    }
}

impl Draggable for ForceTypes {
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
    fn flat_ground_breakdown() {
        let b = ForceTypes::defaults().breakdown();
        assert_eq!(in_newtons(b.gravity), 20.0);
        assert_eq!(in_newtons(b.normal), 20.0);
        assert!(in_newtons(b.gravity_parallel).abs() < 1e-12);
        assert!((in_newtons(b.friction) - 6.0).abs() < 1e-12);
        assert_eq!(in_newtons(b.tension), 5.0);
    }

    #[test]
    fn incline_splits_gravity() {
        let m = ForceTypes {
            angle: 30.0,
            ..ForceTypes::defaults()
        };
        let s = m.sample();
        assert!((s.get("gravityParallel").unwrap() - 10.0).abs() < 1e-9);
        assert!((s.get("gravityPerpendicular").unwrap() - 20.0 * 30f64.to_radians().cos()).abs() < 1e-9);
        assert_eq!(s.get("normal"), s.get("gravityPerpendicular"));
    }

    #[test]
    fn not_playable_and_static() {
        let m = ForceTypes::defaults();
        assert!(!ForceTypes::playable());
        assert_eq!(m.advance(1.0), m);
    }

    #[test]
    fn toggles_hide_forces() {
        let m = ForceTypes::defaults().with_param("showFriction", 0.0).unwrap();
        assert!(!m.shows(ForceKind::Friction));
        assert_eq!(m.param("showFriction"), Some(0.0));
        assert_eq!(m.param("showTension"), Some(1.0));
        assert!(m.with_param("showApplied", 1.0).is_none());
    }

    #[test]
    fn components_reveal_in_two_phases() {
        let m = ForceTypes::defaults().with_param("showComponents", 1.0).unwrap();
        assert_eq!(m.component_scales(), (0.0, 0.0));
        let m = m.animate(1.2);
        let (par, perp) = m.component_scales();
        assert_eq!(par, 1.0);
        assert!((perp - 0.5).abs() < 1e-9);
        // Finished animations keep both components on screen.
        let m = m.animate(1.0);
        assert_eq!(m.component_scales(), (1.0, 1.0));
        let m = m.with_param("showComponents", 0.0).unwrap();
        assert_eq!(m.component_scales(), (0.0, 0.0));
    }
}
