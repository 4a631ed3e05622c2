//! Projectile motion split into its horizontal and vertical components.

use crate::ballistic::{Ballistic, Launch};
use crate::projectile::{LAUNCH_PARAMS, drag_launch_point};
use pl_controls::{ParamSpec, Parameterized, PhaseSequencer, SequencerState, Staged};
use pl_core::units::constants::G_MPS2;
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow, Viewport,
};
use pl_sim::{LabModel, MetricSpec, Sample};

const SCALE: f64 = 12.0;
const BOTTOM_PADDING: f64 = 60.0;
/// Trajectory polylines use one point per 20 ms, capped.
const TRAIL_DT: f64 = 0.02;
const TRAIL_MAX_POINTS: usize = 240;

const HORIZONTAL: Color = Color::rgb(0x0e, 0xa5, 0xe9);
const VERTICAL: Color = Color::ORANGE;
const RESULTANT: Color = Color::rgb(0x06, 0x5f, 0x46);
const STAGE_X: Color = Color::rgb(0x60, 0xa5, 0xfa);
const STAGE_Y: Color = Color::rgb(0xfb, 0x92, 0x3c);
const STAGE_V: Color = Color::rgb(0x34, 0xd3, 0x99);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorDecomposition {
    pub v: f64,
    pub angle: f64,
    pub x0: f64,
    pub y0: f64,
    pub g: f64,
    pub t: f64,
    pub decomposition: PhaseSequencer,
}

impl VectorDecomposition {
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

    fn viewport(size: CanvasSize) -> Viewport {
        Viewport::new(
            SCALE,
            (size.width / 3.0).max(160.0),
            size.height - BOTTOM_PADDING,
        )
    }

    /// Combined, horizontal-only and vertical-only trails up to the current time.
    fn trails(&self, vp: &Viewport) -> [Vec<Point2<f64>>; 3] {
        let launch = self.launch();
        let n = ((self.t / TRAIL_DT + 1.0).ceil() as usize).clamp(2, TRAIL_MAX_POINTS);
        let mut combined = Vec::with_capacity(n + 1);
        let mut horizontal = Vec::with_capacity(n + 1);
        let mut vertical = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let ts = i as f64 / n as f64 * self.t;
            let s = launch.at(ts);
            combined.push(vp.to_screen(s.x, s.y));
            horizontal.push(vp.to_screen(s.x, self.y0));
            vertical.push(vp.to_screen(self.x0, s.y));
        }
        [combined, horizontal, vertical]
    }

    /// Arrows on the projectile for the current decomposition stage.
    fn staged_arrows(&self, s: &Ballistic) -> Vec<Shape> {
        let x_arrow = |len: f64, label: Option<String>| {
            let a = VectorArrow::new(
                Point2::origin(),
                len,
                if s.vx >= 0.0 { 0.0 } else { 180.0 },
                STAGE_X,
            )
            .label_offset(-8.0);
            match label {
                Some(l) => a.label(l),
                None => a,
            }
        };
        let y_arrow = |len: f64, label: Option<String>| {
            let a = VectorArrow::new(
                Point2::origin(),
                len,
                if s.vy >= 0.0 { -90.0 } else { 90.0 },
                STAGE_Y,
            )
            .label_offset(-8.0);
            match label {
                Some(l) => a.label(l),
                None => a,
            }
        };
        let v_arrow = |len: f64, label: Option<String>| {
            let a = VectorArrow::new(Point2::origin(), len, -s.heading_deg(), STAGE_V)
                .label_offset(-28.0);
            match label {
                Some(l) => a.label(l),
                None => a,
            }
        };

        let vx_len = s.vx.abs() * SCALE;
        let vy_len = s.vy.abs() * SCALE;
        let v_len = s.speed() * SCALE;
        let vx_label = format!("vx={:.1} m/s", s.vx);
        let vy_label = format!("vy={:.1} m/s", s.vy);
        let v_label = format!("v={:.1} m/s", s.speed());

        // The stage being drawn grows with progress and has no label yet.
        let arrows = match self.decomposition.state() {
            SequencerState::Idle => vec![
                VectorArrow::new(Point2::origin(), v_len, -s.heading_deg(), RESULTANT)
                    .label(v_label)
                    .label_offset(-18.0),
            ],
            SequencerState::Running { phase: 1, progress } => {
                vec![x_arrow(vx_len * progress, None)]
            }
            SequencerState::Running { phase: 2, progress } => vec![
                x_arrow(vx_len, Some(vx_label)),
                y_arrow(vy_len * progress, None),
            ],
            SequencerState::Running { progress, .. } => vec![
                x_arrow(vx_len, Some(vx_label)),
                y_arrow(vy_len, Some(vy_label)),
                v_arrow(v_len * progress, None),
            ],
        };
        arrows.into_iter().filter_map(VectorArrow::into_shape).collect()
    }
}

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("x", "Horizontal position", "m"),
    MetricSpec::new("y", "Height", "m"),
];

impl LabModel for VectorDecomposition {
    fn defaults() -> Self {
        Self {
            v: 12.0,
            angle: 40.0,
            x0: -20.0,
            y0: 10.0,
            g: G_MPS2,
            t: 0.0,
            decomposition: PhaseSequencer::decomposition(),
        }
    }

    fn advance(&self, dt: f64) -> Self {
        Self {
            t: self.t + dt,
            ..*self
        }
    }

    fn animate(&self, dt: f64) -> Self {
        Self {
            decomposition: self.decomposition.advanced(dt),
            ..*self
        }
    }

    fn sample(&self) -> Sample {
        let s = self.state();
        Sample::new().with("t", self.t).with("x", s.x).with("y", s.y)
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for VectorDecomposition {
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

impl Staged for VectorDecomposition {
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

impl Render for VectorDecomposition {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        let vp = Self::viewport(size);
        let s = self.state();

        scene.push(Shape::rect(0.0, vp.origin.y, 4000.0, 6.0, Color::GROUND));

        let [combined, horizontal, vertical] = self.trails(&vp);
        scene.push(Shape::Line {
            points: horizontal,
            color: HORIZONTAL,
            width: 2.0,
            dashed: true,
        });
        scene.push(Shape::Line {
            points: vertical,
            color: VERTICAL,
            width: 2.0,
            dashed: true,
        });
        scene.push(Shape::Line {
            points: combined,
            color: Color::GREEN,
            width: 3.0,
            dashed: false,
        });

        // Shadow of the motion on each axis.
        let h = vp.to_screen(s.x, self.y0);
        scene.push(Shape::circle(h.x, h.y, 6.0, HORIZONTAL));
        scene.push_opt(
            VectorArrow::new(
                h,
                s.vx.abs() * SCALE,
                if s.vx >= 0.0 { 0.0 } else { 180.0 },
                HORIZONTAL,
            )
            .label(format!("vx={:.1} m/s", s.vx))
            .label_offset(-14.0)
            .into_shape(),
        );
        let v = vp.to_screen(self.x0, s.y);
        scene.push(Shape::circle(v.x, v.y, 6.0, VERTICAL));
        scene.push_opt(
            VectorArrow::new(
                v,
                s.vy.abs() * SCALE,
                if s.vy >= 0.0 { -90.0 } else { 90.0 },
                VERTICAL,
            )
            .label(format!("vy={:.1} m/s", s.vy))
            .label_offset(if s.vy >= 0.0 { -18.0 } else { 8.0 })
            .into_shape(),
        );

        let ink = display.theme.ink();
        let mut ball = vec![
            Shape::circle(0.0, 0.0, 8.0, Color::GREEN),
            Shape::text(0.0, -28.0, format!("x={:.1}m", s.x), display.small_font(), ink),
            Shape::text(0.0, -14.0, format!("y={:.1}m", s.y), display.small_font(), ink),
        ];
        ball.extend(self.staged_arrows(&s));
        let at = vp.to_screen(s.x, s.y);
        scene.push(Shape::group(Transform::translate(at.x, at.y), ball));
        scene
    }
}

impl Draggable for VectorDecomposition {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn arrows(m: &VectorDecomposition) -> usize {
        m.render(
            CanvasSize::default(),
            &DisplaySettings {
                show_grid: false,
                ..DisplaySettings::default()
            },
        )
        .flatten()
        .iter()
        .filter(|s| matches!(s, Shape::Arrow { .. }))
        .count()
    }

    #[test]
    fn animation_runs_while_paused() {
        let m = VectorDecomposition::defaults().toggle_sequence().unwrap();
        let m = m.animate(1.0);
        assert_eq!(m.decomposition.phase(), 2);
        assert_eq!(m.t, 0.0);
    }

    #[test]
    fn stages_add_arrows() {
        // Idle: two axis shadows plus the resultant.
        let idle = VectorDecomposition::defaults();
        assert_eq!(arrows(&idle), 3);

        let started = idle.toggle_sequence().unwrap().animate(0.4);
        assert_eq!(arrows(&started), 3);
        let third = started.animate(1.3);
        assert_eq!(third.decomposition.phase(), 3);
        assert_eq!(arrows(&third), 5);

        let done = third.animate(1.0);
        assert!(!done.decomposition.is_running());
    }

    #[test]
    fn trail_point_count_is_capped() {
        let vp = VectorDecomposition::viewport(CanvasSize::default());
        let early = VectorDecomposition::defaults();
        assert_eq!(early.trails(&vp)[0].len(), 3);
        let late = early.advance(100.0);
        assert_eq!(late.trails(&vp)[0].len(), TRAIL_MAX_POINTS + 1);
    }
}
