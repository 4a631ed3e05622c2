//! Relative motion: object A seen from the ground and from a frame riding on B.

use pl_controls::{ParamSpec, Parameterized, Staged};
use pl_scene::{
    CanvasSize, Color, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene, Shape,
    Transform, VectorArrow,
};
use pl_sim::{LabModel, MetricSpec, Sample};

const SCALE: f64 = 40.0;
const GROUND_TRACK_Y: f64 = 180.0;
const MOVING_TRACK_Y: f64 = 280.0;
const LEFT_PADDING: f64 = 60.0;
const MOVING_TRACK: Color = Color::rgb(0xe0, 0xe7, 0xff);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub t: f64,
    pub x_a: f64,
    pub v_a: f64,
    /// Origin of the moving frame.
    pub x_b: f64,
    pub v_b: f64,
}

impl ReferenceFrame {
    /// Position of A in B's frame.
    pub fn x_rel(&self) -> f64 {
        self.x_a - self.x_b
    }

    pub fn v_rel(&self) -> f64 {
        self.v_a - self.v_b
    }

    fn screen_x(x: f64) -> f64 {
        LEFT_PADDING + x * SCALE
    }

    fn body(label: &'static str, fill: Color, v: f64, display: &DisplaySettings) -> Vec<Shape> {
        let mut shapes = vec![
            Shape::circle(0.0, 0.0, 12.0, fill),
            Shape::text(-5.0, -6.0, label, 12.0, Color::WHITE),
        ];
        // Velocity arrows use half the position scale.
        shapes.extend(
            VectorArrow::new(Point2::new(0.0, -25.0), v * SCALE / 2.0, 0.0, fill)
                .label(format!("v{label}={v:.1}"))
                .label_size(display.font_size)
                .into_shape(),
        );
        shapes
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::readonly("t", "Time", "s"),
    ParamSpec::slider("xA", "Position of A", 0.0, 30.0, 0.5, "m"),
    ParamSpec::slider("vA", "Velocity of A", -10.0, 10.0, 0.1, "m/s"),
    ParamSpec::slider("xB", "Position of B", 0.0, 30.0, 0.5, "m"),
    ParamSpec::slider("vB", "Velocity of B", -10.0, 10.0, 0.1, "m/s"),
];

const METRICS: &[MetricSpec] = &[
    MetricSpec::new("t", "Time", "s"),
    MetricSpec::new("xA", "Ground position", "m"),
    MetricSpec::new("xRel", "Relative position", "m"),
    MetricSpec::new("vA", "Ground velocity", "m/s"),
    MetricSpec::new("vRel", "Relative velocity", "m/s"),
];

impl LabModel for ReferenceFrame {
    fn defaults() -> Self {
        Self {
            t: 0.0,
            x_a: 0.0,
            v_a: 2.0,
            x_b: 5.0,
            v_b: 1.0,
        }
    }

    /// Both bodies move at constant velocity, so a plain Euler step is exact.
    fn advance(&self, dt: f64) -> Self {
        Self {
            t: self.t + dt,
            x_a: self.x_a + self.v_a * dt,
            x_b: self.x_b + self.v_b * dt,
            ..*self
        }
    }

    fn sample(&self) -> Sample {
        Sample::new()
            .with("t", self.t)
            .with("xA", self.x_a)
            .with("xRel", self.x_rel())
            .with("vA", self.v_a)
            .with("vRel", self.v_rel())
    }

    fn metrics() -> &'static [MetricSpec] {
        METRICS
    }

    fn time(&self) -> f64 {
        self.t
    }
}

impl Parameterized for ReferenceFrame {
    fn param_specs() -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Option<f64> {
        match key {
            "t" => Some(self.t),
            "xA" => Some(self.x_a),
            "vA" => Some(self.v_a),
            "xB" => Some(self.x_b),
            "vB" => Some(self.v_b),
            _ => None,
        }
    }

    fn with_param(&self, key: &str, value: f64) -> Option<Self> {
        let mut next = *self;
        match key {
            "t" => next.t = value,
            "xA" => next.x_a = value,
            "vA" => next.v_a = value,
            "xB" => next.x_b = value,
            "vB" => next.v_b = value,
            _ => return None,
        }
        Some(next)
    }
}

impl Staged for ReferenceFrame {}

impl Render for ReferenceFrame {
    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        let mut scene = Scene::new(size, display);
        let ink = display.theme.ink();
        let small = display.small_font();

        scene.push(Shape::rect(0.0, GROUND_TRACK_Y + 20.0, 2000.0, 6.0, Color::TRACK));
        scene.push(Shape::text(10.0, GROUND_TRACK_Y - 20.0, "Ground frame", small, ink));
        scene.push(Shape::group(
            Transform::translate(Self::screen_x(self.x_a), GROUND_TRACK_Y),
            Self::body("A", Color::BLUE, self.v_a, display),
        ));

        scene.push(Shape::rect(0.0, MOVING_TRACK_Y + 20.0, 2000.0, 6.0, MOVING_TRACK));
        scene.push(Shape::text(
            10.0,
            MOVING_TRACK_Y - 20.0,
            "Moving frame (origin at B)",
            small,
            ink,
        ));
        scene.push(Shape::group(
            Transform::translate(Self::screen_x(self.x_b), MOVING_TRACK_Y),
            Self::body("B", Color::GREEN, self.v_b, display),
        ));

        let lines = [
            ("Ground frame S".to_string(), Color::BLUE, display.font_size),
            (format!("  x_A = {:.2} m", self.x_a), ink, small),
            (format!("  v_A = {:.2} m/s", self.v_a), ink, small),
            ("Moving frame S' (origin at B)".to_string(), Color::GREEN, display.font_size),
            (format!("  x'_A = {:.2} m", self.x_rel()), ink, small),
            (format!("  v'_A = {:.2} m/s", self.v_rel()), ink, small),
            (format!("  v_B = {:.2} m/s", self.v_b), ink, small),
        ];
        let offsets = [0.0, 20.0, 35.0, 60.0, 80.0, 95.0, 110.0];
        let panel = lines
            .into_iter()
            .zip(offsets)
            .map(|((text, color, size), y)| Shape::text(0.0, y, text, size, color))
            .collect();
        scene.push(Shape::group(
            Transform::translate(Self::screen_x(10.0), 20.0),
            panel,
        ));
        scene
    }
}

impl Draggable for ReferenceFrame {
    fn handles(&self, _size: CanvasSize) -> Vec<DragHandle> {
        vec![
            DragHandle {
                id: "a",
                at: Point2::new(Self::screen_x(self.x_a), GROUND_TRACK_Y),
                radius: 12.0,
            },
            DragHandle {
                id: "b",
                at: Point2::new(Self::screen_x(self.x_b), MOVING_TRACK_Y),
                radius: 12.0,
            },
        ]
    }

    fn drag_to(&self, handle: &str, to: Point2<f64>, _size: CanvasSize) -> Option<Self> {
        let x = (to.x - LEFT_PADDING) / SCALE;
        match handle {
            "a" => Some(Self { x_a: x, ..*self }),
            "b" => Some(Self { x_b: x, ..*self }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_quantities() {
        let m = ReferenceFrame::defaults().advance(5.0);
        assert_eq!(m.x_a, 10.0);
        assert_eq!(m.x_b, 10.0);
        assert_eq!(m.x_rel(), 0.0);
        assert_eq!(m.v_rel(), 1.0);

        let s = m.sample();
        assert_eq!(s.keys().collect::<Vec<_>>(), vec!["t", "xA", "xRel", "vA", "vRel"]);
    }

    #[test]
    fn table_starts_with_time() {
        assert_eq!(ReferenceFrame::param_specs()[0].key, "t");
        assert!(ReferenceFrame::param_specs()[0].readonly);
    }

    #[test]
    fn drag_b_moves_frame_origin() {
        let m = ReferenceFrame::defaults();
        let dragged = m.drag_to("b", Point2::new(460.0, 0.0), CanvasSize::default()).unwrap();
        assert_eq!(dragged.x_b, 10.0);
        assert_eq!(dragged.x_rel(), -10.0);
    }
}
