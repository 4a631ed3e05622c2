//! Scenery shared by the track experiments.

use pl_scene::{Color, DisplaySettings, Shape, Transform};

/// Long horizontal track whose top edge sits at `y`.
pub(crate) fn track(y: f64, height: f64, color: Color) -> Shape {
    Shape::rect(0.0, y, 2000.0, height, color)
}

/// Small tick on the track marking where the motion started.
pub(crate) fn start_marker(x: f64, y: f64, display: &DisplaySettings) -> Shape {
    Shape::group(
        Transform::translate(x, y),
        vec![
            Shape::rect(0.0, 0.0, 2.0, 10.0, Color::GROUND),
            Shape::text(0.0, 15.0, "start", 10.0, display.theme.axis_line()),
        ],
    )
}

/// Car body with two wheels, centred on the origin.
pub(crate) fn cart(body: Color, wheels: Color) -> Vec<Shape> {
    vec![
        Shape::Rect {
            min: pl_scene::Point2::new(-25.0, -20.0),
            size: pl_scene::Vector2::new(50.0, 40.0),
            fill: body,
            corner_radius: 5.0,
        },
        Shape::circle(-15.0, 20.0, 8.0, wheels),
        Shape::circle(15.0, 20.0, 8.0, wheels),
    ]
}
