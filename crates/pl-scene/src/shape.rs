//! Scene primitives and transform groups.

use crate::color::Color;
use nalgebra::{Point2, Similarity2, Vector2};

/// Arrows shorter than this many pixels are not drawn.
pub const ARROW_MIN_LEN_PX: f64 = 0.1;

/// Group transform: scale, then rotate, then translate.
///
/// Rotation is in degrees, clockwise on screen (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector2<f64>,
    pub rotation_deg: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vector2::zeros(),
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translation: Vector2::new(x, y),
            ..Self::identity()
        }
    }

    pub fn rotated(self, deg: f64) -> Self {
        Self {
            rotation_deg: deg,
            ..self
        }
    }

    pub fn scaled(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub fn to_similarity(&self) -> Similarity2<f64> {
        Similarity2::new(self.translation, self.rotation_deg.to_radians(), self.scale)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Open polyline.
    Line {
        points: Vec<Point2<f64>>,
        color: Color,
        width: f64,
        dashed: bool,
    },
    /// Closed filled polygon.
    Polygon {
        points: Vec<Point2<f64>>,
        fill: Color,
        stroke: Option<Color>,
    },
    /// Axis-aligned rectangle from its top-left corner.
    Rect {
        min: Point2<f64>,
        size: Vector2<f64>,
        fill: Color,
        corner_radius: f64,
    },
    Circle {
        center: Point2<f64>,
        radius: f64,
        fill: Color,
        stroke: Option<Color>,
    },
    /// Straight arrow with a filled head at `to`.
    Arrow {
        from: Point2<f64>,
        to: Point2<f64>,
        color: Color,
        width: f64,
        head: f64,
    },
    /// Text anchored at its top-left corner. Never rotated.
    Text {
        at: Point2<f64>,
        text: String,
        size: f64,
        color: Color,
    },
    Group {
        transform: Transform,
        children: Vec<Shape>,
    },
}

impl Shape {
    pub fn line(from: Point2<f64>, to: Point2<f64>, color: Color, width: f64) -> Self {
        Shape::Line {
            points: vec![from, to],
            color,
            width,
            dashed: false,
        }
    }

    pub fn dashed(from: Point2<f64>, to: Point2<f64>, color: Color, width: f64) -> Self {
        Shape::Line {
            points: vec![from, to],
            color,
            width,
            dashed: true,
        }
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64, fill: Color) -> Self {
        Shape::Rect {
            min: Point2::new(x, y),
            size: Vector2::new(w, h),
            fill,
            corner_radius: 0.0,
        }
    }

    pub fn circle(x: f64, y: f64, radius: f64, fill: Color) -> Self {
        Shape::Circle {
            center: Point2::new(x, y),
            radius,
            fill,
            stroke: None,
        }
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>, size: f64, color: Color) -> Self {
        Shape::Text {
            at: Point2::new(x, y),
            text: text.into(),
            size,
            color,
        }
    }

    pub fn group(transform: Transform, children: Vec<Shape>) -> Self {
        Shape::Group {
            transform,
            children,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group { .. })
    }

    /// Append this shape's primitives to `out`, resolved through `xf`.
    pub(crate) fn flatten_into(&self, xf: &Similarity2<f64>, out: &mut Vec<Shape>) {
        let s = xf.scaling();
        let map = |p: &Point2<f64>| xf.transform_point(p);
        match self {
            Shape::Group {
                transform,
                children,
            } => {
                let inner = xf * transform.to_similarity();
                for child in children {
                    child.flatten_into(&inner, out);
                }
            }
            Shape::Line {
                points,
                color,
                width,
                dashed,
            } => out.push(Shape::Line {
                points: points.iter().map(map).collect(),
                color: *color,
                width: width * s,
                dashed: *dashed,
            }),
            Shape::Polygon {
                points,
                fill,
                stroke,
            } => out.push(Shape::Polygon {
                points: points.iter().map(map).collect(),
                fill: *fill,
                stroke: *stroke,
            }),
            Shape::Rect {
                min,
                size,
                fill,
                corner_radius,
            } => {
                if xf.isometry.rotation.angle().abs() < 1e-12 {
                    out.push(Shape::Rect {
                        min: map(min),
                        size: size * s,
                        fill: *fill,
                        corner_radius: corner_radius * s,
                    });
                } else {
                    // A rotated rectangle is no longer axis aligned.
                    let corners = [
                        *min,
                        Point2::new(min.x + size.x, min.y),
                        Point2::new(min.x + size.x, min.y + size.y),
                        Point2::new(min.x, min.y + size.y),
                    ];
                    out.push(Shape::Polygon {
                        points: corners.iter().map(map).collect(),
                        fill: *fill,
                        stroke: None,
                    });
                }
            }
            Shape::Circle {
                center,
                radius,
                fill,
                stroke,
            } => out.push(Shape::Circle {
                center: map(center),
                radius: radius * s,
                fill: *fill,
                stroke: *stroke,
            }),
            Shape::Arrow {
                from,
                to,
                color,
                width,
                head,
            } => out.push(Shape::Arrow {
                from: map(from),
                to: map(to),
                color: *color,
                width: width * s,
                head: head * s,
            }),
            Shape::Text {
                at,
                text,
                size,
                color,
            } => out.push(Shape::Text {
                at: map(at),
                text: text.clone(),
                size: size * s,
                color: *color,
            }),
        }
    }
}

/// A labelled vector drawn along its own rotated axis.
///
/// `length` is in pixels and may be negative (points backwards). The label
/// sits just past the tip, offset vertically by `label_offset_y`.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorArrow {
    pub at: Point2<f64>,
    pub length: f64,
    pub angle_deg: f64,
    pub color: Color,
    pub label: Option<String>,
    pub label_offset_y: f64,
    pub label_size: f64,
}

impl VectorArrow {
    pub fn new(at: Point2<f64>, length: f64, angle_deg: f64, color: Color) -> Self {
        Self {
            at,
            length,
            angle_deg,
            color,
            label: None,
            label_offset_y: -20.0,
            label_size: 14.0,
        }
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    pub fn label_offset(mut self, dy: f64) -> Self {
        self.label_offset_y = dy;
        self
    }

    pub fn label_size(mut self, size: f64) -> Self {
        self.label_size = size;
        self
    }

    /// `None` when the arrow is too short to draw.
    pub fn into_shape(self) -> Option<Shape> {
        if self.length.abs() < ARROW_MIN_LEN_PX {
            return None;
        }
        let mut children = vec![Shape::Arrow {
            from: Point2::origin(),
            to: Point2::new(self.length, 0.0),
            color: self.color,
            width: 4.0,
            head: 10.0,
        }];
        if let Some(label) = self.label {
            let dx = if self.length >= 0.0 { 10.0 } else { -10.0 };
            children.push(Shape::Text {
                at: Point2::new(self.length + dx, self.label_offset_y),
                text: label,
                size: self.label_size,
                color: self.color,
            });
        }
        Some(Shape::group(
            Transform::translate(self.at.x, self.at.y).rotated(self.angle_deg),
            children,
        ))
    }
}
