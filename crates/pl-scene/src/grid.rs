//! Background grid.

use crate::render::Theme;
use crate::scene::CanvasSize;
use crate::shape::{Shape, Transform};
use nalgebra::Point2;

pub const GRID_SPACING_PX: f64 = 50.0;

/// Grid lines every `spacing` pixels, measured from the bottom-left corner.
///
/// The lines through that corner are drawn heavier as axes; every second
/// vertical line carries a distance label at 10 px per meter.
pub fn grid(size: CanvasSize, spacing: f64, theme: Theme) -> Shape {
    let mut children = Vec::new();
    if spacing <= 0.0 {
        return Shape::group(Transform::identity(), children);
    }
    let style = |i: usize| {
        if i == 0 {
            (theme.axis_line(), 2.0)
        } else {
            (theme.grid_line(), 1.0)
        }
    };

    let columns = (size.width / spacing).floor() as usize;
    for i in 0..=columns {
        let x = i as f64 * spacing;
        let (color, width) = style(i);
        children.push(Shape::line(
            Point2::new(x, 0.0),
            Point2::new(x, size.height),
            color,
            width,
        ));
        if i % 2 == 0 && i != 0 {
            children.push(Shape::text(
                x + 2.0,
                size.height - 20.0,
                format!("{}m", x / 10.0),
                10.0,
                theme.axis_line(),
            ));
        }
    }

    let rows = (size.height / spacing).floor() as usize;
    for j in 0..=rows {
        let y = size.height - j as f64 * spacing;
        let (color, width) = style(j);
        children.push(Shape::line(
            Point2::new(0.0, y),
            Point2::new(size.width, y),
            color,
            width,
        ));
    }

    Shape::group(Transform::identity(), children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_and_label_counts() {
        let Shape::Group { children, .. } = grid(CanvasSize::new(200.0, 100.0), 50.0, Theme::Light)
        else {
            panic!("grid is a group");
        };
        let lines = children.iter().filter(|s| matches!(s, Shape::Line { .. })).count();
        let labels: Vec<_> = children
            .iter()
            .filter_map(|s| match s {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        // 5 vertical + 3 horizontal
        assert_eq!(lines, 8);
        assert_eq!(labels, vec!["10m", "20m"]);
    }

    #[test]
    fn zero_spacing_is_empty() {
        assert_eq!(
            grid(CanvasSize::default(), 0.0, Theme::Dark),
            Shape::group(Transform::identity(), vec![])
        );
    }
}
