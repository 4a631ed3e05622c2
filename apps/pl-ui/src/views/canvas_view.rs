use egui::{Color32, FontId, Pos2, Stroke, Vec2};
use pl_app::Experiment;
use pl_scene::{CanvasSize, Color, DisplaySettings, Point2, Shape, hit_handle};

/// Paints the experiment scene and routes pointer drags to its handles.
#[derive(Default)]
pub struct CanvasView {
    dragging: Option<&'static str>,
}

impl CanvasView {
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        experiment: &mut dyn Experiment,
        display: &DisplaySettings,
        height: f32,
    ) {
        let desired = Vec2::new(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(desired, egui::Sense::click_and_drag());
        let rect = response.rect;
        let origin = rect.min;
        let size = CanvasSize::new(rect.width() as f64, rect.height() as f64);
        let local = |p: Pos2| Point2::new((p.x - origin.x) as f64, (p.y - origin.y) as f64);

        if response.drag_started() {
            if let Some(p) = response.interact_pointer_pos() {
                let handles = experiment.handles(size);
                self.dragging = hit_handle(&handles, local(p)).map(|h| h.id);
            }
        }
        if let (Some(id), Some(p)) = (self.dragging, response.interact_pointer_pos()) {
            if response.dragged() && !experiment.drag(id, local(p), size) {
                self.dragging = None;
            }
        }
        if response.drag_stopped() {
            self.dragging = None;
        }

        if let Some(p) = response.hover_pos() {
            let handles = experiment.handles(size);
            if self.dragging.is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            } else if hit_handle(&handles, local(p)).is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }
        }

        let scene = experiment.render(size, display);
        painter.rect_filled(rect, 0.0, color32(scene.background));
        let painter = painter.with_clip_rect(rect);
        for shape in scene.flatten() {
            paint_shape(&painter, origin, &shape);
        }
    }
}

fn color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn screen(origin: Pos2, p: &Point2<f64>) -> Pos2 {
    origin + Vec2::new(p.x as f32, p.y as f32)
}

/// Paint one flattened primitive. Groups never reach here.
fn paint_shape(painter: &egui::Painter, origin: Pos2, shape: &Shape) {
    match shape {
        Shape::Line {
            points,
            color,
            width,
            dashed,
        } => {
            let pts: Vec<Pos2> = points.iter().map(|p| screen(origin, p)).collect();
            let stroke = Stroke::new(*width as f32, color32(*color));
            if *dashed {
                painter.extend(egui::Shape::dashed_line(&pts, stroke, 6.0, 4.0));
            } else {
                painter.add(egui::Shape::line(pts, stroke));
            }
        }
        Shape::Polygon {
            points,
            fill,
            stroke,
        } => {
            let pts: Vec<Pos2> = points.iter().map(|p| screen(origin, p)).collect();
            let stroke = stroke.map_or(Stroke::NONE, |c| Stroke::new(1.5, color32(c)));
            painter.add(egui::Shape::convex_polygon(pts, color32(*fill), stroke));
        }
        Shape::Rect {
            min,
            size,
            fill,
            corner_radius,
        } => {
            let rect = egui::Rect::from_min_size(
                screen(origin, min),
                Vec2::new(size.x as f32, size.y as f32),
            );
            painter.rect_filled(rect, *corner_radius as f32, color32(*fill));
        }
        Shape::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let stroke = stroke.map_or(Stroke::NONE, |c| Stroke::new(1.5, color32(c)));
            painter.circle(screen(origin, center), *radius as f32, color32(*fill), stroke);
        }
        Shape::Arrow {
            from,
            to,
            color,
            width,
            head,
        } => paint_arrow(
            painter,
            screen(origin, from),
            screen(origin, to),
            color32(*color),
            *width as f32,
            *head as f32,
        ),
        Shape::Text {
            at,
            text,
            size,
            color,
        } => {
            painter.text(
                screen(origin, at),
                egui::Align2::LEFT_TOP,
                text,
                FontId::proportional(*size as f32),
                color32(*color),
            );
        }
        Shape::Group { .. } => {}
    }
}

fn paint_arrow(painter: &egui::Painter, from: Pos2, to: Pos2, color: Color32, width: f32, head: f32) {
    let delta = to - from;
    let len = delta.length();
    if len <= f32::EPSILON {
        return;
    }
    let dir = delta / len;
    let head = head.min(len);
    let base = to - dir * head;
    let side = Vec2::new(-dir.y, dir.x) * head * 0.5;
    painter.line_segment([from, base], Stroke::new(width, color));
    painter.add(egui::Shape::convex_polygon(
        vec![to, base + side, base - side],
        color,
        Stroke::NONE,
    ));
}
