//! egui-painter surface backend.
//!
//! Implements the drawing-surface abstraction on top of an `egui::Painter`
//! clipped to the canvas rect. Bezier paths are flattened to polylines for
//! egui's tessellator; device-pixel-ratio handling stays at the egui
//! context level, so all coordinates here are logical points.

use crate::surface::{PhysicalSize, StrokePaint, Surface};
use draftlens_core::style::StyleColor;
use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Stroke};
use kurbo::{BezPath, PathEl, Point};

/// Flattening tolerance handed to kurbo when converting curves for the
/// egui tessellator.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Surface over an `egui::Painter`.
pub struct EguiSurface {
    painter: Painter,
    /// Canvas rect in the egui coordinate space; drawing commands arrive
    /// in canvas-local coordinates and are offset by its origin.
    canvas_rect: Rect,
    physical: Option<PhysicalSize>,
}

impl EguiSurface {
    /// Wrap a painter, clipping all drawing to the canvas rect.
    pub fn new(painter: Painter, canvas_rect: Rect) -> Self {
        Self {
            painter: painter.with_clip_rect(canvas_rect),
            canvas_rect,
            physical: None,
        }
    }

    /// Last backing size the renderer requested, if any.
    pub fn physical_size(&self) -> Option<PhysicalSize> {
        self.physical
    }

    fn to_pos(&self, p: Point) -> Pos2 {
        Pos2::new(
            self.canvas_rect.min.x + p.x as f32,
            self.canvas_rect.min.y + p.y as f32,
        )
    }

    /// Flatten a path into polylines in egui coordinates, one per subpath.
    fn polylines(&self, path: &BezPath) -> Vec<Vec<Pos2>> {
        let mut lines: Vec<Vec<Pos2>> = Vec::new();
        let mut start: Option<Pos2> = None;

        kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => {
                let pos = self.to_pos(p);
                start = Some(pos);
                lines.push(vec![pos]);
            }
            PathEl::LineTo(p) => {
                if let Some(line) = lines.last_mut() {
                    line.push(self.to_pos(p));
                }
            }
            PathEl::ClosePath => {
                if let (Some(line), Some(first)) = (lines.last_mut(), start) {
                    line.push(first);
                }
            }
            // flatten only emits MoveTo/LineTo/ClosePath.
            _ => {}
        });

        lines.retain(|line| line.len() >= 2);
        lines
    }
}

fn to_color32(color: StyleColor) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

impl Surface for EguiSurface {
    fn resize(&mut self, size: PhysicalSize) {
        // egui owns the backing buffer; only remember the requested size.
        self.physical = Some(size);
        log::trace!("egui surface resized to {}x{}", size.width, size.height);
    }

    fn clear(&mut self, color: StyleColor) {
        if !color.is_transparent() {
            self.painter
                .rect_filled(self.canvas_rect, CornerRadius::ZERO, to_color32(color));
        }
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &StrokePaint) {
        let stroke = Stroke::new(paint.width as f32, to_color32(paint.color));
        for line in self.polylines(path) {
            match &paint.dash {
                Some(dash) => {
                    let on = dash.first().copied().unwrap_or(4.0) as f32;
                    let off = dash.get(1).copied().unwrap_or(f64::from(on)) as f32;
                    self.painter
                        .extend(egui::Shape::dashed_line(&line, stroke, on, off));
                }
                None => {
                    self.painter.add(egui::Shape::line(line, stroke));
                }
            }
        }
    }

    fn fill_path(&mut self, path: &BezPath, color: StyleColor) {
        // Preview fills are circles, rectangles and grip squares, all
        // convex, which is what egui's tessellator expects here.
        for line in self.polylines(path) {
            self.painter.add(egui::Shape::convex_polygon(
                line,
                to_color32(color),
                Stroke::NONE,
            ));
        }
    }

    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: StyleColor) {
        self.painter.text(
            self.to_pos(position),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(font_size as f32),
            to_color32(color),
        );
    }
}
