//! Distance and angle labels.
//!
//! Labels measure in world space but anchor in screen space, so the text
//! stays legible at any zoom level: the value comes from the world
//! geometry, the position from the mapped screen points, and the font
//! size is fixed.

use crate::surface::Surface;
use draftlens_core::style::StyleColor;
use draftlens_core::viewport::{ViewTransform, Viewport};
use kurbo::{Point, Vec2};

/// Renders measurement labels next to preview geometry.
#[derive(Debug, Clone, Copy)]
pub struct DistanceLabelRenderer {
    /// Fixed screen-space font size in logical pixels.
    pub font_size: f64,
    /// Perpendicular offset from the measured segment in logical pixels.
    pub offset: f64,
}

impl Default for DistanceLabelRenderer {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            offset: 10.0,
        }
    }
}

impl DistanceLabelRenderer {
    /// Euclidean world-space distance between two points.
    pub fn world_distance(a: Point, b: Point) -> f64 {
        a.distance(b)
    }

    /// Display form of a distance value.
    pub fn format_distance(distance: f64) -> String {
        format!("{distance:.2}")
    }

    /// Display form of an angle in degrees.
    pub fn format_angle(degrees: f64) -> String {
        format!("{degrees:.1}\u{00B0}")
    }

    /// Draw the distance label for the world segment `a`..`b`.
    ///
    /// The text reads the world-space length; the anchor sits near the
    /// screen-space midpoint, nudged perpendicular to the segment towards
    /// the top of the screen.
    pub fn distance_label<S: Surface>(
        &self,
        surface: &mut S,
        a: Point,
        b: Point,
        transform: &ViewTransform,
        viewport: Viewport,
        color: StyleColor,
    ) {
        let distance = Self::world_distance(a, b);
        let sa = transform.world_to_screen(a, viewport);
        let sb = transform.world_to_screen(b, viewport);
        let anchor = sa.midpoint(sb) + self.offset_normal(sb - sa) * self.offset;

        surface.draw_text(&Self::format_distance(distance), anchor, self.font_size, color);
    }

    /// Draw an angle label at a precomputed screen anchor.
    pub fn angle_label<S: Surface>(
        &self,
        surface: &mut S,
        anchor: Point,
        degrees: f64,
        color: StyleColor,
    ) {
        surface.draw_text(&Self::format_angle(degrees), anchor, self.font_size, color);
    }

    /// Unit normal of a screen segment, oriented towards smaller screen y
    /// so the label sits above the segment. Degenerate segments anchor
    /// straight up.
    fn offset_normal(&self, dir: Vec2) -> Vec2 {
        let len = dir.hypot();
        if len < f64::EPSILON {
            return Vec2::new(0.0, -1.0);
        }
        let normal = Vec2::new(-dir.y, dir.x) / len;
        if normal.y > 0.0 { -normal } else { normal }
    }
}
