//! Viewport module for world/screen coordinate mapping.

use crate::entity::ArcGeometry;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Default zoom level: one world unit per logical pixel.
pub const BASE_SCALE: f64 = 1.0;

/// View transform for the drawing canvas.
///
/// `origin` is the world-space point anchored to the viewport: it lands on
/// the horizontal center of the viewport, and world `y = origin.y` lands on
/// the bottom edge. World space is Y-up; screen space is Y-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// World-space anchor point.
    pub origin: Point,
    /// World-to-screen scale factor (logical pixels per world unit).
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: BASE_SCALE,
        }
    }
}

/// Logical (CSS pixel) size of the render surface.
///
/// Supplied per call and never mutated by the renderer. Device-pixel-ratio
/// scaling is applied once at the surface level, so all mapping here stays
/// resolution-independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Logical size as a kurbo `Size`.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl ViewTransform {
    /// Create a new transform.
    pub fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Convert a world point to screen coordinates.
    ///
    /// Screen x scales and offsets by the transform; screen y additionally
    /// inverts because world space is Y-up and screen space is Y-down.
    pub fn world_to_screen(&self, world: Point, viewport: Viewport) -> Point {
        Point::new(
            (world.x - self.origin.x) * self.scale + viewport.width / 2.0,
            viewport.height - (world.y - self.origin.y) * self.scale,
        )
    }

    /// Convert a screen point back to world coordinates.
    pub fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point {
        Point::new(
            (screen.x - viewport.width / 2.0) / self.scale + self.origin.x,
            (viewport.height - screen.y) / self.scale + self.origin.y,
        )
    }

    /// Convert a world-space length to screen pixels.
    pub fn length_to_screen(&self, length: f64) -> f64 {
        length * self.scale
    }

    /// Convert a screen-space length to world units.
    pub fn length_to_world(&self, length: f64) -> f64 {
        length / self.scale
    }

    /// Map a world-space angle (measured counterclockwise, Y-up) to screen
    /// space. The Y-inversion negates every angle.
    pub fn angle_to_screen(&self, angle: f64) -> f64 {
        -angle
    }

    /// Map arc geometry to screen space.
    ///
    /// Second-order consequence of the Y-inversion: both start and end
    /// angles negate and the sweep direction flips, otherwise the rendered
    /// arc bows the wrong way.
    pub fn arc_to_screen(&self, arc: &ArcGeometry, viewport: Viewport) -> ArcGeometry {
        ArcGeometry {
            center: self.world_to_screen(arc.center, viewport),
            radius: self.length_to_screen(arc.radius),
            start_angle: self.angle_to_screen(arc.start_angle),
            end_angle: self.angle_to_screen(arc.end_angle),
            counterclockwise: !arc.counterclockwise,
        }
    }

    /// Compute a transform that fits the given world bounds into the
    /// viewport with the requested padding (logical pixels).
    pub fn fit(bounds: Rect, viewport: Viewport, padding: f64) -> Self {
        if bounds.is_zero_area() {
            return Self::default();
        }

        let padded = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        let scale = scale_x.min(scale_y);

        // The origin sits at the bottom-center of the viewport, so anchor
        // the horizontal center of the bounds and drop the vertical anchor
        // half a viewport below the bounds center.
        let center = bounds.center();
        let origin = Point::new(center.x, center.y - viewport.height / (2.0 * scale));

        Self { origin, scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_bottom_center() {
        let t = ViewTransform::default();
        let v = Viewport::new(200.0, 200.0);

        let screen = t.world_to_screen(Point::ZERO, v);
        assert!((screen.x - 100.0).abs() < f64::EPSILON);
        assert!((screen.y - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_horizontal_line_maps_to_bottom_edge() {
        // World (0,0)-(100,0) with scale 1 and origin (0,0) in a 200x200
        // viewport lands on (100,200)-(200,200).
        let t = ViewTransform::default();
        let v = Viewport::new(200.0, 200.0);

        let start = t.world_to_screen(Point::new(0.0, 0.0), v);
        let end = t.world_to_screen(Point::new(100.0, 0.0), v);
        assert_eq!(start, Point::new(100.0, 200.0));
        assert_eq!(end, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_y_axis_inverts() {
        let t = ViewTransform::default();
        let v = Viewport::new(200.0, 200.0);

        // Positive world y goes up, which means a smaller screen y.
        let up = t.world_to_screen(Point::new(0.0, 50.0), v);
        assert!((up.y - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let t = ViewTransform::new(Point::new(30.0, -20.0), 1.5);
        let v = Viewport::new(800.0, 600.0);

        let original = Point::new(123.0, 456.0);
        let screen = t.world_to_screen(original, v);
        let back = t.screen_to_world(screen, v);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_length_scaling() {
        let t = ViewTransform::new(Point::ZERO, 2.5);
        assert!((t.length_to_screen(4.0) - 10.0).abs() < f64::EPSILON);
        assert!((t.length_to_world(10.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_arc_mapping_negates_angles_and_flips_sweep() {
        let t = ViewTransform::new(Point::ZERO, 2.0);
        let v = Viewport::new(400.0, 400.0);
        let arc = ArcGeometry {
            center: Point::new(10.0, 10.0),
            radius: 5.0,
            start_angle: 0.3,
            end_angle: 1.2,
            counterclockwise: true,
        };

        let screen = t.arc_to_screen(&arc, v);
        assert!((screen.start_angle + 0.3).abs() < f64::EPSILON);
        assert!((screen.end_angle + 1.2).abs() < f64::EPSILON);
        assert!(!screen.counterclockwise);
        assert!((screen.radius - 10.0).abs() < f64::EPSILON);
        assert_eq!(screen.center, t.world_to_screen(arc.center, v));
    }

    #[test]
    fn test_fit_contains_bounds() {
        let bounds = Rect::new(-50.0, -50.0, 50.0, 50.0);
        let v = Viewport::new(400.0, 200.0);
        let t = ViewTransform::fit(bounds, v, 20.0);

        // Limiting axis is vertical: 160 logical pixels for 100 world units.
        assert!((t.scale - 1.6).abs() < 1e-10);

        // Every corner of the bounds must land inside the viewport.
        for corner in [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x1, bounds.y1),
            Point::new(bounds.x0, bounds.y1),
        ] {
            let s = t.world_to_screen(corner, v);
            assert!(s.x >= 0.0 && s.x <= v.width, "x out of viewport: {s:?}");
            assert!(s.y >= 0.0 && s.y <= v.height, "y out of viewport: {s:?}");
        }
    }

    #[test]
    fn test_fit_degenerate_bounds_falls_back_to_default() {
        let t = ViewTransform::fit(Rect::ZERO, Viewport::new(100.0, 100.0), 10.0);
        assert_eq!(t, ViewTransform::default());
    }
}
