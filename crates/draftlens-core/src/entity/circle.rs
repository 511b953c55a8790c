//! Circle preview.

use kurbo::Point;

/// A circle being rubber-banded from its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePreview {
    /// Center point.
    pub center: Point,
    /// World-space radius.
    pub radius: f64,
    /// The picked cursor point defining the radius, if the gesture is
    /// radius-driven. When present, a construction radius line is drawn and
    /// the radius label anchors on it.
    pub radius_anchor: Option<Point>,
    /// Draw grips at the center and quadrant points.
    pub show_grips: bool,
    /// Draw the radius label.
    pub show_distance: bool,
}

impl CirclePreview {
    /// Create a circle preview from center and radius.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            radius_anchor: None,
            show_grips: true,
            show_distance: true,
        }
    }

    /// Create a circle preview from center and a picked rim point.
    pub fn from_center_and_point(center: Point, rim: Point) -> Self {
        Self {
            center,
            radius: center.distance(rim),
            radius_anchor: Some(rim),
            show_grips: true,
            show_distance: true,
        }
    }

    /// The four axis-aligned points on the rim (east, north, west, south).
    pub fn quadrant_points(&self) -> [Point; 4] {
        let c = self.center;
        let r = self.radius;
        [
            Point::new(c.x + r, c.y),
            Point::new(c.x, c.y + r),
            Point::new(c.x - r, c.y),
            Point::new(c.x, c.y - r),
        ]
    }
}
