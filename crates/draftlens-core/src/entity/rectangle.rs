//! Rectangle preview.

use kurbo::{Point, Rect};

/// An axis-aligned rectangle dragged between two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectanglePreview {
    /// Anchored corner.
    pub start: Point,
    /// Current cursor corner.
    pub end: Point,
    /// Draw grips at the four corners.
    pub show_grips: bool,
    /// Draw width/height labels on the edges.
    pub show_distances: bool,
}

impl RectanglePreview {
    /// Create a new rectangle preview.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            show_grips: true,
            show_distances: true,
        }
    }

    /// Normalized world-space bounds.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// The four corners in drawing order (start corner first, then around
    /// the rectangle).
    pub fn corners(&self) -> [Point; 4] {
        [
            self.start,
            Point::new(self.end.x, self.start.y),
            self.end,
            Point::new(self.start.x, self.end.y),
        ]
    }

    /// World-space edge lengths (width, height).
    pub fn edge_lengths(&self) -> (f64, f64) {
        let b = self.bounds();
        (b.width(), b.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_order() {
        let rect = RectanglePreview::new(Point::ZERO, Point::new(4.0, 3.0));
        let [a, b, c, d] = rect.corners();
        assert_eq!(a, Point::ZERO);
        assert_eq!(b, Point::new(4.0, 0.0));
        assert_eq!(c, Point::new(4.0, 3.0));
        assert_eq!(d, Point::new(0.0, 3.0));
    }

    #[test]
    fn test_bounds_normalizes_dragged_corners() {
        // Dragging up-left still yields positive width/height.
        let rect = RectanglePreview::new(Point::new(4.0, 3.0), Point::ZERO);
        assert_eq!(rect.edge_lengths(), (4.0, 3.0));
    }
}
