//! Line preview.

use kurbo::Point;

/// A single line segment being rubber-banded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePreview {
    /// Anchored start point.
    pub start: Point,
    /// Current cursor end point.
    pub end: Point,
    /// Draw grips at start, midpoint and end.
    pub show_grips: bool,
    /// Draw the segment-length label.
    pub show_distance: bool,
}

impl LinePreview {
    /// Create a new line preview with grips and label enabled.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            show_grips: true,
            show_distance: true,
        }
    }

    /// World-space length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// World-space midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }
}
