//! Point preview.

use kurbo::Point;

/// A single point marker about to be placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPreview {
    /// World-space position.
    pub position: Point,
    /// Draw a grip on the marker.
    pub show_grips: bool,
}

impl PointPreview {
    /// Create a new point preview.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            show_grips: false,
        }
    }
}
