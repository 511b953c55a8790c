//! Polyline preview.

use kurbo::Point;

/// A polyline being picked point by point.
///
/// The last element of `points` is typically the live cursor position.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePreview {
    /// Picked vertices in order.
    pub points: Vec<Point>,
    /// Close the last vertex back to the first.
    pub closed: bool,
    /// Draw grips at every vertex.
    pub show_grips: bool,
    /// Draw per-segment length labels.
    pub show_distances: bool,
}

impl PolylinePreview {
    /// Create an open polyline preview.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
            show_grips: true,
            show_distances: true,
        }
    }

    /// Create a closed polyline preview.
    pub fn closed(points: Vec<Point>) -> Self {
        Self {
            closed: true,
            ..Self::new(points)
        }
    }

    /// Consecutive segments, including the closing segment when closed.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        let mut segs: Vec<(Point, Point)> =
            self.points.windows(2).map(|w| (w[0], w[1])).collect();
        if self.closed && self.points.len() > 2 {
            segs.push((*self.points.last().unwrap(), self.points[0]));
        }
        segs
    }

    /// Total world-space length over all segments.
    pub fn total_length(&self) -> f64 {
        self.segments().iter().map(|(a, b)| a.distance(*b)).sum()
    }
}
