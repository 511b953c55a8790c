//! Angle-measurement preview.

use kurbo::{Point, Vec2};

/// An angle measurement between two arms meeting at a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnglePreview {
    /// Apex of the measured angle.
    pub vertex: Point,
    /// End of the first arm.
    pub first: Point,
    /// End of the second arm (typically the live cursor).
    pub second: Point,
    /// Draw grips at the vertex and arm ends.
    pub show_grips: bool,
    /// Draw the degree label.
    pub show_label: bool,
}

impl AnglePreview {
    /// Create a new angle measurement preview.
    pub fn new(vertex: Point, first: Point, second: Point) -> Self {
        Self {
            vertex,
            first,
            second,
            show_grips: true,
            show_label: true,
        }
    }

    /// Included angle between the arms in radians, 0..=PI.
    ///
    /// A measurement tool reports the undirected angle; degenerate arms
    /// (zero length) measure as zero.
    pub fn angle_radians(&self) -> f64 {
        let a = self.first - self.vertex;
        let b = self.second - self.vertex;
        if a.hypot() < f64::EPSILON || b.hypot() < f64::EPSILON {
            return 0.0;
        }
        let cos = (a.dot(b) / (a.hypot() * b.hypot())).clamp(-1.0, 1.0);
        cos.acos()
    }

    /// Included angle in degrees.
    pub fn angle_degrees(&self) -> f64 {
        self.angle_radians().to_degrees()
    }

    /// Unit vector along the bisector of the two arms, used to anchor the
    /// degree label. Falls back to the first arm direction when the arms
    /// oppose each other.
    pub fn bisector(&self) -> Vec2 {
        let a = normalize(self.first - self.vertex);
        let b = normalize(self.second - self.vertex);
        let sum = a + b;
        if sum.hypot() < 1e-9 {
            // Arms opposing: any perpendicular works for anchoring.
            Vec2::new(-a.y, a.x)
        } else {
            normalize(sum)
        }
    }

    /// World-space start/end angles of the arms, counterclockwise from
    /// positive X. Used to draw the indicator arc between the arms.
    pub fn arm_angles(&self) -> (f64, f64) {
        let a = self.first - self.vertex;
        let b = self.second - self.vertex;
        (a.y.atan2(a.x), b.y.atan2(b.x))
    }
}

fn normalize(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len < f64::EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}
