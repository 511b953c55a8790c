//! Arc preview and arc geometry.
//!
//! The arc tools build their preview in stages: while points are still
//! being picked only construction lines are shown, and once enough points
//! exist the solved arc is drawn on top of them.

use kurbo::Point;
use std::f64::consts::TAU;

/// Treat a triangle with twice-signed-area below this as collinear.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// A solved circular arc in world space.
///
/// Angles are measured counterclockwise from the positive X axis (world
/// space is Y-up). Mapping to screen space negates both angles and flips
/// `counterclockwise`; see `ViewTransform::arc_to_screen`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Center of the carrying circle.
    pub center: Point,
    /// Radius of the carrying circle.
    pub radius: f64,
    /// Angle of the arc start point.
    pub start_angle: f64,
    /// Angle of the arc end point.
    pub end_angle: f64,
    /// Sweep direction from start to end.
    pub counterclockwise: bool,
}

impl ArcGeometry {
    /// Solve the arc through three picked points (circumcircle).
    ///
    /// Returns `None` when the points are collinear or coincident and no
    /// finite circle exists.
    pub fn from_three_points(a: Point, b: Point, c: Point) -> Option<Self> {
        let d = 2.0
            * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < COLLINEAR_EPSILON {
            return None;
        }

        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        let center = Point::new(
            (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
            (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
        );

        // Traversing start->end counterclockwise passes the middle point
        // exactly when the three points wind counterclockwise.
        let winding = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);

        Some(Self {
            center,
            radius: center.distance(a),
            start_angle: angle_of(center, a),
            end_angle: angle_of(center, c),
            counterclockwise: winding > 0.0,
        })
    }

    /// Build an arc from a center and picked start/end points. The radius
    /// comes from the start point; the end point only fixes the end angle.
    pub fn from_center_start_end(
        center: Point,
        start: Point,
        end: Point,
        counterclockwise: bool,
    ) -> Self {
        Self {
            center,
            radius: center.distance(start),
            start_angle: angle_of(center, start),
            end_angle: angle_of(center, end),
            counterclockwise,
        }
    }

    /// Signed sweep from start to end; positive is counterclockwise.
    pub fn sweep(&self) -> f64 {
        let d = (self.end_angle - self.start_angle).rem_euclid(TAU);
        if d == 0.0 {
            0.0
        } else if self.counterclockwise {
            d
        } else {
            d - TAU
        }
    }

    /// World-space start point on the carrying circle.
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    /// World-space end point on the carrying circle.
    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// Angle of `p` around `center`, counterclockwise from positive X.
fn angle_of(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Construction-line drawing mode for an in-progress arc gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcConstruction {
    /// No construction lines (arc fully determined).
    None,
    /// Sequential rubber-band through the points picked so far
    /// (three-point arc tool).
    Polyline(Vec<Point>),
    /// Rubber-band radii from the center out to each picked point
    /// (center/start/end arc tool).
    Radial {
        /// Picked center.
        center: Point,
        /// Picked rim points the radii run to (start, then end).
        spokes: Vec<Point>,
    },
}

/// An arc being picked, possibly not yet fully determined.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPreview {
    /// Solved arc geometry once enough points are picked.
    pub geometry: Option<ArcGeometry>,
    /// Construction lines for the current gesture stage.
    pub construction: ArcConstruction,
    /// Draw grips at the picked points.
    pub show_grips: bool,
    /// Draw the radius label.
    pub show_distance: bool,
}

impl ArcPreview {
    /// Preview for the three-point tool with the points picked so far.
    /// The arc solves once the third point is on the rubber band.
    pub fn three_point(points: Vec<Point>) -> Self {
        let geometry = match points.as_slice() {
            [a, b, c] => ArcGeometry::from_three_points(*a, *b, *c),
            _ => None,
        };
        Self {
            geometry,
            construction: ArcConstruction::Polyline(points),
            show_grips: true,
            show_distance: true,
        }
    }

    /// Preview for the center/start/end tool.
    pub fn radial(center: Point, spokes: Vec<Point>, counterclockwise: bool) -> Self {
        let geometry = match spokes.as_slice() {
            [start, end] => Some(ArcGeometry::from_center_start_end(
                center,
                *start,
                *end,
                counterclockwise,
            )),
            _ => None,
        };
        Self {
            geometry,
            construction: ArcConstruction::Radial { center, spokes },
            show_grips: true,
            show_distance: true,
        }
    }

    /// World points the grips sit on: every picked point of the gesture.
    pub fn grip_points(&self) -> Vec<Point> {
        match &self.construction {
            ArcConstruction::None => match &self.geometry {
                Some(g) => vec![g.start_point(), g.end_point(), g.center],
                None => Vec::new(),
            },
            ArcConstruction::Polyline(points) => points.clone(),
            ArcConstruction::Radial { center, spokes } => {
                let mut pts = vec![*center];
                pts.extend(spokes.iter().copied());
                pts
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_three_point_circumcircle() {
        // Points on the unit circle around (2, 1).
        let a = Point::new(3.0, 1.0);
        let b = Point::new(2.0, 2.0);
        let c = Point::new(1.0, 1.0);

        let arc = ArcGeometry::from_three_points(a, b, c).unwrap();
        assert!((arc.center.x - 2.0).abs() < 1e-10);
        assert!((arc.center.y - 1.0).abs() < 1e-10);
        assert!((arc.radius - 1.0).abs() < 1e-10);
        // a -> b -> c walks counterclockwise over the top of the circle.
        assert!(arc.counterclockwise);
        assert!((arc.sweep() - PI).abs() < 1e-10);
    }

    #[test]
    fn test_three_point_clockwise_winding() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 2.0);
        let c = Point::new(3.0, 1.0);

        let arc = ArcGeometry::from_three_points(a, b, c).unwrap();
        assert!(!arc.counterclockwise);
        assert!((arc.sweep() + PI).abs() < 1e-10);
    }

    #[test]
    fn test_collinear_points_have_no_arc() {
        let arc = ArcGeometry::from_three_points(
            Point::ZERO,
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        );
        assert!(arc.is_none());
    }

    #[test]
    fn test_center_start_end() {
        let arc = ArcGeometry::from_center_start_end(
            Point::ZERO,
            Point::new(2.0, 0.0),
            Point::new(0.0, 5.0),
            true,
        );
        assert!((arc.radius - 2.0).abs() < f64::EPSILON);
        assert!((arc.start_angle - 0.0).abs() < f64::EPSILON);
        assert!((arc.end_angle - FRAC_PI_2).abs() < f64::EPSILON);
        assert!((arc.sweep() - FRAC_PI_2).abs() < 1e-10);
        // The end point sits on the circle, not at the picked point.
        assert!((arc.end_point().distance(Point::new(0.0, 2.0))) < 1e-10);
    }

    #[test]
    fn test_three_point_preview_stages() {
        let two = ArcPreview::three_point(vec![Point::ZERO, Point::new(1.0, 1.0)]);
        assert!(two.geometry.is_none());
        assert_eq!(two.grip_points().len(), 2);

        let three = ArcPreview::three_point(vec![
            Point::new(3.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
        ]);
        assert!(three.geometry.is_some());
    }

    #[test]
    fn test_radial_preview_grips_start_at_center() {
        let preview = ArcPreview::radial(Point::ZERO, vec![Point::new(1.0, 0.0)], true);
        assert!(preview.geometry.is_none());
        assert_eq!(preview.grip_points()[0], Point::ZERO);
    }
}
