//! Preview entity definitions for in-progress drawing gestures.
//!
//! A preview entity is the uncommitted shape a drawing tool is currently
//! rubber-banding. It is built fresh per gesture by the drawing session,
//! handed to the preview renderer on every pointer move, and discarded on
//! commit or cancel. Entities are never persisted and carry no identity.

mod angle;
mod arc;
mod circle;
mod line;
mod point;
mod polyline;
mod rectangle;

pub use angle::AnglePreview;
pub use arc::{ArcConstruction, ArcGeometry, ArcPreview};
pub use circle::CirclePreview;
pub use line::LinePreview;
pub use point::PointPreview;
pub use polyline::PolylinePreview;
pub use rectangle::RectanglePreview;

use crate::style::DrawableClass;
use kurbo::Point;

/// Closed union over every previewable drawable.
///
/// All world-space geometry; per-entity display flags live on the variants.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewEntity {
    Line(LinePreview),
    Circle(CirclePreview),
    Polyline(PolylinePreview),
    Rectangle(RectanglePreview),
    Arc(ArcPreview),
    AngleMeasurement(AnglePreview),
    Point(PointPreview),
}

impl PreviewEntity {
    /// The drawable class this entity resolves its style under.
    pub fn class(&self) -> DrawableClass {
        match self {
            PreviewEntity::Line(_) => DrawableClass::Line,
            PreviewEntity::Circle(_) => DrawableClass::Circle,
            PreviewEntity::Polyline(_) => DrawableClass::Polyline,
            PreviewEntity::Rectangle(_) => DrawableClass::Rectangle,
            PreviewEntity::Arc(_) => DrawableClass::Arc,
            PreviewEntity::AngleMeasurement(_) => DrawableClass::AngleMeasurement,
            PreviewEntity::Point(_) => DrawableClass::Point,
        }
    }

    /// Whether this entity wants grips drawn at its key points.
    pub fn show_grips(&self) -> bool {
        match self {
            PreviewEntity::Line(e) => e.show_grips,
            PreviewEntity::Circle(e) => e.show_grips,
            PreviewEntity::Polyline(e) => e.show_grips,
            PreviewEntity::Rectangle(e) => e.show_grips,
            PreviewEntity::Arc(e) => e.show_grips,
            PreviewEntity::AngleMeasurement(e) => e.show_grips,
            PreviewEntity::Point(e) => e.show_grips,
        }
    }

    /// Key world-space points where grips are drawn.
    pub fn grip_points(&self) -> Vec<Point> {
        match self {
            PreviewEntity::Line(e) => vec![e.start, e.midpoint(), e.end],
            PreviewEntity::Circle(e) => {
                let mut pts = vec![e.center];
                pts.extend(e.quadrant_points());
                pts
            }
            PreviewEntity::Polyline(e) => e.points.clone(),
            PreviewEntity::Rectangle(e) => e.corners().to_vec(),
            PreviewEntity::Arc(e) => e.grip_points(),
            PreviewEntity::AngleMeasurement(e) => vec![e.vertex, e.first, e.second],
            PreviewEntity::Point(e) => vec![e.position],
        }
    }
}
