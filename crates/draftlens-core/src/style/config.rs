//! Per-class style configurations and their override deltas.
//!
//! Each drawable class has a *total* configuration struct (the General
//! layer; `Default` is the factory preset) and a delta struct holding only
//! the fields an override changes. `StyleConfig::apply` shallow-merges a
//! delta over a base with delta fields winning; `StyleConfig::diff`
//! produces the minimal delta between two totals.

use super::{LinePattern, MarkerShape, StyleColor};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Default stroke width for drawable outlines.
const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// A total style configuration for one drawable class.
pub trait StyleConfig:
    Copy + PartialEq + Debug + Default + Serialize + DeserializeOwned + 'static
{
    /// Partial configuration: only the fields that differ from General.
    type Delta: StyleDelta;

    /// Known settings-blob keys, used to drop unknown keys on load.
    const FIELDS: &'static [&'static str];

    /// Shallow-merge `delta` over `self`; delta fields win.
    fn apply(&self, delta: &Self::Delta) -> Self;

    /// Minimal delta of the fields where `other` differs from `self`.
    fn diff(&self, other: &Self) -> Self::Delta;
}

/// A partial style configuration.
pub trait StyleDelta:
    Copy + PartialEq + Debug + Default + Serialize + DeserializeOwned + 'static
{
    /// True when no field is set.
    fn is_empty(&self) -> bool;
}

/// Style of line drawables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: StyleColor,
    pub width: f64,
    pub pattern: LinePattern,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: StyleColor::WHITE,
            width: DEFAULT_STROKE_WIDTH,
            pattern: LinePattern::Solid,
        }
    }
}

/// Delta over [`LineStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineStyleDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LinePattern>,
}

impl StyleConfig for LineStyle {
    type Delta = LineStyleDelta;

    const FIELDS: &'static [&'static str] = &["color", "width", "pattern"];

    fn apply(&self, delta: &Self::Delta) -> Self {
        Self {
            color: delta.color.unwrap_or(self.color),
            width: delta.width.unwrap_or(self.width),
            pattern: delta.pattern.unwrap_or(self.pattern),
        }
    }

    fn diff(&self, other: &Self) -> Self::Delta {
        LineStyleDelta {
            color: (other.color != self.color).then_some(other.color),
            width: (other.width != self.width).then_some(other.width),
            pattern: (other.pattern != self.pattern).then_some(other.pattern),
        }
    }
}

impl StyleDelta for LineStyleDelta {
    fn is_empty(&self) -> bool {
        self.color.is_none() && self.width.is_none() && self.pattern.is_none()
    }
}

/// Style of circle drawables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub color: StyleColor,
    pub width: f64,
    pub pattern: LinePattern,
    /// Interior fill; fully transparent means no fill.
    pub fill: StyleColor,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            color: StyleColor::WHITE,
            width: DEFAULT_STROKE_WIDTH,
            pattern: LinePattern::Solid,
            fill: StyleColor::TRANSPARENT,
        }
    }
}

/// Delta over [`CircleStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CircleStyleDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LinePattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<StyleColor>,
}

impl StyleConfig for CircleStyle {
    type Delta = CircleStyleDelta;

    const FIELDS: &'static [&'static str] = &["color", "width", "pattern", "fill"];

    fn apply(&self, delta: &Self::Delta) -> Self {
        Self {
            color: delta.color.unwrap_or(self.color),
            width: delta.width.unwrap_or(self.width),
            pattern: delta.pattern.unwrap_or(self.pattern),
            fill: delta.fill.unwrap_or(self.fill),
        }
    }

    fn diff(&self, other: &Self) -> Self::Delta {
        CircleStyleDelta {
            color: (other.color != self.color).then_some(other.color),
            width: (other.width != self.width).then_some(other.width),
            pattern: (other.pattern != self.pattern).then_some(other.pattern),
            fill: (other.fill != self.fill).then_some(other.fill),
        }
    }
}

impl StyleDelta for CircleStyleDelta {
    fn is_empty(&self) -> bool {
        self.color.is_none() && self.width.is_none() && self.pattern.is_none()
            && self.fill.is_none()
    }
}

/// Style of polyline drawables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    pub color: StyleColor,
    pub width: f64,
    pub pattern: LinePattern,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            color: StyleColor::WHITE,
            width: DEFAULT_STROKE_WIDTH,
            pattern: LinePattern::Solid,
        }
    }
}

/// Delta over [`PolylineStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolylineStyleDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LinePattern>,
}

impl StyleConfig for PolylineStyle {
    type Delta = PolylineStyleDelta;

    const FIELDS: &'static [&'static str] = &["color", "width", "pattern"];

    fn apply(&self, delta: &Self::Delta) -> Self {
        Self {
            color: delta.color.unwrap_or(self.color),
            width: delta.width.unwrap_or(self.width),
            pattern: delta.pattern.unwrap_or(self.pattern),
        }
    }

    fn diff(&self, other: &Self) -> Self::Delta {
        PolylineStyleDelta {
            color: (other.color != self.color).then_some(other.color),
            width: (other.width != self.width).then_some(other.width),
            pattern: (other.pattern != self.pattern).then_some(other.pattern),
        }
    }
}

impl StyleDelta for PolylineStyleDelta {
    fn is_empty(&self) -> bool {
        self.color.is_none() && self.width.is_none() && self.pattern.is_none()
    }
}

/// Style of rectangle drawables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleStyle {
    pub color: StyleColor,
    pub width: f64,
    pub pattern: LinePattern,
    /// Interior fill; fully transparent means no fill.
    pub fill: StyleColor,
}

impl Default for RectangleStyle {
    fn default() -> Self {
        Self {
            color: StyleColor::WHITE,
            width: DEFAULT_STROKE_WIDTH,
            pattern: LinePattern::Solid,
            fill: StyleColor::TRANSPARENT,
        }
    }
}

/// Delta over [`RectangleStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectangleStyleDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LinePattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<StyleColor>,
}

impl StyleConfig for RectangleStyle {
    type Delta = RectangleStyleDelta;

    const FIELDS: &'static [&'static str] = &["color", "width", "pattern", "fill"];

    fn apply(&self, delta: &Self::Delta) -> Self {
        Self {
            color: delta.color.unwrap_or(self.color),
            width: delta.width.unwrap_or(self.width),
            pattern: delta.pattern.unwrap_or(self.pattern),
            fill: delta.fill.unwrap_or(self.fill),
        }
    }

    fn diff(&self, other: &Self) -> Self::Delta {
        RectangleStyleDelta {
            color: (other.color != self.color).then_some(other.color),
            width: (other.width != self.width).then_some(other.width),
            pattern: (other.pattern != self.pattern).then_some(other.pattern),
            fill: (other.fill != self.fill).then_some(other.fill),
        }
    }
}

impl StyleDelta for RectangleStyleDelta {
    fn is_empty(&self) -> bool {
        self.color.is_none() && self.width.is_none() && self.pattern.is_none()
            && self.fill.is_none()
    }
}

/// Style of arc drawables, including the rubber-band construction lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcStyle {
    pub color: StyleColor,
    pub width: f64,
    pub pattern: LinePattern,
    /// Stroke color of the construction lines.
    pub construction_color: StyleColor,
    /// Dash pattern of the construction lines.
    pub construction_pattern: LinePattern,
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self {
            color: StyleColor::WHITE,
            width: DEFAULT_STROKE_WIDTH,
            pattern: LinePattern::Solid,
            construction_color: StyleColor::rgb(0x9E, 0x9E, 0x9E),
            construction_pattern: LinePattern::Dashed,
        }
    }
}

/// Delta over [`ArcStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcStyleDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LinePattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_pattern: Option<LinePattern>,
}

impl StyleConfig for ArcStyle {
    type Delta = ArcStyleDelta;

    const FIELDS: &'static [&'static str] = &[
        "color",
        "width",
        "pattern",
        "construction_color",
        "construction_pattern",
    ];

    fn apply(&self, delta: &Self::Delta) -> Self {
        Self {
            color: delta.color.unwrap_or(self.color),
            width: delta.width.unwrap_or(self.width),
            pattern: delta.pattern.unwrap_or(self.pattern),
            construction_color: delta.construction_color.unwrap_or(self.construction_color),
            construction_pattern: delta
                .construction_pattern
                .unwrap_or(self.construction_pattern),
        }
    }

    fn diff(&self, other: &Self) -> Self::Delta {
        ArcStyleDelta {
            color: (other.color != self.color).then_some(other.color),
            width: (other.width != self.width).then_some(other.width),
            pattern: (other.pattern != self.pattern).then_some(other.pattern),
            construction_color: (other.construction_color != self.construction_color)
                .then_some(other.construction_color),
            construction_pattern: (other.construction_pattern != self.construction_pattern)
                .then_some(other.construction_pattern),
        }
    }
}

impl StyleDelta for ArcStyleDelta {
    fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.width.is_none()
            && self.pattern.is_none()
            && self.construction_color.is_none()
            && self.construction_pattern.is_none()
    }
}

/// Style of angle-measurement drawables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleStyle {
    pub color: StyleColor,
    pub width: f64,
    /// Screen-space radius of the angle indicator arc.
    pub arc_radius: f64,
    pub label_color: StyleColor,
}

impl Default for AngleStyle {
    fn default() -> Self {
        Self {
            color: StyleColor::WHITE,
            width: 1.5,
            arc_radius: 24.0,
            label_color: StyleColor::rgb(0xFF, 0xD5, 0x4F),
        }
    }
}

/// Delta over [`AngleStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngleStyleDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<StyleColor>,
}

impl StyleConfig for AngleStyle {
    type Delta = AngleStyleDelta;

    const FIELDS: &'static [&'static str] = &["color", "width", "arc_radius", "label_color"];

    fn apply(&self, delta: &Self::Delta) -> Self {
        Self {
            color: delta.color.unwrap_or(self.color),
            width: delta.width.unwrap_or(self.width),
            arc_radius: delta.arc_radius.unwrap_or(self.arc_radius),
            label_color: delta.label_color.unwrap_or(self.label_color),
        }
    }

    fn diff(&self, other: &Self) -> Self::Delta {
        AngleStyleDelta {
            color: (other.color != self.color).then_some(other.color),
            width: (other.width != self.width).then_some(other.width),
            arc_radius: (other.arc_radius != self.arc_radius).then_some(other.arc_radius),
            label_color: (other.label_color != self.label_color).then_some(other.label_color),
        }
    }
}

impl StyleDelta for AngleStyleDelta {
    fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.width.is_none()
            && self.arc_radius.is_none()
            && self.label_color.is_none()
    }
}

/// Style of point drawables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub color: StyleColor,
    /// Screen-space marker size in pixels.
    pub size: f64,
    pub marker: MarkerShape,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: StyleColor::WHITE,
            size: 6.0,
            marker: MarkerShape::Cross,
        }
    }
}

/// Delta over [`PointStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointStyleDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<StyleColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerShape>,
}

impl StyleConfig for PointStyle {
    type Delta = PointStyleDelta;

    const FIELDS: &'static [&'static str] = &["color", "size", "marker"];

    fn apply(&self, delta: &Self::Delta) -> Self {
        Self {
            color: delta.color.unwrap_or(self.color),
            size: delta.size.unwrap_or(self.size),
            marker: delta.marker.unwrap_or(self.marker),
        }
    }

    fn diff(&self, other: &Self) -> Self::Delta {
        PointStyleDelta {
            color: (other.color != self.color).then_some(other.color),
            size: (other.size != self.size).then_some(other.size),
            marker: (other.marker != self.marker).then_some(other.marker),
        }
    }
}

impl StyleDelta for PointStyleDelta {
    fn is_empty(&self) -> bool {
        self.color.is_none() && self.size.is_none() && self.marker.is_none()
    }
}
