//! Style types for drawable classes.
//!
//! Every drawable class carries a *General* (base) style configuration plus
//! optional per-interaction-mode override deltas and enable flags. The
//! effective style actually used for drawing is resolved in `merge` and
//! cached in `store`.

pub mod config;
pub mod merge;
pub mod settings;
pub mod store;

pub use config::{
    AngleStyle, ArcStyle, CircleStyle, LineStyle, PointStyle, PolylineStyle, RectangleStyle,
    StyleConfig,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named interaction state a drawable can be rendered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// An in-progress drawing gesture (rubber band).
    #[default]
    Draft,
    /// Pointer hovering over a drawable.
    Hover,
    /// Drawable is selected.
    Selection,
    /// Gesture just committed, short confirmation state.
    Completion,
}

impl InteractionMode {
    /// All modes, in a stable order.
    pub const ALL: [InteractionMode; 4] = [
        InteractionMode::Draft,
        InteractionMode::Hover,
        InteractionMode::Selection,
        InteractionMode::Completion,
    ];

    /// Stable name used as a key in the settings blob.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Draft => "draft",
            InteractionMode::Hover => "hover",
            InteractionMode::Selection => "selection",
            InteractionMode::Completion => "completion",
        }
    }

    /// Parse a settings-blob key back into a mode.
    pub fn parse(s: &str) -> Option<Self> {
        InteractionMode::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Accent color a settings UI seeds a fresh override of this mode
    /// with. Purely a preset; resolution semantics don't depend on it.
    pub fn accent(&self) -> StyleColor {
        match self {
            InteractionMode::Draft => StyleColor::rgb(0x9E, 0x9E, 0x9E),
            InteractionMode::Hover => StyleColor::rgb(0xFF, 0x8C, 0x00),
            InteractionMode::Selection => StyleColor::rgb(0x3B, 0x82, 0xF6),
            InteractionMode::Completion => StyleColor::rgb(0x4C, 0xAF, 0x50),
        }
    }
}

/// Drawable classes the style store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawableClass {
    Line,
    Circle,
    Polyline,
    Rectangle,
    Arc,
    AngleMeasurement,
    Point,
}

impl DrawableClass {
    /// All classes, in a stable order.
    pub const ALL: [DrawableClass; 7] = [
        DrawableClass::Line,
        DrawableClass::Circle,
        DrawableClass::Polyline,
        DrawableClass::Rectangle,
        DrawableClass::Arc,
        DrawableClass::AngleMeasurement,
        DrawableClass::Point,
    ];

    /// Stable name used as a key in the settings blob.
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawableClass::Line => "line",
            DrawableClass::Circle => "circle",
            DrawableClass::Polyline => "polyline",
            DrawableClass::Rectangle => "rectangle",
            DrawableClass::Arc => "arc",
            DrawableClass::AngleMeasurement => "angle-measurement",
            DrawableClass::Point => "point",
        }
    }
}

/// Error raised by malformed style values in a loaded settings blob.
///
/// Always handled leniently: the offending key is dropped with a warning
/// and never becomes fatal or reaches an effective style.
#[derive(Debug, Error)]
pub enum StyleParseError {
    #[error("invalid color literal '{0}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}

/// RGBA color stored as 8-bit components and serialized as a hex string
/// (`#RRGGBB`, or `#RRGGBBAA` when not fully opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl StyleColor {
    pub const WHITE: StyleColor = StyleColor::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: StyleColor = StyleColor::rgb(0x00, 0x00, 0x00);
    pub const TRANSPARENT: StyleColor = StyleColor::rgba(0x00, 0x00, 0x00, 0x00);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Fully transparent colors draw nothing.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Hex form used in the settings blob.
    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for StyleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for StyleColor {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(StyleParseError::InvalidColor(s.to_string()));
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| StyleParseError::InvalidColor(s.to_string()))
        };
        match hex.len() {
            6 => Ok(StyleColor::rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?)),
            8 => Ok(StyleColor::rgba(
                parse(0..2)?,
                parse(2..4)?,
                parse(4..6)?,
                parse(6..8)?,
            )),
            _ => Err(StyleParseError::InvalidColor(s.to_string())),
        }
    }
}

impl Serialize for StyleColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for StyleColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Stroke dash pattern for lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LinePattern {
    /// Screen-space dash array for the given stroke width, or `None` for a
    /// solid stroke.
    pub fn dashes(&self, width: f64) -> Option<Vec<f64>> {
        let w = width.max(1.0);
        match self {
            LinePattern::Solid => None,
            LinePattern::Dashed => Some(vec![w * 4.0, w * 2.0]),
            LinePattern::Dotted => Some(vec![w, w * 2.0]),
        }
    }
}

/// Marker glyph for point drawables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    #[default]
    Cross,
    Circle,
    Square,
}
