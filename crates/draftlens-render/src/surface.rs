//! Drawing-surface abstraction.
//!
//! The preview renderer owns its surface exclusively and talks to it in
//! raw 2D drawing commands only; no component ever inspects the renderer
//! through the surface. `RecordingSurface` captures the command stream for
//! tests and for hosts that replay it onto their own canvas.

use draftlens_core::style::{LinePattern, StyleColor};
use kurbo::{BezPath, Point};

/// Backing-buffer size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    /// Device-pixel size for a logical size under a scale factor.
    pub fn from_logical(width: f64, height: f64, scale_factor: f64) -> Self {
        Self {
            width: (width * scale_factor).round().max(0.0) as u32,
            height: (height * scale_factor).round().max(0.0) as u32,
        }
    }
}

/// Stroke parameters for a single path.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePaint {
    pub color: StyleColor,
    pub width: f64,
    /// Screen-space dash array (on/off run lengths), `None` for solid.
    pub dash: Option<Vec<f64>>,
}

impl StrokePaint {
    /// Solid stroke.
    pub fn solid(color: StyleColor, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Stroke with the dash array of a line pattern.
    pub fn patterned(color: StyleColor, width: f64, pattern: LinePattern) -> Self {
        Self {
            color,
            width,
            dash: pattern.dashes(width),
        }
    }
}

/// A 2D command sink the preview renderer draws into.
///
/// All coordinates are logical (CSS) pixels; `resize` carries the
/// device-pixel backing size so implementations can reconfigure their
/// buffer while the logical size stays unchanged.
pub trait Surface {
    /// Reconfigure the backing buffer at device-pixel resolution.
    fn resize(&mut self, size: PhysicalSize);

    /// Blank the whole surface to the given color.
    fn clear(&mut self, color: StyleColor);

    /// Stroke a path.
    fn stroke_path(&mut self, path: &BezPath, paint: &StrokePaint);

    /// Fill a path.
    fn fill_path(&mut self, path: &BezPath, color: StyleColor);

    /// Draw a text label centered on `position` at a fixed screen-space
    /// font size.
    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: StyleColor);
}

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(StyleColor),
    StrokePath {
        path: BezPath,
        paint: StrokePaint,
    },
    FillPath {
        path: BezPath,
        color: StyleColor,
    },
    Text {
        text: String,
        position: Point,
        font_size: f64,
        color: StyleColor,
    },
}

/// Surface that records its command stream.
///
/// The recorded list always describes the surface content since the last
/// clear, so two command lists being equal means the canvases are
/// identical. That is exactly what the renderer's idempotence tests
/// compare.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Option<PhysicalSize>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands describing the current surface content.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Last configured backing size, if any.
    pub fn size(&self) -> Option<PhysicalSize> {
        self.size
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: PhysicalSize) {
        // Buffer reconfiguration only; content is repainted by the next
        // draw call.
        self.size = Some(size);
    }

    fn clear(&mut self, color: StyleColor) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &StrokePaint) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: StyleColor) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, font_size: f64, color: StyleColor) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size,
            color,
        });
    }
}
