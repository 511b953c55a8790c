//! DraftLens Render Library
//!
//! Preview renderer and drawing-surface abstraction for DraftLens. The
//! default backend paints through an `egui` painter; `RecordingSurface`
//! captures the raw command stream for tests and custom hosts.

mod grips;
mod labels;
mod preview;
mod surface;

#[cfg(feature = "egui-backend")]
mod egui_surface;

pub use grips::{DEFAULT_GRIP_SIZE, GRIP_FILL, GRIP_OUTLINE, GripPathCache};
pub use labels::DistanceLabelRenderer;
pub use preview::{PreviewOptions, PreviewRenderer, PreviewState};
pub use surface::{DrawCommand, PhysicalSize, RecordingSurface, StrokePaint, Surface};

#[cfg(feature = "egui-backend")]
pub use egui_surface::EguiSurface;
