//! DraftLens Core Library
//!
//! Platform-agnostic data structures and logic for the DraftLens drawing
//! viewer: preview entities, world/screen coordinate mapping, and the
//! layered style-resolution engine with debounced settings persistence.

pub mod entity;
pub mod storage;
pub mod style;
pub mod viewport;

pub use entity::{
    AnglePreview, ArcConstruction, ArcGeometry, ArcPreview, CirclePreview, LinePreview,
    PointPreview, PolylinePreview, PreviewEntity, RectanglePreview,
};
pub use storage::{
    DebouncedSaver, FileStorage, MemoryStorage, SettingsStorage, StorageError, StorageResult,
};
pub use style::config::{StyleConfig, StyleDelta};
pub use style::store::{ModeMap, SlotAction, StyleAction, StyleSettings, StyleSlot, StyleStore};
pub use style::{DrawableClass, InteractionMode, LinePattern, MarkerShape, StyleColor};
pub use viewport::{ViewTransform, Viewport};
