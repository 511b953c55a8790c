//! Cached grip paths.
//!
//! Grips are the small square handles drawn at an entity's key points.
//! They render at a fixed screen-space size, so the vector path only
//! depends on that size; paths are memoized keyed by the quantized pixel
//! size, which bounds the cache domain.

use draftlens_core::style::StyleColor;
use kurbo::BezPath;
use std::collections::HashMap;

/// Default grip square size in logical pixels.
pub const DEFAULT_GRIP_SIZE: f64 = 8.0;

/// Grip fill color (screen chrome, not style-resolved).
pub const GRIP_FILL: StyleColor = StyleColor::rgb(0x3B, 0x82, 0xF6);

/// Grip outline color.
pub const GRIP_OUTLINE: StyleColor = StyleColor::WHITE;

/// Smallest cacheable grip size in pixels.
const MIN_GRIP_SIZE: u32 = 2;

/// Largest cacheable grip size in pixels.
const MAX_GRIP_SIZE: u32 = 32;

/// Memoized square grip paths keyed by integer pixel size.
#[derive(Debug, Default)]
pub struct GripPathCache {
    paths: HashMap<u32, BezPath>,
}

impl GripPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantize a requested size to the cache key domain.
    fn quantize(size: f64) -> u32 {
        (size.round() as i64).clamp(MIN_GRIP_SIZE as i64, MAX_GRIP_SIZE as i64) as u32
    }

    /// The square grip path for a size, centered on the origin.
    pub fn path(&mut self, size: f64) -> &BezPath {
        let key = Self::quantize(size);
        self.paths.entry(key).or_insert_with(|| {
            let half = key as f64 / 2.0;
            let mut path = BezPath::new();
            path.move_to((-half, -half));
            path.line_to((half, -half));
            path.line_to((half, half));
            path.line_to((-half, half));
            path.close_path();
            path
        })
    }

    /// Number of distinct sizes currently cached.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
