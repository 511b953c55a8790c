//! Debounced settings persistence.
//!
//! Style mutations arrive in bursts (a user dragging a width slider fires
//! dozens of updates per second), so writes are debounced: each mutation
//! restarts a short window and the blob is flushed once the window
//! elapses. Boolean toggles request an immediate flush instead.

use super::{SettingsStorage, StorageResult};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Debounce window between the last mutation and the write.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Schedules debounced writes of the settings blob.
///
/// Cooperative: the owner polls [`DebouncedSaver::should_flush`] /
/// [`DebouncedSaver::maybe_flush`]; nothing here spawns or blocks.
pub struct DebouncedSaver<S: SettingsStorage> {
    storage: Arc<S>,
    key: String,
    delay: Duration,
    /// Time of the most recent mutation, while a write is outstanding.
    pending_since: Option<Instant>,
    /// An immediate flush was requested (override toggle).
    urgent: bool,
}

impl<S: SettingsStorage> DebouncedSaver<S> {
    /// Create a saver writing to `key` with the default debounce window.
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            delay: SAVE_DEBOUNCE,
            pending_since: None,
            urgent: false,
        }
    }

    /// Override the debounce window (tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Record a mutation; restarts the debounce window.
    pub fn mark_dirty(&mut self) {
        self.pending_since = Some(Instant::now());
    }

    /// Record a mutation that should flush immediately.
    pub fn mark_urgent(&mut self) {
        self.pending_since = Some(Instant::now());
        self.urgent = true;
    }

    /// Whether a write is still outstanding.
    pub fn is_dirty(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Whether the blob should be written now.
    pub fn should_flush(&self) -> bool {
        match self.pending_since {
            Some(since) => self.urgent || since.elapsed() >= self.delay,
            None => false,
        }
    }

    /// Write the blob if due. Returns whether a write happened.
    pub async fn maybe_flush(&mut self, blob: &Value) -> StorageResult<bool> {
        if !self.should_flush() {
            return Ok(false);
        }
        self.flush(blob).await?;
        Ok(true)
    }

    /// Write the blob unconditionally.
    ///
    /// On failure the saver stays dirty so the next poll retries; the
    /// in-memory settings remain authoritative either way.
    pub async fn flush(&mut self, blob: &Value) -> StorageResult<()> {
        match self.storage.save(&self.key, blob).await {
            Ok(()) => {
                self.pending_since = None;
                self.urgent = false;
                Ok(())
            }
            Err(err) => {
                log::warn!("settings write for '{}' failed: {err}", self.key);
                Err(err)
            }
        }
    }
}
