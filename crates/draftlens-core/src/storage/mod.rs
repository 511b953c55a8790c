//! Settings persistence abstraction.
//!
//! The style store reads and writes a per-user configuration blob through
//! an external key-value storage collaborator. Writes are last-write-wins;
//! schema versioning of the blob is the collaborator's responsibility.

mod debounce;
mod file;
mod memory;

pub use debounce::{DebouncedSaver, SAVE_DEBOUNCE};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings blob not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Key-value storage backend for settings blobs.
///
/// Write failures are expected to be retried with backoff by the backend
/// itself; callers treat them as non-blocking warnings and keep their
/// in-memory state authoritative.
pub trait SettingsStorage: Send + Sync {
    /// Save a settings blob under a key.
    fn save(&self, key: &str, blob: &Value) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the settings blob stored under a key.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<Value>>;

    /// Delete the blob stored under a key.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Check whether a blob exists under a key.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;

    /// List all stored keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
