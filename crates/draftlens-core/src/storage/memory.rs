//! In-memory settings storage.

use super::{BoxFuture, SettingsStorage, StorageError, StorageResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStorage for MemoryStorage {
    fn save(&self, key: &str, blob: &Value) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let blob = blob.clone();
        Box::pin(async move {
            let mut blobs = self
                .blobs
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            blobs.insert(key, blob);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<Value>> {
        let key = key.to_string();
        Box::pin(async move {
            let blobs = self
                .blobs
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            blobs.get(&key).cloned().ok_or(StorageError::NotFound(key))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut blobs = self
                .blobs
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            blobs.remove(&key);
            Ok(())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let blobs = self
                .blobs
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(blobs.contains_key(&key))
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let blobs = self
                .blobs
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(blobs.keys().cloned().collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;
    use serde_json::json;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let blob = json!({ "line": { "general": { "width": 2.0 } } });

        block_on(storage.save("styles", &blob)).unwrap();
        let loaded = block_on(storage.load("styles")).unwrap();

        assert_eq!(blob, loaded);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();

        assert!(!block_on(storage.exists("styles")).unwrap());
        block_on(storage.save("styles", &json!({}))).unwrap();
        assert!(block_on(storage.exists("styles")).unwrap());

        block_on(storage.delete("styles")).unwrap();
        assert!(!block_on(storage.exists("styles")).unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        block_on(storage.save("a", &json!({}))).unwrap();
        block_on(storage.save("b", &json!({}))).unwrap();

        let keys = block_on(storage.list()).unwrap();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"a".to_string()));
        assert!(keys.contains(&"b".to_string()));
    }
}
