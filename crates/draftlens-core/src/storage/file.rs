//! File-based settings storage.

use super::{BoxFuture, SettingsStorage, StorageError, StorageResult};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// File-based storage keeping one JSON file per settings key.
pub struct FileStorage {
    /// Base directory for settings files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("failed to create settings directory: {e}"))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default per-user location
    /// (`<data dir>/draftlens/settings/`).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("could not determine home directory".to_string()))?;

        Self::new(base.join("draftlens").join("settings"))
    }

    /// File path for a settings key.
    fn blob_path(&self, key: &str) -> PathBuf {
        // Sanitize the key to be safe for filenames
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{safe_key}.json"))
    }

    /// Base directory this storage writes into.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl SettingsStorage for FileStorage {
    fn save(&self, key: &str, blob: &Value) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.blob_path(key);
        let json = match serde_json::to_string_pretty(blob) {
            Ok(j) => j,
            Err(e) => {
                return Box::pin(async move { Err(StorageError::Serialization(e.to_string())) });
            }
        };

        Box::pin(async move {
            fs::write(&path, json)
                .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", path.display())))
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<Value>> {
        let path = self.blob_path(key);
        let key_owned = key.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(key_owned));
            }

            let json = fs::read_to_string(&path)
                .map_err(|e| StorageError::Io(format!("failed to read {}: {e}", path.display())))?;

            serde_json::from_str(&json).map_err(|e| {
                StorageError::Serialization(format!("failed to parse {}: {e}", path.display()))
            })
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.blob_path(key);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("failed to delete {}: {e}", path.display()))
                })?;
            }
            Ok(())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.blob_path(key);
        Box::pin(async move { Ok(path.exists()) })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("failed to read directory: {e}")))?;

            let mut keys = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        keys.push(stem.to_string());
                    }
                }
            }
            Ok(keys)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;
    use serde_json::json;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let blob = json!({ "line": { "general": { "color": "#FFFFFF" } } });

        block_on(storage.save("drawing-styles", &blob)).unwrap();
        let loaded = block_on(storage.load("drawing-styles")).unwrap();
        assert_eq!(blob, loaded);

        let keys = block_on(storage.list()).unwrap();
        assert_eq!(keys, vec!["drawing-styles".to_string()]);
    }

    #[test]
    fn test_unsafe_key_characters_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("user/../styles", &json!({}))).unwrap();
        // The file lands inside the base directory under a sanitized name.
        assert!(block_on(storage.exists("user/../styles")).unwrap());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("absent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
