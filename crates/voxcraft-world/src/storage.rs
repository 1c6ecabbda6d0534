//! Key/value blob storage backends.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde_json::Value;
use tracing::debug;
use voxcraft_core::{Error, Result};

/// Key/value store holding JSON values.
///
/// Writes overwrite; there is no versioning and no transaction across keys.
pub trait Storage {
    /// Read the value under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Overwrite the value under `key`.
    fn set(&mut self, key: &str, value: &Value) -> Result<()>;
}

/// In-memory storage, used for tests and throwaway sessions.
///
/// Values are kept as encoded JSON text, so corrupt entries can be simulated
/// with [`MemoryStorage::insert_raw`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under `key` without validating it.
    pub fn insert_raw(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Raw text stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        self.entries
            .get(key)
            .map(|text| serde_json::from_str(text).map_err(Error::from))
            .transpose()
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        self.entries.insert(key.to_string(), serde_json::to_string(value)?);
        Ok(())
    }
}

/// Directory-backed storage: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Storage(format!("invalid storage key {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // `path` only ever holds a complete file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(value)?)?;
        fs::rename(&tmp, &path)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "voxcraft-storage-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn memory_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("health").unwrap().is_none());

        storage.set("health", &json!(7)).unwrap();
        assert_eq!(storage.get("health").unwrap(), Some(json!(7)));
        assert_eq!(storage.raw("health"), Some("7"));
    }

    #[test]
    fn memory_corrupt_entry_is_an_error() {
        let mut storage = MemoryStorage::new();
        storage.insert_raw("world", "[{not json");
        assert!(matches!(storage.get("world"), Err(Error::Serialization(_))));
    }

    #[test]
    fn file_roundtrip_and_missing_key() {
        let dir = scratch_dir("roundtrip");
        let mut storage = FileStorage::new(&dir);

        assert!(storage.get("world").unwrap().is_none());
        storage.set("world", &json!([{"pos": [0, 0, 0], "texture": "dirt"}])).unwrap();
        assert_eq!(
            storage.get("world").unwrap(),
            Some(json!([{"pos": [0, 0, 0], "texture": "dirt"}]))
        );
        assert!(dir.join("world.json").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_rejects_path_like_keys() {
        let storage = FileStorage::new(scratch_dir("keys"));
        assert!(matches!(storage.get("../etc"), Err(Error::Storage(_))));
        assert!(matches!(storage.get(""), Err(Error::Storage(_))));
    }
}
