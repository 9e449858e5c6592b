//! Durable string-keyed, string-valued storage.
//!
//! The session only ever needs `get` and `set`. A missing key is `Ok(None)`,
//! never an error. Any backend satisfying [`KeyValueStore`] works; two are
//! provided: an in-process [`MemoryStore`] and a JSON-file [`FileStore`].

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`StorageError`] when the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Persists `value` under `key`. Returns only once the write is durable.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write did not complete.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self
            .inner
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores every key in one JSON object file, `<dir>/store.json`.
///
/// Writes go to a sibling temp file that is synced to disk and then renamed
/// over the store file, so a write either lands completely or not at all.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    const FILE_NAME: &'static str = "store.json";

    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(Self::FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads the whole map. A missing file is an empty map.
    fn read_map(&self) -> Result<Option<BTreeMap<String, String>>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Some(BTreeMap::new())),
            Err(e) => return Err(self.io_err(e)),
        };
        match serde_json::from_str(&text) {
            Ok(map) => Ok(Some(map)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "store file is corrupt");
                Ok(None)
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.read_map()? {
            Some(map) => Ok(map.get(key).cloned()),
            None => Err(StorageError::Unavailable(format!(
                "{} is not a valid store file",
                self.path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file holds nothing recoverable; start over from an empty
        // map rather than refusing every future write.
        let mut map = self.read_map()?.unwrap_or_default();
        map.insert(key.to_string(), value.to_string());

        let encoded = serde_json::to_string_pretty(&map).map_err(|e| StorageError::Encode {
            key: key.to_string(),
            source: e,
        })?;

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp).map_err(|e| self.io_err(e))?;
            file.write_all(encoded.as_bytes()).map_err(|e| self.io_err(e))?;
            file.sync_all().map_err(|e| self.io_err(e))?;
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;
        Ok(())
    }
}
