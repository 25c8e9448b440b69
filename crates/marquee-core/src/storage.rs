use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Storage keys shared by every store
pub mod keys {
    pub const MOVIES: &str = "movies";
    pub const REVIEWS: &str = "reviews";
    /// Written by older releases; migrated into [`REVIEWS`] on load
    pub const LEGACY_REVIEWED_MOVIES: &str = "reviewedMovies";
    pub const RECOMMENDED_MOVIES: &str = "recommendedMovies";
    pub const ADMIN_AUTHENTICATED: &str = "isAdminAuthenticated";
    pub const THEME: &str = "theme";
}

/// Persistence port: string keys mapped to string (JSON) values.
///
/// Writes are synchronous and replace the whole value. There is no locking
/// between processes; the last writer wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Storage miss: {} (file does not exist)", key);
                return Ok(None);
            }
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                // Keep the raw bytes; the key then reads as missing
                let backup = self.path_for(&format!("{}.bak", key));
                warn!(
                    "Stored '{}' is not valid UTF-8. Moving it to {} and starting empty.",
                    key,
                    backup.display()
                );
                std::fs::write(&backup, e.as_bytes()).map_err(|source| StorageError::Io {
                    path: backup.clone(),
                    source,
                })?;
                self.remove(key)?;
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value).map_err(|source| StorageError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!("Storage write: {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

/// In-memory store, used in tests and for throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written value behind
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Read a JSON array stored under `key`.
///
/// A missing key yields an empty collection. A value that does not parse is
/// copied to `<key>.bak` and treated as empty so the application can start.
pub fn load_collection<T>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>, StorageError>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = match store.get(key)? {
        Some(raw) => raw,
        None => return Ok(Vec::new()),
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!("Loaded {} ({} items)", key, items.len());
            Ok(items)
        }
        Err(e) => {
            let backup_key = format!("{}.bak", key);
            warn!(
                "Stored '{}' is unreadable ({}). Backing it up as '{}' and starting empty.",
                key, e, backup_key
            );
            store.set(&backup_key, &raw)?;
            Ok(Vec::new())
        }
    }
}

/// Replace the value under `key` with the full serialized collection
pub fn save_collection<T>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<(), StorageError>
where
    T: Serialize,
{
    let json = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)?;
    info!("Saved {} ({} items)", key, items.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(&dir.path().join("storage")).unwrap();

        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert!(store.dir().join("theme.json").exists());
        assert!(!store.dir().join("theme.json.tmp").exists());

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
        // Second remove is a no-op
        store.remove("theme").unwrap();
    }

    #[test]
    fn test_file_store_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        store.set("movies", "[1,2,3]").unwrap();
        store.set("movies", "[]").unwrap();
        assert_eq!(store.get("movies").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_collection_round_trip() {
        let store = MemoryStore::new();
        save_collection(&store, "numbers", &[3u32, 1, 2]).unwrap();
        let loaded: Vec<u32> = load_collection(&store, "numbers").unwrap();
        assert_eq!(loaded, vec![3, 1, 2]);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let store = MemoryStore::new();
        let loaded: Vec<u32> = load_collection(&store, "numbers").unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_non_utf8_file_is_backed_up_and_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let raw = [0xff, 0xfe, b'[', b']'];
        std::fs::write(dir.path().join("movies.json"), raw).unwrap();

        assert_eq!(store.get("movies").unwrap(), None);
        let loaded: Vec<u32> = load_collection(&store, "movies").unwrap();
        assert!(loaded.is_empty());
        assert_eq!(std::fs::read(dir.path().join("movies.bak.json")).unwrap(), raw);
        assert!(!dir.path().join("movies.json").exists());

        store.set("movies", "[1]").unwrap();
        assert_eq!(store.get("movies").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_corrupt_collection_is_backed_up() {
        let store = MemoryStore::new();
        store.set("numbers", "{not json").unwrap();

        let loaded: Vec<u32> = load_collection(&store, "numbers").unwrap();
        assert!(loaded.is_empty());
        assert_eq!(store.get("numbers.bak").unwrap().as_deref(), Some("{not json"));
    }
}
