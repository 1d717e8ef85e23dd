//! Desktop platform implementations
//!
//! Storage is a single JSON object on disk mirrored by an in-memory map.
//! Every change rewrites the file through a sibling temp file that is then
//! renamed over the original, so an interrupted write leaves the previous
//! contents in place.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use thiserror::Error;

use crate::ports::outbound::StorageProvider;
use crate::state::Platform;

type Entries = HashMap<String, String>;

#[derive(Debug, Error)]
enum StoreError {
    #[error("storage lock poisoned")]
    Poisoned,

    #[error("failed to encode storage: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Desktop storage provider with file-based persistence
///
/// The default file lives in the platform config directory:
/// - Linux: ~/.config/tacref/player/storage.json
/// - macOS: ~/Library/Application Support/io.tacref.player/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\tacref\player\config\storage.json
///
/// A failed write is logged and the in-memory value is kept for the rest of
/// the process.
#[derive(Clone)]
pub struct DesktopStorageProvider {
    storage_path: PathBuf,
    entries: Arc<RwLock<Entries>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopStorageProvider {
    /// Create a desktop storage provider in the platform config directory
    pub fn new() -> Self {
        Self::with_path(default_storage_path())
    }

    /// Create a desktop storage provider backed by the given file
    ///
    /// A missing, unreadable or corrupt file starts an empty store.
    pub fn with_path(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let entries = read_entries(&storage_path);
        tracing::debug!(
            "Desktop storage at {:?} holds {} keys",
            storage_path,
            entries.len()
        );

        Self {
            storage_path,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Apply `change` and write the result through to disk.
    ///
    /// The write lock is held across the file write so that concurrent
    /// changes reach the disk in the order they were made.
    fn update(&self, change: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        change(&mut entries);
        write_entries(&self.storage_path, &entries)
    }
}

/// Platform config directory path, or the working directory as a fallback
pub fn default_storage_path() -> PathBuf {
    match ProjectDirs::from("io", "tacref", "player") {
        Some(dirs) => dirs.config_dir().join("storage.json"),
        None => PathBuf::from("tacref_storage.json"),
    }
}

fn read_entries(path: &Path) -> Entries {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Entries::new(),
        Err(e) => {
            tracing::warn!("Failed to read storage file {:?}: {}", path, e);
            return Entries::new();
        }
    };
    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!("Ignoring corrupt storage file {:?}: {}", path, e);
        Entries::new()
    })
}

fn write_entries(path: &Path, entries: &Entries) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let data = serde_json::to_string_pretty(entries)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, data).map_err(io_error(&staging))?;
    fs::rename(&staging, path).map_err(io_error(path))
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        let result = self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
        if let Err(e) = result {
            tracing::error!("Failed to save {}: {}", key, e);
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => {
                tracing::error!("Failed to load {}: {}", key, StoreError::Poisoned);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        let result = self.update(|entries| {
            entries.remove(key);
        });
        if let Err(e) = result {
            tracing::error!("Failed to remove {}: {}", key, e);
        }
    }
}

/// Create platform services for desktop
///
/// `storage_path` overrides the platform config directory.
pub fn create_platform(storage_path: Option<&Path>) -> Platform {
    let storage = match storage_path {
        Some(path) => DesktopStorageProvider::with_path(path),
        None => DesktopStorageProvider::new(),
    };
    Platform::new(storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = DesktopStorageProvider::with_path(&path);
        storage.save("key", "value");

        let reopened = DesktopStorageProvider::with_path(&path);
        assert_eq!(reopened.load("key"), Some("value".to_string()));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let storage = DesktopStorageProvider::with_path(&path);
        storage.save("key", "value");
        storage.remove("key");

        let reopened = DesktopStorageProvider::with_path(&path);
        assert_eq!(reopened.load("key"), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();

        let storage = DesktopStorageProvider::with_path(&path);
        assert_eq!(storage.load("anything"), None);

        // Still writable afterwards
        storage.save("key", "value");
        assert_eq!(
            DesktopStorageProvider::with_path(&path).load("key"),
            Some("value".to_string())
        );
    }

    #[test]
    fn test_unwritable_location_keeps_session_value() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("storage.json");

        let storage = DesktopStorageProvider::with_path(&path);
        storage.save("key", "value");

        assert_eq!(storage.load("key"), Some("value".to_string()));
        assert!(!path.exists());
    }
}
