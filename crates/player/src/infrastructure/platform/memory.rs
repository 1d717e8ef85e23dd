//! In-memory storage provider
//!
//! Used for ephemeral sessions and as a test double for the storage port.
//! A read-only store behaves like a browser whose storage quota is
//! exhausted: loads work, writes are dropped.

use crate::ports::outbound::StorageProvider;
use crate::state::Platform;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    data: Arc<RwLock<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `entries` that rejects every write.
    pub fn read_only<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: Arc::new(RwLock::new(data)),
            read_only: true,
        }
    }

    fn write(&self, key: &str, apply: impl FnOnce(&mut HashMap<String, String>)) {
        if self.read_only {
            tracing::warn!("Storage is read-only, dropping write to {}", key);
            return;
        }
        match self.data.write() {
            Ok(mut guard) => apply(&mut guard),
            Err(e) => tracing::error!("Failed to acquire write lock for storage: {}", e),
        }
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.write(key, |data| {
            data.insert(key.to_string(), value.to_string());
        });
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.data.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        self.write(key, |data| {
            data.remove(key);
        });
    }
}

/// Create platform services that keep nothing beyond the current process
pub fn create_ephemeral_platform() -> Platform {
    Platform::new(MemoryStorageProvider::new())
}
