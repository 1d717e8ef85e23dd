//! Platform DI container
//!
//! `Platform` bundles the host-specific adapters behind their port traits so
//! the rest of the crate can be handed one cheap, cloneable value. It is
//! built by `create_platform()` (desktop or wasm) or
//! `create_ephemeral_platform()`.

use std::sync::Arc;

use crate::application::services::RecentFactionsService;
use crate::ports::outbound::StorageProvider;

/// Object-safe mirror of [`StorageProvider`], which is `Clone` and so
/// cannot be boxed directly.
///
/// Method names differ from the port's so that calls on concrete stores
/// (which get both traits through the blanket impl) stay unambiguous.
trait SharedStorage: Send + Sync {
    fn save_value(&self, key: &str, value: &str);
    fn load_value(&self, key: &str) -> Option<String>;
    fn remove_value(&self, key: &str);
}

impl<T: StorageProvider + Send + Sync> SharedStorage for T {
    fn save_value(&self, key: &str, value: &str) {
        self.save(key, value)
    }
    fn load_value(&self, key: &str) -> Option<String> {
        self.load(key)
    }
    fn remove_value(&self, key: &str) {
        self.remove(key)
    }
}

/// Host services for one running client
#[derive(Clone)]
pub struct Platform {
    storage: Arc<dyn SharedStorage>,
}

impl Platform {
    pub fn new<S>(storage: S) -> Self
    where
        S: StorageProvider + Send + Sync,
    {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// The platform's storage as a concrete `StorageProvider`.
    pub fn storage(&self) -> PlatformStorageAdapter {
        PlatformStorageAdapter {
            inner: Arc::clone(&self.storage),
        }
    }

    /// Recent factions tracker over this platform's storage.
    ///
    /// Reads the persisted list once; create one per session and keep it.
    pub fn recent_factions(&self) -> RecentFactionsService<PlatformStorageAdapter> {
        RecentFactionsService::new(self.storage())
    }
}

/// Type-erased storage handle that application services can be generic over
#[derive(Clone)]
pub struct PlatformStorageAdapter {
    inner: Arc<dyn SharedStorage>,
}

impl StorageProvider for PlatformStorageAdapter {
    fn save(&self, key: &str, value: &str) {
        self.inner.save_value(key, value)
    }

    fn load(&self, key: &str) -> Option<String> {
        self.inner.load_value(key)
    }

    fn remove(&self, key: &str) {
        self.inner.remove_value(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::{create_ephemeral_platform, MemoryStorageProvider};
    use tacref_domain::FactionId;

    #[test]
    fn test_adapter_reaches_underlying_storage() {
        let storage = MemoryStorageProvider::new();
        let platform = Platform::new(storage.clone());

        platform.storage().save("key", "value");

        assert_eq!(storage.load("key"), Some("value".to_string()));
        assert_eq!(platform.clone().storage().load("key"), Some("value".to_string()));
    }

    #[test]
    fn test_recent_factions_share_platform_storage() {
        let platform = create_ephemeral_platform();
        let id = FactionId::parse("legionary").unwrap();

        platform.recent_factions().touch(&id);

        assert_eq!(platform.recent_factions().current().as_slice(), &[id]);
    }

    #[test]
    fn test_read_only_storage_still_tracks_session() {
        let platform = Platform::new(MemoryStorageProvider::read_only(Vec::<(String, String)>::new()));
        let recent = platform.recent_factions();
        let id = FactionId::parse("kommandos").unwrap();

        recent.touch(&id);

        assert!(recent.contains(&id));
        assert!(platform.recent_factions().current().is_empty());
    }
}
