//! WASM platform implementations
//!
//! Storage is the browser's `localStorage`, scoped to the browser profile.

use crate::ports::outbound::StorageProvider;
use crate::state::Platform;

/// Browser storage provider backed by `window.localStorage`
///
/// Private browsing modes and quota errors surface as a missing storage
/// object or a failed `setItem`; both are logged and otherwise ignored.
#[derive(Clone, Default)]
pub struct WasmStorageProvider;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl StorageProvider for WasmStorageProvider {
    fn save(&self, key: &str, value: &str) {
        let Some(storage) = local_storage() else {
            tracing::warn!("localStorage unavailable, dropping write to {}", key);
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!("Failed to write {} to localStorage: {:?}", key, e);
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(key) {
                tracing::warn!("Failed to remove {} from localStorage: {:?}", key, e);
            }
        }
    }
}

/// Create platform services for the browser
pub fn create_platform() -> Platform {
    Platform::new(WasmStorageProvider)
}
