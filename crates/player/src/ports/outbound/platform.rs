//! Host storage port
//!
//! Application services persist small string values through
//! `StorageProvider`; the adapters in `infrastructure::platform` map it onto
//! a JSON file, `localStorage` or memory. The `Platform` container that
//! holds the chosen adapter lives in `state/platform.rs`.

/// Persistent storage abstraction (localStorage/file-based)
///
/// Both operations are infallible from the caller's point of view: an
/// unavailable or full store behaves as "absent" on load and as a no-op on
/// save. Adapters log the failure.
pub trait StorageProvider: Clone + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// Keys written through [`StorageProvider`]
pub mod storage_keys {
    /// JSON array of canonical faction ids, most recent first
    pub const RECENT_FACTIONS: &str = "tacref_recent_factions";
}
