//! Recent factions service
//!
//! Remembers the last few factions the user opened, across sessions. The
//! list policy (capacity, ordering, dedup) lives in `RecentFactions`; this
//! service owns the single copy for the session and writes it back to
//! storage after every change.

use std::cell::RefCell;

use tacref_domain::{FactionId, RecentFactions};

use crate::ports::outbound::{storage_keys, StorageProvider};

/// Service for tracking recently opened factions
///
/// Reads storage once, on construction. Storage problems never reach the
/// caller: unreadable or malformed data reads as an empty list, and a failed
/// write still updates the in-memory list for the rest of the session.
pub struct RecentFactionsService<S: StorageProvider> {
    storage: S,
    recent: RefCell<RecentFactions>,
}

impl<S: StorageProvider> RecentFactionsService<S> {
    /// Create a new RecentFactionsService with the given storage provider
    pub fn new(storage: S) -> Self {
        let recent = load_recent(&storage);
        tracing::debug!("Loaded {} recent factions", recent.len());
        Self {
            storage,
            recent: RefCell::new(recent),
        }
    }

    /// Record a visit to `id` and return the updated list.
    ///
    /// Writes to storage synchronously on every call.
    pub fn touch(&self, id: &FactionId) -> RecentFactions {
        let updated = self.recent.borrow().touched(id.clone());
        self.persist(&updated);
        tracing::debug!("Touched recent faction {}", id);
        self.recent.replace(updated.clone());
        updated
    }

    /// The current list, most recent first.
    pub fn current(&self) -> RecentFactions {
        self.recent.borrow().clone()
    }

    pub fn contains(&self, id: &FactionId) -> bool {
        self.recent.borrow().contains(id)
    }

    /// Forget every recent faction.
    pub fn clear(&self) {
        self.storage.remove(storage_keys::RECENT_FACTIONS);
        self.recent.replace(RecentFactions::new());
    }

    fn persist(&self, recent: &RecentFactions) {
        match serde_json::to_string(recent) {
            Ok(json) => self.storage.save(storage_keys::RECENT_FACTIONS, &json),
            Err(e) => tracing::warn!("Failed to serialize recent factions: {}", e),
        }
    }
}

/// Stored entries are canonicalized again; anything unusable is skipped.
fn load_recent<S: StorageProvider>(storage: &S) -> RecentFactions {
    let Some(raw) = storage.load(storage_keys::RECENT_FACTIONS) else {
        return RecentFactions::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(entries) => entries
            .iter()
            .filter_map(|entry| match FactionId::parse(entry) {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::debug!("Skipping stored recent faction: {}", e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Discarding malformed recent factions: {}", e);
            RecentFactions::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, RwLock};
    use tacref_domain::RECENT_FACTIONS_CAPACITY;

    #[derive(Clone, Default)]
    struct MockStorage {
        data: Arc<RwLock<HashMap<String, String>>>,
        writes: Arc<AtomicUsize>,
        reject_writes: bool,
    }

    impl MockStorage {
        fn with_recent(raw: &str) -> Self {
            let storage = Self::default();
            storage
                .data
                .write()
                .unwrap()
                .insert(storage_keys::RECENT_FACTIONS.to_string(), raw.to_string());
            storage
        }

        fn rejecting_writes() -> Self {
            Self {
                reject_writes: true,
                ..Self::default()
            }
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl StorageProvider for MockStorage {
        fn save(&self, key: &str, value: &str) {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.reject_writes {
                return;
            }
            self.data
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }

        fn load(&self, key: &str) -> Option<String> {
            self.data.read().unwrap().get(key).cloned()
        }

        fn remove(&self, key: &str) {
            self.data.write().unwrap().remove(key);
        }
    }

    fn id(raw: &str) -> FactionId {
        FactionId::parse(raw).unwrap()
    }

    #[test]
    fn test_empty_storage_has_no_recents() {
        let service = RecentFactionsService::new(MockStorage::default());
        assert!(service.current().is_empty());
    }

    #[test]
    fn test_touch_evicts_oldest() {
        let service = RecentFactionsService::new(MockStorage::default());

        service.touch(&id("a"));
        service.touch(&id("b"));
        service.touch(&id("c"));
        let recent = service.touch(&id("d"));

        assert_eq!(recent.as_slice(), &[id("d"), id("c"), id("b")]);
        assert_eq!(service.current(), recent);
    }

    #[test]
    fn test_touch_head_twice_is_idempotent() {
        let service = RecentFactionsService::new(MockStorage::default());
        service.touch(&id("a"));

        let first = service.touch(&id("b"));
        let second = service.touch(&id("b"));

        assert_eq!(first, second);
    }

    #[test]
    fn test_every_touch_writes_once() {
        let storage = MockStorage::default();
        let service = RecentFactionsService::new(storage.clone());

        service.touch(&id("a"));
        service.touch(&id("a"));
        service.touch(&id("b"));

        assert_eq!(storage.writes(), 3);
        assert_eq!(
            storage.load(storage_keys::RECENT_FACTIONS),
            Some(r#"["b","a"]"#.to_string())
        );
    }

    #[test]
    fn test_list_survives_new_session() {
        let storage = MockStorage::default();
        RecentFactionsService::new(storage.clone()).touch(&id("a"));
        RecentFactionsService::new(storage.clone()).touch(&id("b"));

        let next_session = RecentFactionsService::new(storage);

        assert_eq!(next_session.current().as_slice(), &[id("b"), id("a")]);
    }

    #[test]
    fn test_malformed_storage_reads_as_empty() {
        for raw in ["not json", "{\"a\":1}", "[1, 2]", "\"legionary\""] {
            let service = RecentFactionsService::new(MockStorage::with_recent(raw));
            assert!(service.current().is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_stored_entries_are_canonicalized() {
        let storage = MockStorage::with_recent(r#"["KT24-Legionary", "legionary", " ", "kommandos", "x", "y"]"#);

        let service = RecentFactionsService::new(storage);
        let recent = service.current();

        assert_eq!(recent.len(), RECENT_FACTIONS_CAPACITY);
        assert_eq!(recent.as_slice(), &[id("legionary"), id("kommandos"), id("x")]);
    }

    #[test]
    fn test_failed_write_keeps_session_list() {
        let storage = MockStorage::rejecting_writes();
        let service = RecentFactionsService::new(storage.clone());

        let recent = service.touch(&id("a"));

        assert_eq!(recent.as_slice(), &[id("a")]);
        assert_eq!(service.current().as_slice(), &[id("a")]);
        assert_eq!(storage.load(storage_keys::RECENT_FACTIONS), None);
        assert!(RecentFactionsService::new(storage).current().is_empty());
    }

    #[test]
    fn test_prefixed_spellings_share_one_entry() {
        let service = RecentFactionsService::new(MockStorage::default());

        service.touch(&id("kt24-legionary"));
        let recent = service.touch(&id("Legionary"));

        assert_eq!(recent.as_slice(), &[id("legionary")]);
        assert!(service.contains(&id("KT24_legionary")));
    }

    #[test]
    fn test_clear() {
        let storage = MockStorage::default();
        let service = RecentFactionsService::new(storage.clone());
        service.touch(&id("a"));

        service.clear();

        assert!(service.current().is_empty());
        assert_eq!(storage.load(storage_keys::RECENT_FACTIONS), None);
    }
}
