//! Recently viewed factions
//!
//! A short, most-recent-first list of faction ids with no duplicates. The
//! list only changes through [`RecentFactions::touched`]; persistence is
//! handled by the player's recent factions service.

use serde::{Deserialize, Serialize};

use crate::ids::FactionId;

/// Maximum number of recent factions remembered
pub const RECENT_FACTIONS_CAPACITY: usize = 3;

/// Bounded, duplicate-free, most-recent-first list of faction ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FactionId>", into = "Vec<FactionId>")]
pub struct RecentFactions(Vec<FactionId>);

impl RecentFactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The list after visiting `id`: moved (or added) to the front, oldest
    /// entries beyond capacity evicted.
    ///
    /// # Examples
    /// ```
    /// use tacref_domain::{FactionId, RecentFactions};
    ///
    /// let id = |s: &str| FactionId::parse(s).unwrap();
    /// let recent = RecentFactions::new()
    ///     .touched(id("a"))
    ///     .touched(id("b"))
    ///     .touched(id("c"))
    ///     .touched(id("d"));
    ///
    /// assert_eq!(recent.as_slice(), &[id("d"), id("c"), id("b")]);
    /// ```
    pub fn touched(&self, id: FactionId) -> Self {
        let rest = self.0.iter().filter(|existing| **existing != id).cloned();
        let mut ids: Vec<FactionId> = std::iter::once(id.clone()).chain(rest).collect();
        ids.truncate(RECENT_FACTIONS_CAPACITY);
        Self(ids)
    }

    pub fn contains(&self, id: &FactionId) -> bool {
        self.0.contains(id)
    }

    /// The most recently touched id.
    pub fn latest(&self) -> Option<&FactionId> {
        self.0.first()
    }

    pub fn as_slice(&self) -> &[FactionId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FactionId> {
        self.0.iter()
    }
}

/// Builds a list from arbitrary ids, keeping first occurrences up to capacity.
impl From<Vec<FactionId>> for RecentFactions {
    fn from(ids: Vec<FactionId>) -> Self {
        ids.into_iter().collect()
    }
}

impl FromIterator<FactionId> for RecentFactions {
    fn from_iter<I: IntoIterator<Item = FactionId>>(iter: I) -> Self {
        let mut ids: Vec<FactionId> = Vec::with_capacity(RECENT_FACTIONS_CAPACITY);
        for id in iter {
            if ids.len() == RECENT_FACTIONS_CAPACITY {
                break;
            }
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self(ids)
    }
}

impl From<RecentFactions> for Vec<FactionId> {
    fn from(recent: RecentFactions) -> Self {
        recent.0
    }
}

impl<'a> IntoIterator for &'a RecentFactions {
    type Item = &'a FactionId;
    type IntoIter = std::slice::Iter<'a, FactionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
