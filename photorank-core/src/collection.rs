//! Live-identifier management.
//!
//! `CollectionManager` owns the ordered list of identifiers still
//! eligible for comparison and is the only component that removes one.
//! The order is stable and drives the deterministic rejection-recovery
//! scan.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::ratings::RatingStore;
use crate::types::ImageId;

#[derive(Debug, Clone, Default)]
pub struct CollectionManager {
    live: Vec<ImageId>,
}

impl CollectionManager {
    /// Build from an identifier list, dropping duplicates while keeping
    /// first-seen order.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ImageId>,
    {
        let mut seen = HashSet::new();
        let live = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        CollectionManager { live }
    }

    pub fn live(&self) -> &[ImageId] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.live.iter().any(|x| x == id)
    }

    /// Add a live identifier and seed its rating. No-op if already
    /// live.
    pub fn insert(&mut self, id: &str, store: &mut RatingStore) {
        if !self.contains(id) {
            self.live.push(id.to_string());
            store.init(id);
        }
    }

    /// Remove `id` from the live set and delete its rating entry.
    /// Cascade point for rejection: after this, no future pair involves
    /// `id`. On `NotFound` neither the live set nor the store is
    /// touched.
    pub fn remove(&mut self, id: &str, store: &mut RatingStore) -> Result<(), EngineError> {
        let pos = self
            .live
            .iter()
            .position(|x| x == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        self.live.remove(pos);
        // A live identifier always has a rating entry; keep going if the
        // store somehow disagrees rather than leaving the live set stale.
        let _ = store.remove(id);
        Ok(())
    }

    /// Drop identifiers observed as rejected out-of-band (e.g. files
    /// already moved into a rejection directory). The new live set is
    /// computed as a pure function of the old set and the rejected set,
    /// then swapped in whole.
    pub fn retain_not_rejected(
        &mut self,
        rejected: &HashSet<ImageId>,
        store: &mut RatingStore,
    ) -> Vec<ImageId> {
        if rejected.is_empty() {
            return Vec::new();
        }
        let (kept, dropped): (Vec<ImageId>, Vec<ImageId>) = self
            .live
            .iter()
            .cloned()
            .partition(|id| !rejected.contains(id));
        for id in &dropped {
            let _ = store.remove(id);
        }
        self.live = kept;
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(ids: &[&str], store: &mut RatingStore) -> CollectionManager {
        let mgr = CollectionManager::from_ids(ids.iter().map(|s| s.to_string()));
        for id in mgr.live() {
            store.init(id);
        }
        mgr
    }

    #[test]
    fn test_from_ids_deduplicates_preserving_order() {
        let mgr = CollectionManager::from_ids(
            ["b", "a", "b", "c"].iter().map(|s| s.to_string()),
        );
        assert_eq!(mgr.live(), &["b", "a", "c"]);
    }

    #[test]
    fn test_remove_cascades_to_ratings() {
        let mut store = RatingStore::new();
        let mut mgr = manager_with(&["a", "b", "c"], &mut store);

        mgr.remove("b", &mut store).unwrap();
        assert_eq!(mgr.live(), &["a", "c"]);
        assert!(!store.contains("b"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_unknown_is_notfound_and_harmless() {
        let mut store = RatingStore::new();
        let mut mgr = manager_with(&["a", "b"], &mut store);

        let err = mgr.remove("ghost", &mut store).unwrap_err();
        assert_eq!(err, EngineError::NotFound("ghost".to_string()));
        assert_eq!(mgr.len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_retain_not_rejected_swaps_atomically() {
        let mut store = RatingStore::new();
        let mut mgr = manager_with(&["a", "b", "c", "d"], &mut store);

        let rejected: HashSet<ImageId> =
            ["b", "d", "unrelated"].iter().map(|s| s.to_string()).collect();
        let dropped = mgr.retain_not_rejected(&rejected, &mut store);

        assert_eq!(dropped, vec!["b".to_string(), "d".to_string()]);
        assert_eq!(mgr.live(), &["a", "c"]);
        assert!(store.contains("a") && store.contains("c"));
        assert!(!store.contains("b") && !store.contains("d"));
    }

    #[test]
    fn test_insert_seeds_rating_once() {
        let mut store = RatingStore::new();
        let mut mgr = manager_with(&["a"], &mut store);
        mgr.insert("b", &mut store);
        mgr.insert("b", &mut store);
        assert_eq!(mgr.live(), &["a", "b"]);
        assert_eq!(store.len(), 2);
    }
}
