//! Per-image skill ratings and the pairwise update rule.
//!
//! A logistic pairwise-comparison model (Elo) with a fixed K-factor.
//! The store is the only place ratings are mutated; everything else
//! reads copies. Insertion order is preserved so that downstream
//! tie-breaking (category assignment) is stable.

use std::collections::HashMap;

use crate::constants::{INITIAL_RATING, K_FACTOR, RATING_SCALE};
use crate::error::EngineError;
use crate::types::ImageId;

/// Expected score of a player rated `rating` against one rated
/// `opponent`: 1 / (1 + 10^((opponent - rating) / 400)).
fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / RATING_SCALE))
}

#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    /// Identifiers in insertion order.
    order: Vec<ImageId>,
    ratings: HashMap<ImageId, f64>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` at the initial rating. Idempotent: re-initializing an
    /// existing identifier leaves its rating untouched.
    pub fn init(&mut self, id: &str) {
        if !self.ratings.contains_key(id) {
            self.order.push(id.to_string());
            self.ratings.insert(id.to_string(), INITIAL_RATING);
        }
    }

    /// Insert `id` at a specific rating (used when restoring a saved
    /// session). Same idempotence as `init`.
    pub fn init_at(&mut self, id: &str, rating: f64) {
        if !self.ratings.contains_key(id) {
            self.order.push(id.to_string());
            self.ratings.insert(id.to_string(), rating);
        }
    }

    /// Delete the rating entry for `id`, returning its last rating.
    pub fn remove(&mut self, id: &str) -> Result<f64, EngineError> {
        let rating = self
            .ratings
            .remove(id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        self.order.retain(|x| x != id);
        Ok(rating)
    }

    /// Apply one comparison outcome. Both expected scores are computed
    /// from the pre-update ratings, so the update is simultaneous, not
    /// sequential, and bit-for-bit reproducible.
    pub fn update(&mut self, winner: &str, loser: &str) -> Result<(), EngineError> {
        if winner == loser {
            return Err(EngineError::InvalidPair);
        }
        let rw = *self
            .ratings
            .get(winner)
            .ok_or_else(|| EngineError::NotFound(winner.to_string()))?;
        let rl = *self
            .ratings
            .get(loser)
            .ok_or_else(|| EngineError::NotFound(loser.to_string()))?;

        let expected_win = expected_score(rw, rl);
        let expected_lose = expected_score(rl, rw);

        self.ratings
            .insert(winner.to_string(), rw + K_FACTOR * (1.0 - expected_win));
        self.ratings
            .insert(loser.to_string(), rl + K_FACTOR * (0.0 - expected_lose));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.ratings.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ratings.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Full identifier→rating snapshot in insertion order. A copy: the
    /// caller cannot mutate the store through it.
    pub fn snapshot(&self) -> Vec<(ImageId, f64)> {
        self.order
            .iter()
            .map(|id| (id.clone(), self.ratings[id]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let mut store = RatingStore::new();
        store.init("a");
        store.init("a");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some(INITIAL_RATING));
    }

    #[test]
    fn test_equal_ratings_split_k_exactly() {
        let mut store = RatingStore::new();
        store.init("left");
        store.init("right");
        store.update("left", "right").unwrap();

        // Expected score is exactly 0.5 for both, so the winner gains
        // K/2 and the loser drops K/2.
        assert_eq!(store.get("left"), Some(1516.0));
        assert_eq!(store.get("right"), Some(1484.0));
    }

    #[test]
    fn test_winner_always_gains_loser_always_drops() {
        let mut store = RatingStore::new();
        store.init("strong");
        store.init("weak");

        // Pile wins onto "strong" so the gap gets large, then check the
        // direction of movement still holds even as the favorite wins.
        for _ in 0..50 {
            let before_w = store.get("strong").unwrap();
            let before_l = store.get("weak").unwrap();
            store.update("strong", "weak").unwrap();
            assert!(store.get("strong").unwrap() > before_w);
            assert!(store.get("weak").unwrap() < before_l);
        }
    }

    #[test]
    fn test_update_unknown_id_fails_without_mutation() {
        let mut store = RatingStore::new();
        store.init("a");
        let err = store.update("a", "ghost").unwrap_err();
        assert_eq!(err, EngineError::NotFound("ghost".to_string()));
        assert_eq!(store.get("a"), Some(INITIAL_RATING));
    }

    #[test]
    fn test_self_comparison_rejected() {
        let mut store = RatingStore::new();
        store.init("a");
        assert_eq!(store.update("a", "a"), Err(EngineError::InvalidPair));
    }

    #[test]
    fn test_remove_deletes_entry() {
        let mut store = RatingStore::new();
        store.init("a");
        store.init("b");
        assert_eq!(store.remove("a"), Ok(INITIAL_RATING));
        assert!(!store.contains("a"));
        assert_eq!(
            store.remove("a"),
            Err(EngineError::NotFound("a".to_string()))
        );
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let mut store = RatingStore::new();
        for id in ["c", "a", "b"] {
            store.init(id);
        }
        let snap = store.snapshot();
        let ids: Vec<&str> = snap.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut store = RatingStore::new();
        store.init("a");
        let mut snap = store.snapshot();
        snap[0].1 = 9999.0;
        assert_eq!(store.get("a"), Some(INITIAL_RATING));
    }
}
