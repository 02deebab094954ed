//! Comparison-pair scheduling.
//!
//! Fresh pairs are drawn by rejection sampling: pick two distinct live
//! identifiers uniformly at random and retry on already-recorded pairs.
//! That gives near-uniform coverage of the comparison graph without
//! materializing all C(n, 2) pairs, which matters because selection
//! runs interactively after every decision. The rejection-recovery path
//! (`next_pair_for`) instead scans the live list in order: it must
//! guarantee progress for one specific anchor, so no retry loop.

use std::collections::HashSet;

use rand::Rng;

use crate::error::EngineError;
use crate::types::{ImageId, Pair};

/// Random draws attempted before falling back to a deterministic sweep.
/// The sweep makes termination a proof, not a probability, near
/// exhaustion.
const RANDOM_ATTEMPT_LIMIT: usize = 128;

/// Total unordered pairs among `n` identifiers: n * (n - 1) / 2.
pub fn total_pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Tracks which unordered pairs have already been presented and picks
/// the next pair to show.
#[derive(Debug, Clone, Default)]
pub struct PairScheduler {
    /// Normalized (lexicographic min, max) pairs in insertion order,
    /// kept as a list for deterministic snapshots.
    records: Vec<(ImageId, ImageId)>,
    /// Membership index over `records`.
    seen: HashSet<(ImageId, ImageId)>,
}

fn normalize(a: &str, b: &str) -> (ImageId, ImageId) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl PairScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the unordered pair {a, b} has been presented before.
    pub fn already_compared(&self, a: &str, b: &str) -> bool {
        self.seen.contains(&normalize(a, b))
    }

    /// Mark the unordered pair {a, b} as presented. Recording the same
    /// pair twice is a no-op; a pair never appears in the record set
    /// more than once.
    pub fn record_attempt(&mut self, a: &str, b: &str) -> Result<(), EngineError> {
        if a == b {
            return Err(EngineError::InvalidPair);
        }
        self.insert_record(a, b);
        Ok(())
    }

    fn insert_record(&mut self, a: &str, b: &str) {
        let key = normalize(a, b);
        if self.seen.insert(key.clone()) {
            self.records.push(key);
        }
    }

    pub fn recorded_count(&self) -> usize {
        self.records.len()
    }

    /// Recorded pairs in insertion order, for snapshotting. Pairs whose
    /// identifiers have since been rejected remain here; they still
    /// count toward the exhaustion bound.
    pub fn records(&self) -> &[(ImageId, ImageId)] {
        &self.records
    }

    /// True when no new pair can be scheduled for a live set of size
    /// `n`: fewer than two identifiers remain, or at least n*(n-1)/2
    /// pairs are already recorded.
    pub fn is_exhausted(&self, n: usize) -> bool {
        n < 2 || self.records.len() >= total_pair_count(n)
    }

    /// Pick two distinct live identifiers uniformly at random, retrying
    /// until an unrecorded pair is found, then record and return it.
    ///
    /// The exhaustion bound is checked up front, so when sampling
    /// starts an unseen pair is known to exist; after
    /// `RANDOM_ATTEMPT_LIMIT` misses a full sweep finds it instead.
    pub fn next_random_pair(
        &mut self,
        live: &[ImageId],
        rng: &mut impl Rng,
    ) -> Result<Pair, EngineError> {
        if self.is_exhausted(live.len()) {
            return Err(EngineError::Exhausted);
        }

        for _ in 0..RANDOM_ATTEMPT_LIMIT {
            let i = rng.random_range(0..live.len());
            let j = rng.random_range(0..live.len());
            if i == j {
                continue;
            }
            if !self.already_compared(&live[i], &live[j]) {
                self.insert_record(&live[i], &live[j]);
                return Ok((live[i].clone(), live[j].clone()));
            }
        }

        // Deterministic sweep. Reached only when the record set is
        // dense relative to the live set.
        for i in 0..live.len() {
            for j in (i + 1)..live.len() {
                if !self.already_compared(&live[i], &live[j]) {
                    self.insert_record(&live[i], &live[j]);
                    return Ok((live[i].clone(), live[j].clone()));
                }
            }
        }

        // Every live pair is recorded; the bound above was satisfied
        // only because records involving rejected identifiers count too.
        Err(EngineError::Exhausted)
    }

    /// Rejection-recovery path: scan `live` in order and return the
    /// first identifier with no recorded pair against `anchor`,
    /// recording it. `None` means the anchor has been compared against
    /// everyone remaining.
    pub fn next_pair_for(&mut self, anchor: &str, live: &[ImageId]) -> Option<ImageId> {
        for id in live {
            if id != anchor && !self.already_compared(anchor, id) {
                self.insert_record(anchor, id);
                return Some(id.clone());
            }
        }
        None
    }
}
