//! The session aggregate and its phase machine.
//!
//! `SessionState` owns the rating store, the comparison-record
//! scheduler, the live collection, and the pending pair, and is driven
//! by one control thread: schedule → decide/reject → schedule, until
//! the round exhausts. Save and load are explicit; nothing persists
//! implicitly.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::Rng;

use crate::categories;
use crate::collection::CollectionManager;
use crate::error::EngineError;
use crate::ratings::RatingStore;
use crate::record::SessionRecord;
use crate::scheduler::{total_pair_count, PairScheduler};
use crate::types::{ImageId, Pair, Progress, Rejection, Side};

/// Where the session is in its comparison round.
///
/// `RoundExhausted` is terminal for scheduling only; snapshots and
/// category assignment remain valid from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pending comparison; a new pair can be requested.
    Idle,
    /// A pair is on screen, waiting for a decision or rejection.
    AwaitingDecision,
    /// Fewer than two live images remain, or every pair was presented.
    RoundExhausted,
}

#[derive(Debug)]
pub struct SessionState {
    set_name: String,
    store: RatingStore,
    scheduler: PairScheduler,
    collection: CollectionManager,
    pending: Option<Pair>,
    completed: u64,
    /// Identifier → external file location, for sessions not backed by
    /// a single folder.
    file_paths: Option<BTreeMap<String, String>>,
    phase: Phase,
}

impl SessionState {
    /// Fresh session over `ids`, every image at the initial rating.
    pub fn new(set_name: &str, ids: Vec<ImageId>) -> Self {
        let collection = CollectionManager::from_ids(ids);
        let mut store = RatingStore::new();
        for id in collection.live() {
            store.init(id);
        }
        SessionState {
            set_name: set_name.to_string(),
            store,
            scheduler: PairScheduler::new(),
            collection,
            pending: None,
            completed: 0,
            file_paths: None,
            phase: Phase::Idle,
        }
    }

    /// Start a session over `ids`, continuing from `prior` when given.
    ///
    /// Identifiers present in `ids` but absent from the record join at
    /// the initial rating (new files since the last save). Identifiers
    /// only in the record are kept as-is.
    pub fn start_session(
        set_name: &str,
        ids: Vec<ImageId>,
        prior: Option<SessionRecord>,
    ) -> Result<Self, EngineError> {
        match prior {
            None => Ok(Self::new(set_name, ids)),
            Some(record) => {
                let mut session = Self::restore(record)?;
                for id in ids {
                    session.collection.insert(&id, &mut session.store);
                }
                Ok(session)
            }
        }
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The ordered (left, right) pair currently awaiting a decision.
    pub fn pending(&self) -> Option<&Pair> {
        self.pending.as_ref()
    }

    pub fn live(&self) -> &[ImageId] {
        self.collection.live()
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// Unordered pairs possible among the current live set.
    pub fn total_possible(&self) -> u64 {
        total_pair_count(self.collection.len()) as u64
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed,
            total_possible: self.total_possible(),
        }
    }

    /// Attach external file locations for a non-folder-backed session.
    pub fn set_file_paths(&mut self, paths: BTreeMap<String, String>) {
        self.file_paths = Some(paths);
    }

    pub fn file_paths(&self) -> Option<&BTreeMap<String, String>> {
        self.file_paths.as_ref()
    }

    /// True when no new pair can be scheduled.
    pub fn is_exhausted(&self) -> bool {
        self.phase == Phase::RoundExhausted || self.scheduler.is_exhausted(self.collection.len())
    }

    /// Request the next comparison.
    ///
    /// From `Idle`, draws a fresh random pair and moves to
    /// `AwaitingDecision`; when the scheduler reports exhaustion, moves
    /// to `RoundExhausted` and returns `None`. Already awaiting a
    /// decision, returns the current pair unchanged.
    pub fn schedule(&mut self, rng: &mut impl Rng) -> Result<Option<Pair>, EngineError> {
        match self.phase {
            Phase::RoundExhausted => Ok(None),
            Phase::AwaitingDecision => Ok(self.pending.clone()),
            Phase::Idle => {
                match self.scheduler.next_random_pair(self.collection.live(), rng) {
                    Ok(pair) => {
                        self.pending = Some(pair.clone());
                        self.phase = Phase::AwaitingDecision;
                        Ok(Some(pair))
                    }
                    Err(EngineError::Exhausted) => {
                        self.phase = Phase::RoundExhausted;
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Resolve the pending comparison: `side` is the winner. Updates
    /// both ratings, bumps the completed counter, clears the pending
    /// pair, returns progress. `InvalidPair` when nothing is pending.
    pub fn decide(&mut self, side: Side) -> Result<Progress, EngineError> {
        let (left, right) = self.pending.clone().ok_or(EngineError::InvalidPair)?;
        let (winner, loser) = match side {
            Side::Left => (left, right),
            Side::Right => (right, left),
        };
        self.store.update(&winner, &loser)?;
        self.completed += 1;
        self.pending = None;
        self.phase = Phase::Idle;
        Ok(self.progress())
    }

    /// Drop one side of the pending comparison from the session
    /// entirely: its rating is deleted and no future pair involves it.
    ///
    /// The survivor becomes the anchor for a deterministic scan; when a
    /// new partner exists the survivor keeps its original side and the
    /// session stays in `AwaitingDecision`. Otherwise the pending pair
    /// clears and the caller should schedule again. Rejections never
    /// increment the completed counter.
    pub fn reject(&mut self, side: Side) -> Result<Rejection, EngineError> {
        let (left, right) = self.pending.clone().ok_or(EngineError::InvalidPair)?;
        let (removed, survivor) = match side {
            Side::Left => (left, right),
            Side::Right => (right, left),
        };

        self.collection.remove(&removed, &mut self.store)?;

        let new_pending = self
            .scheduler
            .next_pair_for(&survivor, self.collection.live())
            .map(|partner| match side {
                // Left was rejected, so the survivor sits on the right.
                Side::Left => (partner, survivor.clone()),
                Side::Right => (survivor.clone(), partner),
            });

        match &new_pending {
            Some(pair) => {
                self.pending = Some(pair.clone());
                self.phase = Phase::AwaitingDecision;
            }
            None => {
                self.pending = None;
                self.phase = Phase::Idle;
            }
        }

        Ok(Rejection {
            removed,
            new_pending,
        })
    }

    /// Fold in rejections observed out-of-band (e.g. files already
    /// sitting in the rejection directory). If the pending pair
    /// references a removed identifier it is discarded.
    pub fn exclude_externally_rejected(&mut self, rejected: &HashSet<ImageId>) -> Vec<ImageId> {
        let dropped = self
            .collection
            .retain_not_rejected(rejected, &mut self.store);
        if let Some((left, right)) = &self.pending {
            if rejected.contains(left) || rejected.contains(right) {
                self.pending = None;
                if self.phase == Phase::AwaitingDecision {
                    self.phase = Phase::Idle;
                }
            }
        }
        dropped
    }

    /// Current identifier→rating snapshot (copy, insertion-ordered).
    pub fn ratings(&self) -> Vec<(ImageId, f64)> {
        self.store.snapshot()
    }

    /// Final 1–5 category per live identifier.
    pub fn final_categories(&self) -> HashMap<ImageId, u8> {
        categories::assign_map(&self.store.snapshot())
    }

    /// Serializable snapshot of the whole session. Never mutates state
    /// and is valid from any phase.
    pub fn snapshot(&self) -> SessionRecord {
        SessionRecord {
            set_name: self.set_name.clone(),
            ratings: self.store.snapshot().into_iter().collect(),
            comparisons: self.scheduler.records().to_vec(),
            current_comparison_number: self.completed,
            current_comparison: self.pending.clone(),
            file_paths: self.file_paths.clone(),
        }
    }

    /// Rebuild a session from a saved record. All-or-nothing: on any
    /// validation failure the error is returned and no state exists to
    /// have been half-mutated.
    ///
    /// A recorded pending pair that references identifiers no longer in
    /// the ratings map is discarded and the session starts `Idle`.
    pub fn restore(record: SessionRecord) -> Result<Self, EngineError> {
        if record.ratings.is_empty() {
            return Err(EngineError::CorruptSnapshot(
                "ratings map is empty or missing".to_string(),
            ));
        }

        let mut store = RatingStore::new();
        for (id, rating) in &record.ratings {
            if !rating.is_finite() {
                return Err(EngineError::CorruptSnapshot(format!(
                    "non-finite rating for {id}"
                )));
            }
            store.init_at(id, *rating);
        }
        let collection = CollectionManager::from_ids(record.ratings.keys().cloned());

        let mut scheduler = PairScheduler::new();
        for (a, b) in &record.comparisons {
            if a == b {
                return Err(EngineError::CorruptSnapshot(format!(
                    "self-comparison recorded for {a}"
                )));
            }
            scheduler
                .record_attempt(a, b)
                .map_err(|_| EngineError::CorruptSnapshot("bad comparison record".to_string()))?;
        }

        let pending = record.current_comparison.filter(|(left, right)| {
            left != right && collection.contains(left) && collection.contains(right)
        });
        let phase = if pending.is_some() {
            Phase::AwaitingDecision
        } else {
            Phase::Idle
        };

        Ok(SessionState {
            set_name: record.set_name,
            store,
            scheduler,
            collection,
            pending,
            completed: record.current_comparison_number,
            file_paths: record.file_paths,
            phase,
        })
    }
}
