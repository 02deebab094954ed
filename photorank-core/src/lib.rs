//! photorank-core: pure-computation pairwise image ranking engine.
//!
//! A user ranks a collection of images by repeatedly choosing the
//! better of two shown side by side. This crate holds everything with
//! algorithmic content — Elo-style rating updates, pair scheduling with
//! exhaustion tracking, rejection handling, session snapshots, and
//! percentile category assignment. No IO, no windowing, no filesystem:
//! the host shows images, collects input, and moves files.
//!
//! Images are identified by caller-provided opaque string keys, stable
//! for the session's lifetime.
//!
//! # Quick start
//!
//! ```rust
//! use photorank_core::{SessionState, Side};
//! use rand::SeedableRng;
//!
//! let ids: Vec<String> = ["a.jpg", "b.jpg", "c.jpg"]
//!     .iter().map(|s| s.to_string()).collect();
//!
//! let mut session = SessionState::new("demo", ids);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//!
//! // Drive the loop until every pair has been shown.
//! while let Some((left, right)) = session.schedule(&mut rng)? {
//!     // ...display `left` and `right`, collect the user's choice...
//!     let _ = (left, right);
//!     session.decide(Side::Left)?;
//! }
//!
//! for (id, category) in session.final_categories() {
//!     println!("{id}: category {category}");
//! }
//! # Ok::<(), photorank_core::EngineError>(())
//! ```

pub mod categories;
pub mod collection;
pub mod constants;
pub mod error;
pub mod ratings;
pub mod record;
pub mod scheduler;
pub mod session;
pub mod types;

// Re-export primary public API at crate root.
pub use categories::{assign, assign_map};
pub use collection::CollectionManager;
pub use error::EngineError;
pub use ratings::RatingStore;
pub use record::SessionRecord;
pub use scheduler::{total_pair_count, PairScheduler};
pub use session::{Phase, SessionState};
pub use types::{ImageId, Pair, Progress, Rejection, Side};
