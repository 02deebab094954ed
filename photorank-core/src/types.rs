//! Shared types for the ranking engine.
//!
//! Images are identified by caller-provided opaque string keys, stable
//! for the session's lifetime and independent of on-disk paths.

/// Opaque key naming one image for the session's duration.
pub type ImageId = String;

/// An ordered (left, right) pair of image identifiers, as shown to the
/// user.
pub type Pair = (ImageId, ImageId);

/// Which side of the current comparison an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

/// Progress report returned after a resolved decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Comparisons resolved by a left/right decision (rejections do not
    /// count).
    pub completed: u64,
    /// Unordered pairs possible among the current live set,
    /// `n * (n - 1) / 2`.
    pub total_possible: u64,
}

/// Outcome of rejecting one side of the pending comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The identifier that was removed from the session. The host is
    /// expected to relocate the underlying file out of the working set.
    pub removed: ImageId,
    /// Replacement comparison for the surviving identifier, if an
    /// unseen partner existed. The survivor keeps its original side.
    pub new_pending: Option<Pair>,
}
