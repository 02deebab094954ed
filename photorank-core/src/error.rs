//! Error taxonomy for the ranking engine.
//!
//! Every fallible engine operation returns one of these; nothing is
//! retried or swallowed internally. The host decides user-facing
//! messaging.

use thiserror::Error;

use crate::types::ImageId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The operation referenced an identifier that is not in the live
    /// set or rating map.
    #[error("unknown image identifier: {0}")]
    NotFound(ImageId),

    /// Self-comparison, or an operation that needs a pending pair when
    /// there is none.
    #[error("invalid comparison pair")]
    InvalidPair,

    /// No new valid pair can be produced: fewer than two live images,
    /// or every unordered pair has already been presented.
    #[error("comparison round exhausted")]
    Exhausted,

    /// A session record failed validation on restore. Restore is
    /// all-or-nothing; the caller's prior state is untouched.
    #[error("corrupt session record: {0}")]
    CorruptSnapshot(String),
}
