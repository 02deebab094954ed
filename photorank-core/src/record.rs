//! The persisted session record.
//!
//! This is the logical schema the engine defines for durable saves;
//! byte-level file IO belongs to the host. Maps are `BTreeMap` so the
//! serialized form is deterministic. Serde derives sit behind the
//! `serde` cargo feature, matching how the core keeps serialization
//! optional.

use std::collections::BTreeMap;

/// Serializable aggregate of a session's state.
///
/// `comparisons` holds unordered pairs as 2-element arrays.
/// `current_comparison` is present only while a pair is pending.
/// `file_paths` is present only for sessions not backed by a single
/// folder, mapping identifiers to external file locations.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub set_name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub ratings: BTreeMap<String, f64>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub comparisons: Vec<(String, String)>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub current_comparison_number: u64,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub current_comparison: Option<(String, String)>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub file_paths: Option<BTreeMap<String, String>>,
}
