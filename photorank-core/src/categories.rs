//! Percentile category assignment.
//!
//! Post-hoc step over the final rating snapshot: sort descending,
//! bucket by rank percentile into categories 5 (top 20%) down to 1
//! (bottom 20%).

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::ImageId;

/// Category for a rank percentile in [0, 100).
fn category_for_percentile(percentile: f64) -> u8 {
    if percentile < 20.0 {
        5
    } else if percentile < 40.0 {
        4
    } else if percentile < 60.0 {
        3
    } else if percentile < 80.0 {
        2
    } else {
        1
    }
}

/// Assign a 1–5 category to every identifier in `snapshot`.
///
/// The sort is stable and descending by rating, so rating ties keep the
/// snapshot's insertion order. A single identifier lands at percentile
/// 0 and gets category 5; empty input yields empty output.
pub fn assign(snapshot: &[(ImageId, f64)]) -> Vec<(ImageId, u8)> {
    let mut sorted: Vec<(ImageId, f64)> = snapshot.to_vec();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let total = sorted.len();
    sorted
        .into_iter()
        .enumerate()
        .map(|(index, (id, _rating))| {
            let percentile = index as f64 / total as f64 * 100.0;
            (id, category_for_percentile(percentile))
        })
        .collect()
}

/// `assign`, collected into a lookup map.
pub fn assign_map(snapshot: &[(ImageId, f64)]) -> HashMap<ImageId, u8> {
    assign(snapshot).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_desc(n: usize) -> Vec<(ImageId, f64)> {
        // img0 has the highest rating.
        (0..n)
            .map(|i| (format!("img{i}"), 2000.0 - i as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_ten_items_two_per_category() {
        let cats = assign(&snapshot_desc(10));
        assert_eq!(cats.len(), 10);

        for expected in 1..=5u8 {
            let count = cats.iter().filter(|(_, c)| *c == expected).count();
            assert_eq!(count, 2, "category {expected} should hold 2 of 10");
        }
        // Top two rated land in category 5.
        assert_eq!(cats[0], ("img0".to_string(), 5));
        assert_eq!(cats[1], ("img1".to_string(), 5));
        // Bottom two in category 1.
        assert_eq!(cats[9], ("img9".to_string(), 1));
    }

    #[test]
    fn test_single_item_gets_top_category() {
        let cats = assign(&[("only".to_string(), 1500.0)]);
        assert_eq!(cats, vec![("only".to_string(), 5)]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(assign(&[]).is_empty());
        assert!(assign_map(&[]).is_empty());
    }

    #[test]
    fn test_ties_break_by_snapshot_order() {
        let snap = vec![
            ("first".to_string(), 1500.0),
            ("second".to_string(), 1500.0),
        ];
        let cats = assign(&snap);
        // Stable sort: "first" stays ahead and takes the higher bucket.
        assert_eq!(cats[0], ("first".to_string(), 5));
        assert_eq!(cats[1], ("second".to_string(), 3));
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_rating() {
        let snap = vec![
            ("low".to_string(), 1400.0),
            ("high".to_string(), 1600.0),
        ];
        let cats = assign_map(&snap);
        assert_eq!(cats["high"], 5);
        assert_eq!(cats["low"], 3);
    }
}
