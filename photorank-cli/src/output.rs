//! Output formatting: terminal table and JSON.
use std::collections::HashMap;

use photorank_core::ImageId;
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedImage {
    rank: usize,
    file: String,
    rating: f64,
    category: u8,
}

#[derive(Serialize)]
struct JsonOutput {
    set_name: String,
    images: Vec<JsonRankedImage>,
    total_comparisons: u64,
}

/// Sort a rating snapshot descending (stable, so ties keep snapshot
/// order) for display.
fn ranked(ratings: &[(ImageId, f64)]) -> Vec<(ImageId, f64)> {
    let mut sorted = ratings.to_vec();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Print results as a formatted terminal table.
pub fn print_table(
    ratings: &[(ImageId, f64)],
    categories: &HashMap<ImageId, u8>,
    total_comparisons: u64,
) {
    let sorted = ranked(ratings);

    // Find the widest file name for padding
    let name_width = sorted
        .iter()
        .map(|(id, _)| id.len())
        .max()
        .unwrap_or(4)
        .max(4); // at least "File"

    println!("  # | {:<name_width$} |  Rating | Category", "File");
    println!("----|-{}-|---------|---------", "-".repeat(name_width));

    for (i, (id, rating)) in sorted.iter().enumerate() {
        let category = categories.get(id).copied().unwrap_or(0);
        println!(
            "{:>3} | {:<name_width$} | {:>7.1} | {:>8}",
            i + 1,
            id,
            rating,
            category,
        );
    }

    println!(
        "\n{} images ranked ({} comparisons made)",
        sorted.len(),
        total_comparisons,
    );
}

/// Print results as JSON.
pub fn print_json(
    set_name: &str,
    ratings: &[(ImageId, f64)],
    categories: &HashMap<ImageId, u8>,
    total_comparisons: u64,
) {
    let images: Vec<JsonRankedImage> = ranked(ratings)
        .into_iter()
        .enumerate()
        .map(|(i, (id, rating))| JsonRankedImage {
            rank: i + 1,
            category: categories.get(&id).copied().unwrap_or(0),
            file: id,
            rating,
        })
        .collect();

    let output = JsonOutput {
        set_name: set_name.to_string(),
        images,
        total_comparisons,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_sorts_descending_stably() {
        let ratings = vec![
            ("mid".to_string(), 1500.0),
            ("top".to_string(), 1600.0),
            ("also_mid".to_string(), 1500.0),
        ];
        let sorted = ranked(&ratings);
        let order: Vec<&str> = sorted.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["top", "mid", "also_mid"]);
    }
}
