//! Dataset-level aggregation
//!
//! Consumes a full set of validated records and reduces it to a
//! [`DatasetSummary`]: totals, GC mean, length distribution, error
//! histogram and the top-10 length ranking. Records are never mutated or
//! filtered here; invalid records count like any other.

use std::collections::BTreeMap;

use crate::types::{DatasetSummary, TopEntry, ValidatedRecord};

/// Number of entries kept in the length ranking.
pub const TOP_LONGEST_COUNT: usize = 10;

/// Fraction of G/C characters, case-insensitive. Zero-length input
/// reports 0 by convention.
pub fn gc_fraction(sequence: &str) -> f64 {
    let mut gc = 0usize;
    let mut total = 0usize;
    for c in sequence.chars() {
        total += 1;
        if matches!(c.to_ascii_uppercase(), 'G' | 'C') {
            gc += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        gc as f64 / total as f64
    }
}

/// Aggregate all records into a summary. An empty dataset yields the
/// all-zero default rather than an error.
pub fn summarize(records: &[ValidatedRecord]) -> DatasetSummary {
    if records.is_empty() {
        return DatasetSummary::default();
    }

    let total_count = records.len();
    let valid_count = records.iter().filter(|r| r.is_valid).count();
    let sanitized_count = records.iter().filter(|r| r.was_sanitized()).count();

    let avg_gc_content =
        records.iter().map(|r| r.gc_content).sum::<f64>() / total_count as f64;

    let mut lengths: Vec<usize> = records.iter().map(|r| r.length).collect();
    let total_length: u64 = lengths.iter().map(|&l| l as u64).sum();
    let min_length = lengths.iter().copied().min().unwrap_or(0);
    let max_length = lengths.iter().copied().max().unwrap_or(0);
    let avg_length = total_length as f64 / total_count as f64;
    lengths.sort_unstable();
    let median_length = lengths[total_count / 2];

    let mut error_histogram: BTreeMap<_, usize> = BTreeMap::new();
    for record in records {
        for &code in &record.errors {
            *error_histogram.entry(code).or_insert(0) += 1;
        }
    }

    DatasetSummary {
        total_count,
        valid_count,
        invalid_count: total_count - valid_count,
        sanitized_count,
        avg_gc_content,
        min_length,
        max_length,
        avg_length,
        median_length,
        total_length,
        error_histogram,
        top_longest: top_longest(records),
    }
}

/// Up to [`TOP_LONGEST_COUNT`] records by descending length. The sort is
/// stable, so equal lengths keep their file order and the earlier record
/// ranks first.
fn top_longest(records: &[ValidatedRecord]) -> Vec<TopEntry> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| records[b].length.cmp(&records[a].length));

    order
        .into_iter()
        .take(TOP_LONGEST_COUNT)
        .map(|i| TopEntry {
            header: records[i].header.clone(),
            length: records[i].length,
        })
        .collect()
}
