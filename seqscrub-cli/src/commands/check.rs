//! Check command implementation - validate sequences and print a summary

use anyhow::{Context, Result};
use std::path::PathBuf;

use seqscrub_core::{detect_format, parse, summarize, validate, DatasetSummary, ValidatedRecord};

use crate::config::Config;
use crate::input;

pub fn execute(
    config: &Config,
    input: PathBuf,
    min_length: Option<usize>,
    sanitize: bool,
    show_invalid: usize,
) -> Result<()> {
    log::info!("Checking sequences in: {}", input.display());

    let text = input::read_input(&input)?;
    if let Some(format) = detect_format(&text) {
        log::info!("Detected format: {}", format);
    }

    let records = parse(&text).context("Failed to parse input file")?;
    log::info!("Parsed {} records", records.len());

    let engine_config = config.validate_config(sanitize, min_length);
    let validated = validate(&records, &engine_config);
    let summary = summarize(&validated);

    print_summary(&summary);

    if summary.invalid_count > 0 {
        log::warn!("{} of {} records are invalid", summary.invalid_count, summary.total_count);
        if show_invalid > 0 {
            print_invalid(&validated, show_invalid);
        }
    }

    Ok(())
}

fn print_summary(summary: &DatasetSummary) {
    println!("Validation summary");
    println!("  {:<22} {}", "Total sequences", summary.total_count);
    println!("  {:<22} {}", "Valid sequences", summary.valid_count);
    println!("  {:<22} {}", "Invalid sequences", summary.invalid_count);
    println!("  {:<22} {}", "Sanitized sequences", summary.sanitized_count);
    println!(
        "  {:<22} {:.2}%",
        "Average GC content",
        summary.avg_gc_content * 100.0
    );
    println!(
        "  {:<22} {} / {:.1} / {}",
        "Length (min/avg/max)", summary.min_length, summary.avg_length, summary.max_length
    );
    println!("  {:<22} {}", "Median length", summary.median_length);
    println!("  {:<22} {}", "Total length", summary.total_length);

    if !summary.error_histogram.is_empty() {
        println!("  Error counts:");
        for (code, count) in &summary.error_histogram {
            println!("    {:<20} {}", code.to_string(), count);
        }
    }

    if !summary.top_longest.is_empty() {
        println!("  Longest sequences:");
        for (rank, entry) in summary.top_longest.iter().enumerate() {
            println!("    {:>2}. {} ({} bp)", rank + 1, entry.header, entry.length);
        }
    }
}

fn print_invalid(records: &[ValidatedRecord], limit: usize) {
    let invalid: Vec<(usize, &ValidatedRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.is_valid)
        .collect();

    println!(
        "First {} invalid records:",
        limit.min(invalid.len())
    );
    for (index, record) in invalid.iter().take(limit) {
        let errors: Vec<String> = record.errors.iter().map(|e| e.to_string()).collect();
        println!(
            "  #{} {} ({} bp): {}",
            index,
            truncate_header(&record.header),
            record.length,
            errors.join("; ")
        );
    }
    if invalid.len() > limit {
        println!("  ... and {} more", invalid.len() - limit);
    }
}

fn truncate_header(header: &str) -> String {
    const MAX: usize = 50;
    if header.chars().count() <= MAX {
        header.to_string()
    } else {
        let head: String = header.chars().take(MAX).collect();
        format!("{}...", head)
    }
}
