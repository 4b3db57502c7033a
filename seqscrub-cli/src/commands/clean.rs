//! Clean command implementation - sanitize sequences and write cleaned FASTA

use anyhow::{Context, Result};
use std::path::PathBuf;

use seqscrub_core::{parse, summarize, validate, write_fasta, FastaSelection};

use crate::config::Config;
use crate::input;

pub fn execute(
    config: &Config,
    input: PathBuf,
    out: PathBuf,
    all: bool,
    min_length: Option<usize>,
) -> Result<()> {
    log::info!("Cleaning sequences in: {}", input.display());

    let text = input::read_input(&input)?;
    let records = parse(&text).context("Failed to parse input file")?;
    log::info!("Parsed {} records", records.len());

    // Cleaning implies sanitization regardless of configuration.
    let engine_config = config.validate_config(true, min_length);
    let validated = validate(&records, &engine_config);
    let summary = summarize(&validated);
    log::info!(
        "Sanitizer changed {} of {} records",
        summary.sanitized_count,
        summary.total_count
    );

    let selection = if all {
        FastaSelection::All
    } else {
        FastaSelection::SanitizedOnly
    };
    let fasta = write_fasta(&validated, selection);

    std::fs::write(&out, fasta)
        .with_context(|| format!("Failed to write cleaned FASTA: {}", out.display()))?;
    log::info!("Cleaned sequences written to: {}", out.display());

    Ok(())
}
