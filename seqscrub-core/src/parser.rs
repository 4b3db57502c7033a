//! FASTA/FASTQ text parser
//!
//! Parses already-materialized text into ordered [`RawRecord`]s. The
//! format is detected from content, never from a file extension: the
//! first non-blank line decides between FASTA (`>`) and FASTQ (`@`).
//! File access, decompression and encoding are the caller's concern.

use thiserror::Error;

use crate::types::{RawRecord, SequenceFormat};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(
        "unrecognized sequence format: first line must start with '>' (FASTA) or '@' (FASTQ), found {0:?}"
    )]
    UnrecognizedFormat(String),
}

/// Detect the input format from the first non-blank line.
///
/// Returns `None` for blank input or input starting with neither record
/// marker.
pub fn detect_format(raw_text: &str) -> Option<SequenceFormat> {
    let first = first_content_line(raw_text)?;
    match first.chars().next() {
        Some('>') => Some(SequenceFormat::Fasta),
        Some('@') => Some(SequenceFormat::Fastq),
        _ => None,
    }
}

/// Parse raw text into records, in file order.
///
/// Input with no non-blank lines yields an empty list. Input whose first
/// non-blank line starts with neither `>` nor `@` fails with
/// [`ParseError::UnrecognizedFormat`].
pub fn parse(raw_text: &str) -> Result<Vec<RawRecord>, ParseError> {
    let Some(first) = first_content_line(raw_text) else {
        return Ok(Vec::new());
    };
    match detect_format(raw_text) {
        Some(SequenceFormat::Fasta) => Ok(parse_fasta(raw_text)),
        Some(SequenceFormat::Fastq) => Ok(parse_fastq(raw_text)),
        None => Err(ParseError::UnrecognizedFormat(preview(first))),
    }
}

fn first_content_line(raw_text: &str) -> Option<&str> {
    raw_text.lines().map(str::trim).find(|line| !line.is_empty())
}

fn preview(line: &str) -> String {
    const MAX: usize = 30;
    if line.chars().count() <= MAX {
        line.to_string()
    } else {
        let head: String = line.chars().take(MAX).collect();
        format!("{}...", head)
    }
}

/// FASTA: `>` opens a record, following lines accumulate into the
/// sequence. A header with no sequence lines still yields a record; the
/// validator flags it, the parser does not drop it.
fn parse_fasta(content: &str) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('>') {
            if let Some((header, sequence)) = current.take() {
                records.push(RawRecord {
                    header,
                    sequence,
                    quality: None,
                });
            }
            current = Some((rest.trim().to_string(), String::new()));
        } else if let Some((_, sequence)) = current.as_mut() {
            // A sequence line before any header cannot occur: the first
            // non-blank line is known to start with '>'.
            sequence.push_str(line);
        }
    }

    if let Some((header, sequence)) = current {
        records.push(RawRecord {
            header,
            sequence,
            quality: None,
        });
    }

    records
}

/// FASTQ: non-blank lines grouped in fixed 4-line units of header,
/// sequence, separator and quality. The separator content is ignored,
/// and a quality string is stored even when its length does not match
/// the sequence. A trailing partial unit is dropped.
fn parse_fastq(content: &str) -> Vec<RawRecord> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut records = Vec::with_capacity(lines.len() / 4);
    let mut units = lines.chunks_exact(4);
    for unit in &mut units {
        let header = unit[0].strip_prefix('@').unwrap_or(unit[0]).trim();
        records.push(RawRecord {
            header: header.to_string(),
            sequence: unit[1].to_string(),
            quality: Some(unit[3].to_string()),
        });
    }

    let leftover = units.remainder().len();
    if leftover > 0 {
        log::warn!(
            "dropping truncated trailing FASTQ block ({} leftover line{})",
            leftover,
            if leftover == 1 { "" } else { "s" }
        );
    }

    records
}
