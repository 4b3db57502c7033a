use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Input format, detected from the first non-blank line of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceFormat {
    Fasta,
    Fastq,
}

impl fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceFormat::Fasta => write!(f, "FASTA"),
            SequenceFormat::Fastq => write!(f, "FASTQ"),
        }
    }
}

/// One entry as read from the input, in file order.
///
/// `quality` is only present for FASTQ records. It is stored verbatim and
/// never interpreted; a quality string whose length differs from the
/// sequence is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub header: String,
    pub sequence: String,
    pub quality: Option<String>,
}

/// Closed set of per-record validation failures.
///
/// The order of variants matches rule evaluation order, so an error list
/// on a record is always sorted by rule number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ErrorCode {
    EmptySequence,
    InvalidCharacters,
    BelowMinLength,
    DuplicateHeader,
    LowComplexity,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorCode::EmptySequence => "empty sequence",
            ErrorCode::InvalidCharacters => "invalid characters",
            ErrorCode::BelowMinLength => "below minimum length",
            ErrorCode::DuplicateHeader => "duplicate header",
            ErrorCode::LowComplexity => "low complexity",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of validating one [`RawRecord`].
///
/// `final_sequence` equals `original_sequence` unless sanitization was
/// enabled, in which case it is the sanitized text. Lengths are counted
/// in characters; sanitization is a 1:1 substitution, so both sequences
/// always have the same character count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    pub header: String,
    pub original_sequence: String,
    pub final_sequence: String,
    pub is_valid: bool,
    /// Errors in detection order (rule order, not severity).
    pub errors: Vec<ErrorCode>,
    pub length: usize,
    /// Fraction of G/C bases in `final_sequence`, in [0, 1]. Zero-length
    /// sequences report 0 by convention.
    pub gc_content: f64,
    /// Characters outside the allowed alphabet in the original sequence,
    /// counted before any sanitization.
    pub invalid_char_count: usize,
}

impl ValidatedRecord {
    /// True if sanitization changed the sequence text.
    pub fn was_sanitized(&self) -> bool {
        self.final_sequence != self.original_sequence
    }
}

/// A top-ranked record in the length ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEntry {
    pub header: String,
    pub length: usize,
}

/// Aggregate metrics over one validated dataset.
///
/// An empty dataset produces the all-zero default rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_count: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Records whose final sequence differs from the original.
    pub sanitized_count: usize,
    /// Unweighted mean of per-record GC fractions.
    pub avg_gc_content: f64,
    pub min_length: usize,
    pub max_length: usize,
    pub avg_length: f64,
    pub median_length: usize,
    pub total_length: u64,
    /// Records exhibiting each error code. A record with several errors
    /// contributes to several buckets.
    pub error_histogram: BTreeMap<ErrorCode, usize>,
    /// Up to ten longest records, descending by length, ties broken by
    /// earlier file position.
    pub top_longest: Vec<TopEntry>,
}
