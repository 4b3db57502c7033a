//! seqscrub core engine
//!
//! Ingestion, validation, sanitization and statistical aggregation for
//! FASTA/FASTQ sequence records. The pipeline is a single-threaded pass:
//! parse → validate → summarize → build report. Input text arrives
//! already in memory and results are returned by value; file handling,
//! rendering and persistence belong to the callers.

pub mod parser;
pub mod report;
pub mod sanitize;
pub mod stats;
pub mod types;
pub mod validate;

// Re-export the pipeline surface.
pub use parser::{detect_format, parse, ParseError};
pub use report::{write_fasta, FastaSelection, Report};
pub use sanitize::sanitize;
pub use stats::{gc_fraction, summarize};
pub use types::{
    DatasetSummary, ErrorCode, RawRecord, SequenceFormat, TopEntry, ValidatedRecord,
};
pub use validate::{validate, ComplexityThresholds, ValidateConfig};

/// Version information for the seqscrub core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
