//! Report assembly and FASTA re-emission
//!
//! [`Report`] is a shape adapter for exporters: the dataset summary plus
//! the full per-record table, with no computation of its own. Exporters
//! (CSV, JSON, terminal) live with the collaborators; this module only
//! fixes the exportable structure and the FASTA text form.

use serde::{Deserialize, Serialize};

use crate::types::{DatasetSummary, ValidatedRecord};

/// Exportable processing result: summary plus per-record table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub tool_version: String,
    pub summary: DatasetSummary,
    pub records: Vec<ValidatedRecord>,
}

impl Report {
    /// Pure assembly; the caller provides both parts already computed.
    pub fn build(summary: DatasetSummary, records: Vec<ValidatedRecord>) -> Self {
        Self {
            tool_version: crate::VERSION.to_string(),
            summary,
            records,
        }
    }
}

/// Which records a FASTA re-emission includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastaSelection {
    All,
    /// Only records the sanitizer actually changed.
    SanitizedOnly,
}

/// Sequence line width of re-emitted FASTA.
pub const FASTA_LINE_WIDTH: usize = 60;

/// Re-emit records as FASTA text using the final sequences.
///
/// Sequence lines wrap at [`FASTA_LINE_WIDTH`] columns. Records with no
/// bases are skipped; there is nothing to write for them.
pub fn write_fasta(records: &[ValidatedRecord], selection: FastaSelection) -> String {
    let mut out = String::new();

    for record in records {
        if selection == FastaSelection::SanitizedOnly && !record.was_sanitized() {
            continue;
        }
        if record.final_sequence.is_empty() {
            continue;
        }

        out.push('>');
        out.push_str(&record.header);
        out.push('\n');

        let chars: Vec<char> = record.final_sequence.chars().collect();
        for line in chars.chunks(FASTA_LINE_WIDTH) {
            out.extend(line.iter());
            out.push('\n');
        }
    }

    out
}
