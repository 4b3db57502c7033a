//! Per-record rule evaluation
//!
//! Applies the validation rules to each parsed record, in a fixed order
//! that also fixes the order of reported errors: empty sequence, invalid
//! characters, below minimum length, duplicate header, low complexity.
//! Rule failures are data, not control flow: every input record yields
//! exactly one [`ValidatedRecord`], invalid ones included.

use std::collections::{HashMap, HashSet};

use crate::sanitize::{is_allowed_base, sanitize};
use crate::stats::gc_fraction;
use crate::types::{ErrorCode, RawRecord, ValidatedRecord};

/// Settings for one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidateConfig {
    /// Run the sanitizer before scoring length and complexity rules.
    /// Invalid-character detection always inspects the original text.
    pub sanitize: bool,
    /// Records strictly shorter than this are flagged.
    pub min_length: usize,
    pub complexity: ComplexityThresholds,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            sanitize: false,
            min_length: 20,
            complexity: ComplexityThresholds::default(),
        }
    }
}

/// Tunable constants of the low-complexity heuristic.
///
/// A sequence of at least `min_scored_len` characters is low-complexity
/// when its most frequent character makes up at least `dominant_fraction`
/// of the length, or when for some unit length `k` in
/// `1..=max_repeat_unit` the fraction of positions `i >= k` with
/// `s[i] == s[i-k]`, out of `len - k`, reaches `repeat_fraction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexityThresholds {
    pub min_scored_len: usize,
    pub dominant_fraction: f64,
    pub repeat_fraction: f64,
    pub max_repeat_unit: usize,
}

impl Default for ComplexityThresholds {
    fn default() -> Self {
        Self {
            min_scored_len: 10,
            dominant_fraction: 0.80,
            repeat_fraction: 0.90,
            max_repeat_unit: 3,
        }
    }
}

/// Validate records in file order, 1:1 and order-preserving.
///
/// Duplicate-header detection uses a seen-set scoped to this call and
/// built incrementally, so the first occurrence of a header is never
/// flagged and concurrent invocations cannot interfere.
pub fn validate(records: &[RawRecord], config: &ValidateConfig) -> Vec<ValidatedRecord> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut validated = Vec::with_capacity(records.len());

    for record in records {
        let duplicate = !seen.insert(record.header.as_str());
        validated.push(validate_record(record, duplicate, config));
    }

    validated
}

fn validate_record(
    record: &RawRecord,
    duplicate: bool,
    config: &ValidateConfig,
) -> ValidatedRecord {
    let original = record.sequence.clone();
    let mut errors = Vec::new();

    // Rule 1. An empty sequence short-circuits the content rules below,
    // but not the duplicate-header rule.
    let empty = original.is_empty();
    if empty {
        errors.push(ErrorCode::EmptySequence);
    }

    // Counted on the pre-sanitization text so sanitization never masks
    // the detection.
    let invalid_char_count = original.chars().filter(|&c| !is_allowed_base(c)).count();

    let final_sequence = if config.sanitize {
        sanitize(&original)
    } else {
        original.clone()
    };
    let length = final_sequence.chars().count();

    if !empty {
        // Rule 2.
        if invalid_char_count > 0 {
            errors.push(ErrorCode::InvalidCharacters);
        }
        // Rule 3, scored on the final sequence.
        if length < config.min_length {
            errors.push(ErrorCode::BelowMinLength);
        }
    }
    // Rule 4.
    if duplicate {
        errors.push(ErrorCode::DuplicateHeader);
    }
    // Rule 5, scored on the final sequence.
    if !empty && is_low_complexity(&final_sequence, &config.complexity) {
        errors.push(ErrorCode::LowComplexity);
    }

    let gc_content = gc_fraction(&final_sequence);

    ValidatedRecord {
        header: record.header.clone(),
        original_sequence: original,
        is_valid: errors.is_empty(),
        errors,
        length,
        gc_content,
        invalid_char_count,
        final_sequence,
    }
}

/// Low-complexity heuristic, case-insensitive. See
/// [`ComplexityThresholds`] for the exact formula.
pub fn is_low_complexity(sequence: &str, thresholds: &ComplexityThresholds) -> bool {
    let chars: Vec<char> = sequence.chars().map(|c| c.to_ascii_uppercase()).collect();
    let len = chars.len();
    if len < thresholds.min_scored_len {
        return false;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for &c in &chars {
        *counts.entry(c).or_insert(0) += 1;
    }
    let dominant = counts.values().copied().max().unwrap_or(0);
    if dominant as f64 / len as f64 >= thresholds.dominant_fraction {
        return true;
    }

    for k in 1..=thresholds.max_repeat_unit.min(len - 1) {
        let matches = (k..len).filter(|&i| chars[i] == chars[i - k]).count();
        if matches as f64 / (len - k) as f64 >= thresholds.repeat_fraction {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(header: &str, sequence: &str) -> RawRecord {
        RawRecord {
            header: header.to_string(),
            sequence: sequence.to_string(),
            quality: None,
        }
    }

    fn config(min_length: usize, sanitize: bool) -> ValidateConfig {
        ValidateConfig {
            sanitize,
            min_length,
            ..ValidateConfig::default()
        }
    }

    #[test]
    fn test_valid_records() {
        let records = vec![raw("a", "ACGT"), raw("b", "ACGTN")];
        let validated = validate(&records, &config(3, false));

        assert_eq!(validated.len(), 2);
        for v in &validated {
            assert!(v.is_valid);
            assert!(v.errors.is_empty());
            assert_eq!(v.invalid_char_count, 0);
        }
        assert_eq!(validated[0].length, 4);
        assert_eq!(validated[1].length, 5);
        assert!((validated[0].gc_content - 0.5).abs() < 1e-12);
        assert!((validated[1].gc_content - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_below_min_length_is_strict() {
        let records = vec![raw("a", "ACGTA"), raw("b", "ACGT")];
        let validated = validate(&records, &config(5, false));

        assert!(validated[0].is_valid);
        assert_eq!(validated[1].errors, vec![ErrorCode::BelowMinLength]);
    }

    #[test]
    fn test_invalid_characters_counted() {
        let records = vec![raw("a", "ACXTZ")];
        let validated = validate(&records, &config(3, false));

        assert_eq!(validated[0].errors, vec![ErrorCode::InvalidCharacters]);
        assert_eq!(validated[0].invalid_char_count, 2);
        assert_eq!(validated[0].final_sequence, "ACXTZ");
    }

    #[test]
    fn test_lowercase_is_not_invalid() {
        let records = vec![raw("a", "acgtn")];
        let validated = validate(&records, &config(3, false));

        assert!(validated[0].is_valid);
        assert_eq!(validated[0].final_sequence, "acgtn");
    }

    #[test]
    fn test_sanitize_never_clears_invalid_characters() {
        // The sequence is repaired but the record stays invalid.
        let records = vec![raw("a", "ACXT")];
        let validated = validate(&records, &config(3, true));

        assert_eq!(validated[0].final_sequence, "ACNT");
        assert_eq!(validated[0].original_sequence, "ACXT");
        assert_eq!(validated[0].errors, vec![ErrorCode::InvalidCharacters]);
        assert!(!validated[0].is_valid);
        assert_eq!(validated[0].invalid_char_count, 1);
    }

    #[test]
    fn test_sanitize_preserves_length() {
        let records = vec![raw("a", "acx-ty")];
        let validated = validate(&records, &config(3, true));

        assert_eq!(
            validated[0].final_sequence.chars().count(),
            validated[0].original_sequence.chars().count()
        );
        assert_eq!(validated[0].length, 6);
    }

    #[test]
    fn test_empty_sequence_short_circuits_content_rules() {
        let validated = validate(&[raw("a", "")], &config(20, false));

        assert_eq!(validated[0].errors, vec![ErrorCode::EmptySequence]);
        assert_eq!(validated[0].length, 0);
        assert_eq!(validated[0].gc_content, 0.0);
        assert_eq!(validated[0].invalid_char_count, 0);
    }

    #[test]
    fn test_duplicate_headers_flag_later_occurrences_only() {
        let records = vec![
            raw("a", "AC"),
            raw("b", "ACGTACGT"),
            raw("a", "ACGTACGT"),
            raw("a", "TTAA"),
        ];
        let validated = validate(&records, &config(1, false));

        assert!(validated[0].is_valid);
        assert!(validated[1].is_valid);
        assert_eq!(validated[2].errors, vec![ErrorCode::DuplicateHeader]);
        assert_eq!(validated[3].errors, vec![ErrorCode::DuplicateHeader]);
    }

    #[test]
    fn test_duplicate_headers_are_case_sensitive() {
        let records = vec![raw("Seq1", "ACGT"), raw("seq1", "ACGT")];
        let validated = validate(&records, &config(1, false));

        assert!(validated[0].is_valid);
        assert!(validated[1].is_valid);
    }

    #[test]
    fn test_duplicate_flagged_on_empty_sequence() {
        let records = vec![raw("a", "ACGT"), raw("a", "")];
        let validated = validate(&records, &config(1, false));

        assert_eq!(
            validated[1].errors,
            vec![ErrorCode::EmptySequence, ErrorCode::DuplicateHeader]
        );
    }

    #[test]
    fn test_error_order_matches_rule_order() {
        // Invalid character, too short for min_length 20, duplicate, and
        // dominant-character low complexity all at once.
        let records = vec![raw("a", "ACGT"), raw("a", "AAAAAAAAAAAX")];
        let validated = validate(&records, &config(20, false));

        assert_eq!(
            validated[1].errors,
            vec![
                ErrorCode::InvalidCharacters,
                ErrorCode::BelowMinLength,
                ErrorCode::DuplicateHeader,
                ErrorCode::LowComplexity,
            ]
        );
    }

    #[test]
    fn test_is_valid_matches_errors_empty() {
        let records = vec![
            raw("a", "ACGTACGTACGTACGTACGTACG"),
            raw("b", ""),
            raw("a", "ACXT"),
        ];
        for v in validate(&records, &config(4, false)) {
            assert_eq!(v.is_valid, v.errors.is_empty());
        }
    }

    #[test]
    fn test_low_complexity_dominant_character() {
        let t = ComplexityThresholds::default();

        // 9 of 10 characters are A.
        assert!(is_low_complexity("AAAAAAAAAT", &t));
        // Case-insensitive.
        assert!(is_low_complexity("aaaaaaaaat", &t));
        // 7 of 10: below the 0.80 threshold, and no short repeat covers it.
        assert!(!is_low_complexity("AAAAAAATGC", &t));
    }

    #[test]
    fn test_low_complexity_repeat_unit() {
        let t = ComplexityThresholds::default();

        // Perfect period-2 repeat.
        assert!(is_low_complexity("ACACACACACAC", &t));
        // Perfect period-3 repeat.
        assert!(is_low_complexity("ACGACGACGACG", &t));
        // Period 4 is outside the unit range and no character dominates.
        assert!(!is_low_complexity("ACGTACGTACGTACGT", &t));
    }

    #[test]
    fn test_low_complexity_skips_short_sequences() {
        let t = ComplexityThresholds::default();
        assert!(!is_low_complexity("AAAAAAAAA", &t)); // 9 < min_scored_len
    }

    #[test]
    fn test_low_complexity_scored_after_sanitization() {
        // All-junk input becomes all-N once sanitized, which the
        // dominant-character rule then catches.
        let records = vec![raw("a", "!!!!!!!!!!")];
        let validated = validate(&records, &config(1, true));

        assert_eq!(validated[0].final_sequence, "NNNNNNNNNN");
        assert!(validated[0]
            .errors
            .contains(&ErrorCode::LowComplexity));
    }
}
