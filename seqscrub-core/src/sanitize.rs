//! Sequence sanitization
//!
//! Normalizes case and replaces anything outside the allowed alphabet
//! with the unknown-base sentinel `N`. Substitution is strictly 1:1 so
//! positional correspondence with the original sequence is preserved.

/// True for characters of the allowed alphabet, case-insensitive.
pub fn is_allowed_base(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | 'N')
}

/// Uppercase the sequence and replace disallowed characters with `N`.
///
/// Pure and idempotent; the character count never changes.
pub fn sanitize(sequence: &str) -> String {
    sequence
        .chars()
        .map(|c| {
            let upper = c.to_ascii_uppercase();
            if is_allowed_base(upper) {
                upper
            } else {
                'N'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_uppercases() {
        assert_eq!(sanitize("acgtn"), "ACGTN");
        assert_eq!(sanitize("AcGt"), "ACGT");
    }

    #[test]
    fn test_sanitize_replaces_disallowed() {
        assert_eq!(sanitize("ACXT"), "ACNT");
        assert_eq!(sanitize("AC-GT R"), "ACNGTNN");
        assert_eq!(sanitize("123"), "NNN");
    }

    #[test]
    fn test_sanitize_preserves_character_count() {
        for input in ["", "ACGT", "acxty-", "uuuu", "A C\tG"] {
            assert_eq!(
                sanitize(input).chars().count(),
                input.chars().count(),
                "length changed for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["", "acgt", "ACXT", "nN-12xyz"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }
}
