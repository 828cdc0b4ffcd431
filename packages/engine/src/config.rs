//! Configuration constants for the hyphenation engine
//!
//! Centralized values used by the orchestrator, the language packs and the
//! worker boundary:
//! - The internal break marker and its HTML entity form
//! - Input size limits (prevent pathological requests)
//! - Default pattern table margins

/// Internal break marker: Unicode SOFT HYPHEN (U+00AD).
///
/// Every stage of the pipeline works with this character. Conversion to the
/// requested output encoding happens once, at the very end.
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// [`SOFT_HYPHEN`] as a string slice, for joining fragments.
pub const SOFT_HYPHEN_STR: &str = "\u{00AD}";

/// Named HTML entity for the soft hyphen.
pub const SOFT_HYPHEN_ENTITY: &str = "&shy;";

/// Maximum input size in bytes accepted at the worker boundary (1 MB).
///
/// A multi-paragraph article is a few kilobytes; anything near this limit is
/// almost certainly not prose meant for a browser.
pub const MAX_INPUT_BYTES: usize = 1_000_000;

/// Default number of characters that must stay together at the start of a word.
pub const DEFAULT_LEFTMIN: usize = 2;

/// Default number of characters that must stay together at the end of a word.
pub const DEFAULT_RIGHTMIN: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_forms_agree() {
        assert_eq!(SOFT_HYPHEN_STR.chars().next(), Some(SOFT_HYPHEN));
        assert_eq!(SOFT_HYPHEN_STR.chars().count(), 1);
        assert_eq!(SOFT_HYPHEN_ENTITY, "&shy;");
    }

    #[test]
    fn test_constants_are_reasonable() {
        assert!(MAX_INPUT_BYTES >= 100_000, "Should allow long articles");
        assert!(MAX_INPUT_BYTES <= 10_000_000, "Should not allow 10MB+");

        assert!(DEFAULT_LEFTMIN >= 1);
        assert!(DEFAULT_RIGHTMIN >= 1);
    }
}
