//! Language pack trait definition.

use crate::patterns::Segmenter;

/// Trait for language packs.
///
/// Packs are constructed once and are immutable afterwards, so a single
/// instance can be shared by every concurrent hyphenation call.
pub trait LanguagePack: Send + Sync {
    /// Two-letter language code (`de`, `en`).
    fn id(&self) -> &str;

    /// Human readable name of the language.
    fn display_name(&self) -> &str;

    /// Minimum length in characters of a core word before hyphenation is attempted.
    fn min_word_length(&self) -> usize;

    /// Pattern table used by the segmenter.
    fn patterns(&self) -> &dyn Segmenter;

    /// Fixed hyphenation for a known word, bypassing the segmenter.
    ///
    /// Default implementation knows no words.
    fn fixed_hyphenation(&self, _word: &str) -> Option<String> {
        None
    }

    /// Adjust a segmented candidate before it is used.
    ///
    /// # Arguments
    /// * `original` - The core word as it appeared in the input
    /// * `candidate` - Fragments joined with the soft hyphen marker
    ///
    /// Default implementation returns the candidate unchanged.
    fn post_process(&self, _original: &str, candidate: String) -> String {
        candidate
    }

    /// Check if a token must not be hyphenated at all.
    ///
    /// Default implementation skips tokens shorter than [`min_word_length`].
    ///
    /// [`min_word_length`]: LanguagePack::min_word_length
    fn should_skip(&self, word: &str) -> bool {
        word.chars().count() < self.min_word_length()
    }
}

/// Check if a token consists of ASCII digits only.
pub(crate) fn is_numeric(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}
