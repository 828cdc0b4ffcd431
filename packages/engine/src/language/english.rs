//! English language pack.

use hyphenation::Language;
use std::sync::LazyLock;

use super::pack::{is_numeric, LanguagePack};
use super::special_cases::brand_hyphenation;
use crate::dictionary::Dictionary;
use crate::patterns::Segmenter;

#[allow(clippy::expect_used)] // Embedded dictionary, covered by tests
static DICTIONARY: LazyLock<Dictionary> = LazyLock::new(|| {
    Dictionary::embedded(Language::EnglishUS, 2, 3).expect("embedded English dictionary")
});

/// English (`en`). Words shorter than six characters and purely numeric
/// tokens are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl LanguagePack for English {
    fn id(&self) -> &str {
        "en"
    }

    fn display_name(&self) -> &str {
        "English"
    }

    fn min_word_length(&self) -> usize {
        6
    }

    fn patterns(&self) -> &dyn Segmenter {
        &*DICTIONARY
    }

    fn fixed_hyphenation(&self, word: &str) -> Option<String> {
        brand_hyphenation(word).map(str::to_string)
    }

    fn should_skip(&self, word: &str) -> bool {
        word.chars().count() < self.min_word_length() || is_numeric(word)
    }
}
