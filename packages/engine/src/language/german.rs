//! German language pack.

use hyphenation::Language;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::pack::{is_numeric, LanguagePack};
use super::special_cases::brand_hyphenation;
use crate::dictionary::Dictionary;
use crate::patterns::Segmenter;

#[allow(clippy::expect_used)] // Embedded dictionary, covered by tests
static DICTIONARY: LazyLock<Dictionary> = LazyLock::new(|| {
    Dictionary::embedded(Language::German1996, 2, 2).expect("embedded German dictionary")
});

/// Break between `c` and `k`, or directly in front of `ck`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("(?i)(?:(c)\u{AD}(k)|\u{AD}(c)(k))").expect("valid regex")
});

/// Breaks inside letter groups that are never split: ch, sch, ph, qu.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INDIVISIBLE: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        "(?i)(c)\u{AD}(h)",
        "(?i)(s)\u{AD}(ch)",
        "(?i)(p)\u{AD}(h)",
        "(?i)(q)\u{AD}(u)",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
});

/// German (`de`).
///
/// Words shorter than five characters and purely numeric tokens are left
/// alone. A break at `ck` turns into `k`+`k`: both "Zuc-ker" and "Zu-cker"
/// become "Zuk-ker".
#[derive(Debug, Clone, Copy, Default)]
pub struct German;

impl LanguagePack for German {
    fn id(&self) -> &str {
        "de"
    }

    fn display_name(&self) -> &str {
        "Deutsch"
    }

    fn min_word_length(&self) -> usize {
        5
    }

    fn patterns(&self) -> &dyn Segmenter {
        &*DICTIONARY
    }

    fn fixed_hyphenation(&self, word: &str) -> Option<String> {
        brand_hyphenation(word).map(str::to_string)
    }

    fn post_process(&self, _original: &str, candidate: String) -> String {
        let repaired = CK_BREAK.replace_all(&candidate, |caps: &Captures| {
            let c = caps.get(1).or_else(|| caps.get(3)).map_or("c", |m| m.as_str());
            let k = caps.get(2).or_else(|| caps.get(4)).map_or("k", |m| m.as_str());
            let doubled = if c == "C" { "K" } else { "k" };
            format!("{doubled}\u{AD}{k}")
        });

        INDIVISIBLE
            .iter()
            .fold(repaired.into_owned(), |text, pattern| {
                pattern.replace_all(&text, "${1}${2}").into_owned()
            })
    }

    fn should_skip(&self, word: &str) -> bool {
        word.chars().count() < self.min_word_length() || is_numeric(word)
    }
}
