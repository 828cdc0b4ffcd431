//! Heuristic German/English language detection
//!
//! Used only to pick a language pack when the caller asks for automatic
//! selection. German gets points for umlauts, `ß`, typical letter groups and
//! function words; English for function words and words starting with `th`
//! or `wh`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Texts shorter than this (in characters, after trimming) default to German.
const MIN_TEXT_CHARS: usize = 10;

/// Upper bound on the reported confidence.
const MAX_CONFIDENCE: f64 = 0.95;

/// Confidence reported when there is no usable signal.
const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Letter groups typical for German, weighted 3 per occurrence.
const GERMAN_LETTER_GROUPS: &[&str] = &[
    "ä", "ö", "ü", "ß", "äu", "eu", "ei", "ie", "sch", "ch", "ck", "tz", "dt",
];

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GERMAN_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:der|die|das|und|ist|ein|eine|nicht|mit|auf|für|von|dem|den|sich|auch|werden|können|über|nach)\b",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENGLISH_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:the|and|is|are|was|were|to|of|in|for|on|with|at|by|from|as|this|that|which|or)\b",
    )
    .expect("valid regex")
});

/// Word-initial `th` and `wh`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENGLISH_ONSETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:th|wh)").expect("valid regex"));

/// Outcome of language detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Language id (`de` or `en`)
    pub language: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl Detection {
    fn new(language: &str, confidence: f64) -> Self {
        Self {
            language: language.to_string(),
            confidence,
        }
    }
}

/// Oracle that picks a language id for a text.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Detection;
}

/// The built-in German/English heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDetector;

impl LanguageDetector for HeuristicDetector {
    fn detect(&self, text: &str) -> Detection {
        detect_language(text)
    }
}

/// Detect whether a text is German or English.
///
/// # Examples
/// ```
/// use softhyphen_engine::detect::detect_language;
///
/// let detection = detect_language("Die Straße ist für alle da.");
/// assert_eq!(detection.language, "de");
/// ```
pub fn detect_language(text: &str) -> Detection {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Detection::new("de", NEUTRAL_CONFIDENCE);
    }

    let lower = text.to_lowercase();

    let german_score = GERMAN_LETTER_GROUPS
        .iter()
        .map(|group| lower.matches(group).count() * 3)
        .sum::<usize>()
        + GERMAN_WORDS.find_iter(&lower).count() * 2;

    let english_score = ENGLISH_WORDS.find_iter(&lower).count() * 2
        + ENGLISH_ONSETS.find_iter(&lower).count() * 2;

    let total = german_score + english_score;
    if total == 0 {
        return Detection::new("en", NEUTRAL_CONFIDENCE);
    }

    let (language, score) = if german_score > english_score {
        ("de", german_score)
    } else {
        ("en", english_score)
    };

    Detection::new(language, (score as f64 / total as f64).min(MAX_CONFIDENCE))
}

/// Render a confidence as a rounded percentage, e.g. `85%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}
