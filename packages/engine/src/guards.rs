//! Guard classifier: tokens that must never receive a break point.
//!
//! Every pattern is anchored and must match the whole token. A token that
//! is protected is copied to the output verbatim, whatever its length or
//! pattern matches.

use regex::Regex;
use std::sync::LazyLock;

/// URL with an `http`, `https`, `ftp` or `file` scheme.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|ftp|file)://[-A-Za-z0-9+&@#/%?=~_|!:,.;]*[-A-Za-z0-9+&@#/%=~_|]$")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

/// Semantic version (v1.2.3, 2.0.1-beta, ...).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?[0-9]+\.[0-9]+\.[0-9]+(?:-[a-zA-Z0-9.-]+)?$").expect("valid regex")
});

/// Product ID / SKU (TB-100, CR250, ABC-123-XYZ, ...).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PRODUCT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z]{1,4}[-_]?[0-9]{1,6}(?:[-_][A-Z0-9]+)?$").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HASHTAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[A-Za-z0-9_]+$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MENTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[A-Za-z0-9_]+$").expect("valid regex"));

/// Acronyms (NATO, HTML, API). Two letters minimum.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ALL_CAPS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,}$").expect("valid regex"));

/// Inline code span delimited by backticks.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CODE_SPAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^`.*`$").expect("valid regex"));

/// Check if a token must be left untouched.
///
/// Returns `true` for the empty string, URLs, email addresses, semantic
/// versions, product IDs, hashtags, @mentions, all-caps acronyms and inline
/// code spans.
///
/// # Examples
/// ```
/// use softhyphen_engine::guards::should_protect;
///
/// assert!(should_protect("https://www.example.com"));
/// assert!(should_protect("CR250"));
/// assert!(!should_protect("Ladungssicherung"));
/// ```
pub fn should_protect(token: &str) -> bool {
    if token.is_empty() {
        return true;
    }

    [
        &URL_PATTERN,
        &EMAIL_PATTERN,
        &SEMVER_PATTERN,
        &PRODUCT_ID_PATTERN,
        &HASHTAG_PATTERN,
        &MENTION_PATTERN,
        &ALL_CAPS_PATTERN,
        &CODE_SPAN_PATTERN,
    ]
    .iter()
    .any(|pattern| pattern.is_match(token))
}

/// Check if a word already contains a literal hyphen.
pub fn has_existing_hyphen(word: &str) -> bool {
    word.contains('-')
}
