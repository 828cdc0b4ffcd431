//! Shared helpers for step definitions

/// Show break markers of either encoding as `|`.
pub fn show_breaks(text: &str) -> String {
    text.replace('\u{AD}', "|").replace("&shy;", "|")
}
