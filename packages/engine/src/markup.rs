//! HTML markup tokenizer
//!
//! A small scanner: tags (`<...>`) and entities (`&name;`,
//! `&#123;`) are matched sequentially, everything in between is text. There
//! is no DOM and no validation, so malformed markup degrades to literal
//! text instead of failing. Text inside an anchor is reported as
//! [`MarkupToken::Skip`].

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Tag or entity span.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MARKUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<[^>]+>)|(&[a-zA-Z0-9#]+;)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANCHOR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<a(?:\s|>)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANCHOR_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^</a\s*>").expect("valid regex"));

/// A span of HTML markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MarkupToken<'a> {
    /// Text content outside of anchors
    Text(&'a str),
    /// Opening, closing or self-closing tag
    Tag(&'a str),
    /// Named or numeric character reference
    Entity(&'a str),
    /// Text content inside an anchor
    Skip(&'a str),
}

impl<'a> MarkupToken<'a> {
    /// The exact input slice this token covers.
    pub fn value(&self) -> &'a str {
        match self {
            MarkupToken::Text(value)
            | MarkupToken::Tag(value)
            | MarkupToken::Entity(value)
            | MarkupToken::Skip(value) => value,
        }
    }
}

/// Check if text contains anything that looks like a tag or an entity.
pub fn is_html(text: &str) -> bool {
    MARKUP_PATTERN.is_match(text)
}

/// Split markup into tag, entity, text and skip tokens.
///
/// # Examples
/// ```
/// use softhyphen_engine::markup::{parse_html, MarkupToken};
///
/// let tokens = parse_html("<p>Hallo&nbsp;Welt</p>");
/// assert_eq!(
///     tokens,
///     vec![
///         MarkupToken::Tag("<p>"),
///         MarkupToken::Text("Hallo"),
///         MarkupToken::Entity("&nbsp;"),
///         MarkupToken::Text("Welt"),
///         MarkupToken::Tag("</p>"),
///     ]
/// );
/// ```
pub fn parse_html(markup: &str) -> Vec<MarkupToken<'_>> {
    let mut tokens = Vec::new();
    let mut inside_anchor = false;
    let mut last = 0;

    for span in MARKUP_PATTERN.find_iter(markup) {
        push_text(&mut tokens, &markup[last..span.start()], inside_anchor);

        let value = span.as_str();
        if value.starts_with('<') {
            if ANCHOR_OPEN.is_match(value) {
                inside_anchor = true;
            } else if ANCHOR_CLOSE.is_match(value) {
                inside_anchor = false;
            }
            tokens.push(MarkupToken::Tag(value));
        } else {
            tokens.push(MarkupToken::Entity(value));
        }

        last = span.end();
    }

    push_text(&mut tokens, &markup[last..], inside_anchor);

    tokens
}

fn push_text<'a>(tokens: &mut Vec<MarkupToken<'a>>, text: &'a str, inside_anchor: bool) {
    if text.is_empty() {
        return;
    }
    tokens.push(if inside_anchor {
        MarkupToken::Skip(text)
    } else {
        MarkupToken::Text(text)
    });
}

/// Concatenate token values back into markup.
pub fn reconstruct_html(tokens: &[MarkupToken<'_>]) -> String {
    tokens.iter().map(MarkupToken::value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_html() {
        assert!(is_html("<p>Text</p>"));
        assert!(is_html("Preis&nbsp;inkl."));
        assert!(is_html("&#173;"));
        assert!(!is_html("Ladungssicherung"));
        assert!(!is_html("a < b & c"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_html("").is_empty());
    }

    #[test]
    fn test_plain_text_is_single_token() {
        assert_eq!(parse_html("Nur Text"), vec![MarkupToken::Text("Nur Text")]);
    }

    #[test]
    fn test_anchor_text_is_skipped() {
        let tokens = parse_html(r#"Siehe <a href="https://example.com">Ladungssicherung</a> hier"#);
        assert_eq!(
            tokens,
            vec![
                MarkupToken::Text("Siehe "),
                MarkupToken::Tag(r#"<a href="https://example.com">"#),
                MarkupToken::Skip("Ladungssicherung"),
                MarkupToken::Tag("</a>"),
                MarkupToken::Text(" hier"),
            ]
        );
    }

    #[test]
    fn test_anchor_without_attributes_and_uppercase() {
        let tokens = parse_html("<A>Link</A><abbr>Abk</abbr>");
        assert_eq!(tokens[1], MarkupToken::Skip("Link"));
        assert_eq!(tokens[4], MarkupToken::Text("Abk"));
    }

    #[test]
    fn test_nested_tags_inside_anchor() {
        let tokens = parse_html("<a href='#'><b>fett</b> dünn</a>");
        assert_eq!(tokens[2], MarkupToken::Skip("fett"));
        assert_eq!(tokens[4], MarkupToken::Skip(" dünn"));
    }

    #[test]
    fn test_unmatched_brackets_are_text() {
        assert_eq!(
            parse_html("3 < 4 & 5"),
            vec![MarkupToken::Text("3 < 4 & 5")]
        );
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "",
            "<p>Hallo <strong>Welt</strong></p>",
            r#"<a href="https://example.com">Ladungssicherung</a>"#,
            "Preis&nbsp;&euro;&#8364; <br/> Ende",
            "kaputt <p Text & mehr",
            "<!-- Kommentar --><div class=\"x\">Inhalt</div>",
        ];
        for input in inputs {
            assert_eq!(reconstruct_html(&parse_html(input)), input);
        }
    }
}
