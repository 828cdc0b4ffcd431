//! Plain text tokenizer
//!
//! Splits text into alternating runs of whitespace and non-whitespace.
//! Whitespace is kept verbatim so that concatenating the token values always
//! reproduces the input exactly.

use serde::Serialize;

use crate::guards::should_protect;

/// A span of plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Token<'a> {
    /// A word that may be hyphenated
    Text(&'a str),
    /// A run of whitespace
    Whitespace(&'a str),
    /// A word the guard classifier refuses to touch
    Protected(&'a str),
}

impl<'a> Token<'a> {
    /// The exact input slice this token covers.
    pub fn value(&self) -> &'a str {
        match self {
            Token::Text(value) | Token::Whitespace(value) | Token::Protected(value) => value,
        }
    }
}

/// Split text into whitespace, protected and text tokens.
///
/// # Examples
/// ```
/// use softhyphen_engine::tokenizer::{tokenize, Token};
///
/// let tokens = tokenize("see NATO  rules");
/// assert_eq!(tokens[2], Token::Protected("NATO"));
/// assert_eq!(tokens[3], Token::Whitespace("  "));
/// ```
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (index, c) in text.char_indices() {
        let whitespace = c.is_whitespace();
        match in_whitespace {
            Some(previous) if previous != whitespace => {
                tokens.push(classify(&text[start..index], previous));
                start = index;
            }
            _ => {}
        }
        in_whitespace = Some(whitespace);
    }

    if let Some(whitespace) = in_whitespace {
        tokens.push(classify(&text[start..], whitespace));
    }

    tokens
}

fn classify(run: &str, whitespace: bool) -> Token<'_> {
    if whitespace {
        Token::Whitespace(run)
    } else if should_protect(run) {
        Token::Protected(run)
    } else {
        Token::Text(run)
    }
}

/// Concatenate token values back into a string.
pub fn detokenize(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::value).collect()
}
