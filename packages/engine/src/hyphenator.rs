//! Hyphenation orchestrator
//!
//! Drives a document through the tokenizers, runs every word through the
//! per-word pipeline and encodes the break markers once at the end.
//!
//! Per word, in order:
//! 1. Guard-protected tokens and tokens the language pack skips stay as is.
//!    The guard also sees the token without surrounding sentence
//!    punctuation, so `info@example.com.` or `(v2.1.3)` stay whole.
//! 2. Leading and trailing punctuation is split off the core word.
//! 3. Excluded core words stay as is.
//! 4. Compounds (`TÜV-Zertifikate`) are split on `-` and each part goes
//!    through the pipeline again.
//! 5. A custom rule replaces the core word.
//! 6. Core words shorter than the pack minimum stay as is.
//! 7. Fixed hyphenations of the pack (brand names) replace the core word.
//! 8. Otherwise the pattern segmenter runs and the pack post-processes the
//!    joined fragments.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{SOFT_HYPHEN, SOFT_HYPHEN_ENTITY, SOFT_HYPHEN_STR};
use crate::error::Result;
use crate::guards::{has_existing_hyphen, should_protect};
use crate::language::{LanguagePack, LanguageRegistry};
use crate::markup::{is_html, parse_html, MarkupToken};
use crate::patterns::Segmenter;
use crate::rules::RuleLookup;
use crate::tokenizer::{tokenize, Token};

/// Representation of the break marker in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    /// The `&shy;` named entity
    #[default]
    Html,
    /// The U+00AD code point
    Unicode,
}

impl OutputEncoding {
    /// Convert every break marker in `text` to this encoding.
    ///
    /// Both marker forms in the input end up in the requested form, so the
    /// output never mixes them.
    pub fn encode(self, text: String) -> String {
        match self {
            OutputEncoding::Html if text.contains(SOFT_HYPHEN) => {
                text.replace(SOFT_HYPHEN, SOFT_HYPHEN_ENTITY)
            }
            OutputEncoding::Unicode if text.contains(SOFT_HYPHEN_ENTITY) => {
                text.replace(SOFT_HYPHEN_ENTITY, SOFT_HYPHEN_STR)
            }
            _ => text,
        }
    }

    /// Wire name of the encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputEncoding::Html => "html",
            OutputEncoding::Unicode => "unicode",
        }
    }
}

impl std::fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputEncoding::Html),
            "unicode" => Ok(OutputEncoding::Unicode),
            other => Err(format!("unknown encoding '{other}' (expected html or unicode)")),
        }
    }
}

/// Options for a single [`hyphenate`] call.
#[derive(Clone)]
pub struct HyphenationOptions {
    /// Language pack used for every word
    pub language: Arc<dyn LanguagePack>,
    /// Output form of the break marker
    pub encoding: OutputEncoding,
    /// Treat the input as HTML when it contains markup
    pub html_mode: bool,
    /// Leave text inside `<a>` elements untouched
    pub protect_link_text: bool,
}

impl HyphenationOptions {
    /// Options for a language pack: HTML encoding, plain text mode.
    pub fn new(language: Arc<dyn LanguagePack>) -> Self {
        Self {
            language,
            encoding: OutputEncoding::default(),
            html_mode: false,
            protect_link_text: false,
        }
    }

    /// Options for a registered language id.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownLanguage` if `id` is not registered.
    pub fn for_language(registry: &LanguageRegistry, id: &str) -> Result<Self> {
        Ok(Self::new(registry.resolve(id)?))
    }

    /// Set the output encoding.
    pub fn with_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Enable or disable markup handling.
    pub fn with_html_mode(mut self, html_mode: bool) -> Self {
        self.html_mode = html_mode;
        self
    }

    /// Enable or disable hyphenation of anchor text.
    pub fn with_protect_link_text(mut self, protect: bool) -> Self {
        self.protect_link_text = protect;
        self
    }
}

impl std::fmt::Debug for HyphenationOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyphenationOptions")
            .field("language", &self.language.id())
            .field("encoding", &self.encoding)
            .field("html_mode", &self.html_mode)
            .field("protect_link_text", &self.protect_link_text)
            .finish()
    }
}

/// Outcome of a [`hyphenate`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HyphenationResult {
    /// Text with break markers in the requested encoding
    pub output: String,
    /// The unmodified input
    pub input: String,
    /// Id of the language pack used
    pub language: String,
    pub html_mode: bool,
    pub encoding: OutputEncoding,
    /// Word tokens whose output differs from their input
    pub words_processed: usize,
    /// Break markers added (markers already in the input are not counted)
    pub hyphens_inserted: usize,
    /// Wall-clock duration of the call
    pub processing_time_ms: f64,
}

impl HyphenationResult {
    /// Result that returns the input unchanged with zero counts.
    pub fn unmodified(
        input: &str,
        language: impl Into<String>,
        encoding: OutputEncoding,
        html_mode: bool,
    ) -> Self {
        Self {
            output: input.to_string(),
            input: input.to_string(),
            language: language.into(),
            html_mode,
            encoding,
            words_processed: 0,
            hyphens_inserted: 0,
            processing_time_ms: 0.0,
        }
    }
}

/// Hyphenate a document.
///
/// Markup handling is engaged only when `options.html_mode` is set and the
/// text actually contains a tag or entity. Tags and entities are never
/// modified; anchor text is hyphenated unless
/// `options.protect_link_text` is set.
///
/// # Examples
/// ```
/// use softhyphen_engine::{hyphenate, HyphenationOptions, LanguageRegistry, OutputEncoding, RuleSnapshot};
///
/// let registry = LanguageRegistry::with_builtin();
/// let options = HyphenationOptions::for_language(&registry, "de")
///     .unwrap()
///     .with_encoding(OutputEncoding::Unicode);
///
/// let result = hyphenate("Zucker", &options, &RuleSnapshot::empty());
/// assert_eq!(result.output, "Zuk\u{AD}ker");
/// ```
pub fn hyphenate(
    text: &str,
    options: &HyphenationOptions,
    rules: &dyn RuleLookup,
) -> HyphenationResult {
    let start = Instant::now();
    let mut pass = DocumentPass {
        words: WordPipeline {
            pack: options.language.as_ref(),
            rules,
        },
        words_processed: 0,
        hyphens_inserted: 0,
    };

    let output = if options.html_mode && is_html(text) {
        parse_html(text)
            .iter()
            .map(|token| match token {
                MarkupToken::Text(value) => pass.process_text(value),
                MarkupToken::Skip(value) if !options.protect_link_text => {
                    pass.process_text(value)
                }
                other => other.value().to_string(),
            })
            .collect()
    } else {
        pass.process_text(text)
    };

    let output = options.encoding.encode(output);
    let elapsed = start.elapsed();

    tracing::debug!(
        language = options.language.id(),
        html = options.html_mode,
        words_processed = pass.words_processed,
        hyphens_inserted = pass.hyphens_inserted,
        duration_us = elapsed.as_micros() as u64,
        "Hyphenated text"
    );

    HyphenationResult {
        output,
        input: text.to_string(),
        language: options.language.id().to_string(),
        html_mode: options.html_mode,
        encoding: options.encoding,
        words_processed: pass.words_processed,
        hyphens_inserted: pass.hyphens_inserted,
        processing_time_ms: elapsed.as_secs_f64() * 1000.0,
    }
}

/// Hyphenate a single word with the internal U+00AD marker.
pub fn hyphenate_word(word: &str, language: &dyn LanguagePack, rules: &dyn RuleLookup) -> String {
    WordPipeline {
        pack: language,
        rules,
    }
    .run(word)
    .into_owned()
}

/// Statistics collected over one document.
struct DocumentPass<'o> {
    words: WordPipeline<'o>,
    words_processed: usize,
    hyphens_inserted: usize,
}

impl DocumentPass<'_> {
    fn process_text(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len() + text.len() / 4);

        for token in tokenize(text) {
            match token {
                Token::Text(word) => {
                    let processed = self.words.run(word);
                    if processed != word {
                        self.words_processed += 1;
                        self.hyphens_inserted +=
                            count_markers(&processed).saturating_sub(count_markers(word));
                    }
                    output.push_str(&processed);
                }
                other => output.push_str(other.value()),
            }
        }

        output
    }
}

/// Per-word pipeline bound to one language pack and rule set.
struct WordPipeline<'o> {
    pack: &'o dyn LanguagePack,
    rules: &'o dyn RuleLookup,
}

impl WordPipeline<'_> {
    fn run<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if is_guarded(word) || self.pack.should_skip(word) {
            return Cow::Borrowed(word);
        }

        let (leading, core, trailing) = split_punctuation(word);
        if should_protect(core) || self.rules.is_excluded(core) || has_markers(core) {
            return Cow::Borrowed(word);
        }

        let processed = if has_existing_hyphen(core) {
            let parts: Vec<Cow<'_, str>> = core
                .split('-')
                .map(|part| {
                    if self.rules.is_excluded(part) {
                        Cow::Borrowed(part)
                    } else {
                        self.run(part)
                    }
                })
                .collect();
            parts.join("-")
        } else if let Some(custom) = self.rules.custom_hyphenation(core) {
            custom.to_string()
        } else if core.chars().count() < self.pack.min_word_length() {
            return Cow::Borrowed(word);
        } else if let Some(fixed) = self.pack.fixed_hyphenation(core) {
            fixed
        } else {
            let fragments = self.pack.patterns().segment(core);
            if fragments.len() <= 1 {
                return Cow::Borrowed(word);
            }
            self.pack
                .post_process(core, fragments.join(SOFT_HYPHEN_STR))
        };

        let processed = if has_existing_hyphen(&processed) {
            strip_markers_next_to_hyphens(&processed)
        } else {
            processed
        };

        if processed == core {
            return Cow::Borrowed(word);
        }

        Cow::Owned(format!("{leading}{processed}{trailing}"))
    }
}

/// Check the guard on the token as written and without sentence punctuation.
fn is_guarded(token: &str) -> bool {
    should_protect(token) || {
        let stripped = token.trim_matches(is_sentence_punctuation);
        stripped.len() != token.len() && should_protect(stripped)
    }
}

/// Punctuation that can touch a guarded token in running text. `#`, `@`
/// and backticks belong to the token itself.
fn is_sentence_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\''
            | '„' | '“' | '”' | '‚' | '‘' | '’' | '«' | '»' | '‹' | '›'
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a token into leading punctuation, core word and trailing punctuation.
fn split_punctuation(token: &str) -> (&str, &str, &str) {
    let rest = token.trim_start_matches(|c: char| !is_word_char(c));
    let leading = &token[..token.len() - rest.len()];
    let core = rest.trim_end_matches(|c: char| !is_word_char(c));
    let trailing = &rest[core.len()..];
    (leading, core, trailing)
}

/// Remove break markers directly before or after a literal hyphen.
fn strip_markers_next_to_hyphens(text: &str) -> String {
    text.replace("-\u{AD}", "-").replace("\u{AD}-", "-")
}

/// Check if a word already carries break markers in either form.
fn has_markers(text: &str) -> bool {
    text.contains(SOFT_HYPHEN) || text.contains(SOFT_HYPHEN_ENTITY)
}

fn count_markers(text: &str) -> usize {
    text.matches(SOFT_HYPHEN).count()
}
