//! Soft Hyphen Engine
//!
//! Inserts invisible soft hyphens (U+00AD or `&shy;`) into running text and
//! HTML so that browsers can break long words cleanly.
//! This library provides:
//! - Liang pattern segmentation, with the canonical TeX tables for the
//!   built-in languages
//! - Guarding of URLs, emails, versions, product IDs and acronyms
//! - Markup-aware tokenization that never touches tags or entities
//! - Language packs (German, English) behind an open registry
//! - Custom hyphenations and exclusions through a read-only lookup
//!
//! # Example
//!
//! ```
//! use softhyphen_engine::{hyphenate, HyphenationOptions, LanguageRegistry, OutputEncoding, RuleSnapshot};
//!
//! let options = HyphenationOptions::for_language(&LanguageRegistry::global(), "de")?
//!     .with_encoding(OutputEncoding::Html);
//!
//! let result = hyphenate("Ladungssicherung", &options, &RuleSnapshot::empty());
//! assert!(result.hyphens_inserted >= 1);
//! assert_eq!(result.output.replace("&shy;", ""), "Ladungssicherung");
//! # Ok::<(), softhyphen_engine::EngineError>(())
//! ```

pub mod config;
pub mod detect;
pub mod dictionary;
pub mod error;
pub mod guards;
pub mod hyphenator;
pub mod language;
pub mod markup;
pub mod patterns;
pub mod rules;
pub mod tokenizer;

// Re-export commonly used items
pub use detect::{detect_language, format_confidence, Detection, HeuristicDetector, LanguageDetector};
pub use dictionary::Dictionary;
pub use error::{EngineError, Result};
pub use guards::should_protect;
pub use hyphenator::{
    hyphenate, hyphenate_word, HyphenationOptions, HyphenationResult, OutputEncoding,
};
pub use language::{English, German, LanguagePack, LanguageRegistry};
pub use markup::{is_html, parse_html, reconstruct_html, MarkupToken};
pub use patterns::{PatternTable, Segmenter};
pub use rules::{CustomRule, ExclusionRule, RuleLookup, RuleSnapshot};
pub use tokenizer::{detokenize, tokenize, Token};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
