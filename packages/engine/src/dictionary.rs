//! Embedded TeX hyphenation dictionaries
//!
//! The built-in language packs segment with the canonical hyph-utf8 tables
//! (`hyph-de-1996`, `hyph-en-us`) that ship precompiled with the
//! `hyphenation` crate. Matching and exceptions are handled there; this
//! wrapper maps the byte offsets it reports to character positions and
//! applies the pack's own `leftmin`/`rightmin`.

use hyphenation::{Hyphenator, Language, Load, Standard};

use crate::error::{EngineError, Result};
use crate::patterns::{lowercase, Segmenter};

/// Canonical pattern dictionary for one language.
pub struct Dictionary {
    standard: Standard,
    leftmin: usize,
    rightmin: usize,
}

impl Dictionary {
    /// Load an embedded dictionary.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Dictionary` if the embedded data cannot be decoded.
    pub fn embedded(language: Language, leftmin: usize, rightmin: usize) -> Result<Self> {
        let name = format!("{language:?}");
        let standard = Standard::from_embedded(language).map_err(|err| EngineError::Dictionary {
            language: name,
            reason: err.to_string(),
        })?;

        Ok(Self {
            standard,
            leftmin: leftmin.max(1),
            rightmin: rightmin.max(1),
        })
    }
}

impl Segmenter for Dictionary {
    fn leftmin(&self) -> usize {
        self.leftmin
    }

    fn rightmin(&self) -> usize {
        self.rightmin
    }

    fn break_points(&self, word: &str) -> Vec<usize> {
        // One char per char, so positions in `lower` are positions in `word`
        let lower: String = word.chars().map(lowercase).collect();
        let len = lower.chars().count();
        if len < self.leftmin + self.rightmin {
            return Vec::new();
        }

        let offsets: Vec<usize> = lower.char_indices().map(|(index, _)| index).collect();
        self.standard
            .hyphenate(&lower)
            .breaks
            .iter()
            .filter_map(|byte| offsets.binary_search(byte).ok())
            .filter(|&position| position >= self.leftmin && position <= len - self.rightmin)
            .collect()
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("leftmin", &self.leftmin)
            .field("rightmin", &self.rightmin)
            .finish_non_exhaustive()
    }
}
