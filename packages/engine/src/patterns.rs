//! Liang pattern tables and syllable segmentation
//!
//! A pattern interleaves letters with digit weights, e.g. `1ha`, `c2h` or
//! `hen5at`. The digit in front of a letter is the weight of a break before
//! that letter; a trailing digit is the weight of a break after the last
//! letter. `.` marks a word boundary.
//!
//! To segment a word, every substring of `.word.` that matches a pattern
//! contributes its weights; at each inter-letter position the highest weight
//! wins. Odd weights permit a break, even weights forbid it. Breaks closer
//! than `leftmin` characters to the start or `rightmin` characters to the end
//! are suppressed.
//!
//! # Example
//!
//! ```
//! use softhyphen_engine::patterns::{PatternTable, Segmenter};
//!
//! let table = PatternTable::parse("hy3ph he2n hena4 hen5at 1na n2at 1tio 2io o2n", 2, 3).unwrap();
//! assert_eq!(table.segment("hyphenation"), vec!["hy", "phen", "ation"]);
//! ```
//!
//! Table sources follow the TeX `.pat` convention: patterns are separated by
//! whitespace and `%` starts a comment that runs to the end of the line.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{EngineError, Result};

/// Word boundary marker used in patterns.
const BOUNDARY: char = '.';

/// Computes break positions for single words.
///
/// Implemented by [`PatternTable`] for `.pat` sources and by
/// [`Dictionary`](crate::dictionary::Dictionary) for the embedded TeX tables.
pub trait Segmenter: Send + Sync {
    /// Minimum number of characters kept together at the start of a word.
    fn leftmin(&self) -> usize;

    /// Minimum number of characters kept together at the end of a word.
    fn rightmin(&self) -> usize;

    /// Compute permitted break positions for a word.
    ///
    /// Positions are character offsets into `word`: a value `p` means a break
    /// is allowed between character `p - 1` and character `p`. Matching is
    /// case-insensitive.
    fn break_points(&self, word: &str) -> Vec<usize>;

    /// Split a word into fragments at its permitted break positions.
    ///
    /// Fragments borrow from `word` and keep its original casing. A word
    /// without any permitted break comes back as a single fragment.
    fn segment<'w>(&self, word: &'w str) -> Vec<&'w str> {
        split_at(word, &self.break_points(word))
    }
}

/// Immutable pattern table for one language.
#[derive(Debug, Clone)]
pub struct PatternTable {
    /// Letters of a pattern -> weights (one more entry than letters)
    patterns: HashMap<String, Vec<u8>>,
    /// Length in characters of the longest pattern
    max_len: usize,
    leftmin: usize,
    rightmin: usize,
}

impl PatternTable {
    /// Parse a pattern table from `.pat` source text.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPattern` if an entry has no letters or
    /// carries two adjacent digits.
    pub fn parse(source: &str, leftmin: usize, rightmin: usize) -> Result<Self> {
        let entries = source
            .lines()
            .map(|line| line.split('%').next().unwrap_or_default())
            .flat_map(str::split_whitespace);

        Self::from_patterns(entries, leftmin, rightmin)
    }

    /// Build a pattern table from individual pattern strings.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidPattern` for malformed entries.
    pub fn from_patterns<'a>(
        patterns: impl IntoIterator<Item = &'a str>,
        leftmin: usize,
        rightmin: usize,
    ) -> Result<Self> {
        let mut table: HashMap<String, Vec<u8>> = HashMap::new();
        let mut max_len = 0;

        for pattern in patterns {
            let (letters, weights) = parse_pattern(pattern)?;
            max_len = max_len.max(weights.len() - 1);
            match table.entry(letters) {
                // Same letters, different weights (`1ch` and `c2h`)
                Entry::Occupied(mut entry) => merge_weights(entry.get_mut(), &weights),
                Entry::Vacant(entry) => {
                    entry.insert(weights);
                }
            }
        }

        Ok(Self {
            patterns: table,
            max_len,
            leftmin: leftmin.max(1),
            rightmin: rightmin.max(1),
        })
    }

    /// Number of patterns in the table.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the table has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Segmenter for PatternTable {
    fn leftmin(&self) -> usize {
        self.leftmin
    }

    fn rightmin(&self) -> usize {
        self.rightmin
    }

    fn break_points(&self, word: &str) -> Vec<usize> {
        let letters: Vec<char> = word.chars().map(lowercase).collect();
        let len = letters.len();
        if len < self.leftmin + self.rightmin {
            return Vec::new();
        }

        let mut padded = Vec::with_capacity(len + 2);
        padded.push(BOUNDARY);
        padded.extend_from_slice(&letters);
        padded.push(BOUNDARY);

        // points[i] is the weight of a break before padded[i]
        let mut points = vec![0u8; padded.len() + 1];
        let mut key = String::with_capacity(self.max_len * 4);

        for start in 0..padded.len() {
            key.clear();
            let end = padded.len().min(start + self.max_len);
            for &letter in &padded[start..end] {
                key.push(letter);
                if let Some(weights) = self.patterns.get(key.as_str()) {
                    for (offset, &weight) in weights.iter().enumerate() {
                        let slot = &mut points[start + offset];
                        *slot = (*slot).max(weight);
                    }
                }
            }
        }

        (self.leftmin..=len - self.rightmin)
            .filter(|&position| points[position + 1] % 2 == 1)
            .collect()
    }
}

/// Split `word` at character positions.
fn split_at<'w>(word: &'w str, breaks: &[usize]) -> Vec<&'w str> {
    if breaks.is_empty() {
        return vec![word];
    }

    let offsets: Vec<usize> = word.char_indices().map(|(index, _)| index).collect();
    let mut fragments = Vec::with_capacity(breaks.len() + 1);
    let mut last = 0;

    for &position in breaks {
        let Some(&byte) = offsets.get(position) else {
            break;
        };
        fragments.push(&word[last..byte]);
        last = byte;
    }
    fragments.push(&word[last..]);

    fragments
}

/// Keep the higher weight at every position.
fn merge_weights(existing: &mut [u8], weights: &[u8]) {
    for (slot, &weight) in existing.iter_mut().zip(weights) {
        *slot = (*slot).max(weight);
    }
}

/// Split a pattern into its letters and weights.
fn parse_pattern(pattern: &str) -> Result<(String, Vec<u8>)> {
    let invalid = |reason: &str| EngineError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut letters = String::new();
    let mut weights = vec![0u8];
    let mut after_digit = false;

    for c in pattern.chars() {
        match c.to_digit(10) {
            Some(digit) => {
                if after_digit {
                    return Err(invalid("adjacent weights"));
                }
                if let Some(last) = weights.last_mut() {
                    // to_digit(10) is always below 10
                    *last = digit as u8;
                }
                after_digit = true;
            }
            None => {
                letters.push(lowercase(c));
                weights.push(0);
                after_digit = false;
            }
        }
    }

    if letters.is_empty() {
        return Err(invalid("pattern has no letters"));
    }

    Ok((letters, weights))
}

/// Single-character lowercase mapping, so character offsets stay aligned.
pub(crate) fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
