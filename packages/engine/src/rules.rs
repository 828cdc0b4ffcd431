//! Read-only lookup of custom hyphenations and exclusions
//!
//! The rule lists are owned by an external store. The orchestrator only sees
//! them through [`RuleLookup`], normally backed by an immutable
//! [`RuleSnapshot`] that is swapped wholesale when the store is refetched.
//!
//! Words are matched case-insensitively: keys are stored lowercase and
//! lookups lowercase their argument.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::{SOFT_HYPHEN_ENTITY, SOFT_HYPHEN_STR};

/// Exact hyphenation override for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRule {
    /// The word as written, without break markers
    pub word: String,
    /// The word with soft hyphens (or `&shy;` entities) at the wanted breaks
    pub hyphenated: String,
}

impl CustomRule {
    /// Create a new custom rule.
    pub fn new(word: impl Into<String>, hyphenated: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            hyphenated: hyphenated.into(),
        }
    }
}

/// A word that must never be hyphenated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionRule {
    pub word: String,
}

impl ExclusionRule {
    /// Create a new exclusion rule.
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

/// Lookup contract consumed by the orchestrator.
pub trait RuleLookup: Send + Sync {
    /// Pre-built hyphenation for a word, with soft hyphen markers.
    fn custom_hyphenation(&self, word: &str) -> Option<&str>;

    /// Check if a word is excluded from hyphenation.
    fn is_excluded(&self, word: &str) -> bool;
}

/// Immutable snapshot of the custom rules and exclusions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSnapshot {
    /// Lowercase word -> hyphenated form with U+00AD markers
    custom: HashMap<String, String>,
    /// Lowercase excluded words
    exclusions: HashSet<String>,
}

impl RuleSnapshot {
    /// Build a snapshot from rule lists.
    ///
    /// Later custom rules for the same word win. `&shy;` entities in stored
    /// forms are converted to the internal marker.
    pub fn new(
        custom_rules: impl IntoIterator<Item = CustomRule>,
        exclusions: impl IntoIterator<Item = ExclusionRule>,
    ) -> Self {
        let custom = custom_rules
            .into_iter()
            .map(|rule| {
                (
                    rule.word.to_lowercase(),
                    rule.hyphenated.replace(SOFT_HYPHEN_ENTITY, SOFT_HYPHEN_STR),
                )
            })
            .collect();

        let exclusions = exclusions
            .into_iter()
            .map(|rule| rule.word.to_lowercase())
            .collect();

        Self { custom, exclusions }
    }

    /// A snapshot without any rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of custom rules.
    pub fn custom_rule_count(&self) -> usize {
        self.custom.len()
    }

    /// Number of excluded words.
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }

    /// Check if the snapshot holds no rules at all.
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty() && self.exclusions.is_empty()
    }
}

impl RuleLookup for RuleSnapshot {
    fn custom_hyphenation(&self, word: &str) -> Option<&str> {
        self.custom.get(&word.to_lowercase()).map(String::as_str)
    }

    fn is_excluded(&self, word: &str) -> bool {
        self.exclusions.contains(&word.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RuleSnapshot {
        RuleSnapshot::new(
            vec![
                CustomRule::new("Sicherung", "Si\u{AD}che\u{AD}rung"),
                CustomRule::new("Gurtband", "Gurt&shy;band"),
            ],
            vec![ExclusionRule::new("Hamburg"), ExclusionRule::new("MERCEDES")],
        )
    }

    #[test]
    fn test_custom_lookup_is_case_insensitive() {
        let rules = snapshot();
        assert_eq!(
            rules.custom_hyphenation("sicherung"),
            Some("Si\u{AD}che\u{AD}rung")
        );
        assert_eq!(
            rules.custom_hyphenation("SICHERUNG"),
            Some("Si\u{AD}che\u{AD}rung")
        );
        assert_eq!(rules.custom_hyphenation("Zucker"), None);
    }

    #[test]
    fn test_entity_form_is_normalized() {
        assert_eq!(
            snapshot().custom_hyphenation("Gurtband"),
            Some("Gurt\u{AD}band")
        );
    }

    #[test]
    fn test_exclusions_are_case_insensitive() {
        let rules = snapshot();
        assert!(rules.is_excluded("hamburg"));
        assert!(rules.is_excluded("Mercedes"));
        assert!(!rules.is_excluded("Bremen"));
    }

    #[test]
    fn test_later_rule_wins() {
        let rules = RuleSnapshot::new(
            vec![
                CustomRule::new("Wort", "W\u{AD}ort"),
                CustomRule::new("wort", "Wo\u{AD}rt"),
            ],
            Vec::new(),
        );
        assert_eq!(rules.custom_rule_count(), 1);
        assert_eq!(rules.custom_hyphenation("Wort"), Some("Wo\u{AD}rt"));
    }

    #[test]
    fn test_empty_snapshot() {
        let rules = RuleSnapshot::empty();
        assert!(rules.is_empty());
        assert_eq!(rules.exclusion_count(), 0);
        assert!(!rules.is_excluded("anything"));
    }

    #[test]
    fn test_rule_serialization() {
        let rule: CustomRule =
            serde_json::from_str(r#"{"word":"Zucker","hyphenated":"Zuk&shy;ker"}"#).unwrap();
        assert_eq!(rule, CustomRule::new("Zucker", "Zuk&shy;ker"));
    }
}
