//! Custom hyphenation and exclusion rules as maintained by administrators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use softhyphen_engine::config::{SOFT_HYPHEN_ENTITY, SOFT_HYPHEN_STR};
use softhyphen_engine::{CustomRule, ExclusionRule, RuleSnapshot};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::AdminSession;
use crate::error::{Result, WorkerError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCustomRule {
    pub id: Uuid,
    /// Lowercase word
    pub word: String,
    /// Hyphenated form, markers written as `&shy;` or U+00AD
    pub hyphenated: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredExclusion {
    pub id: Uuid,
    /// Lowercase word
    pub word: String,
    pub created_at: DateTime<Utc>,
}

/// Every rule known to a source. Also the on-disk format of a rule file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    #[serde(default)]
    pub custom_rules: Vec<StoredCustomRule>,
    #[serde(default)]
    pub exclusions: Vec<StoredExclusion>,
}

impl RuleSet {
    /// Build the immutable lookup handed to the engine.
    pub fn to_snapshot(&self) -> RuleSnapshot {
        RuleSnapshot::new(
            self.custom_rules
                .iter()
                .map(|rule| CustomRule::new(&rule.word, &rule.hyphenated)),
            self.exclusions
                .iter()
                .map(|exclusion| ExclusionRule::new(&exclusion.word)),
        )
    }
}

/// Bulk fetch of all rules.
#[async_trait]
pub trait RuleSource: Send + Sync {
    async fn fetch(&self) -> Result<RuleSet>;
}

/// Result of a bulk exclusion insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAddOutcome {
    pub added: usize,
    pub duplicates: usize,
}

/// In-memory rule store.
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: RwLock<RuleSet>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rule_set(rules: RuleSet) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }

    pub async fn rule_set(&self) -> RuleSet {
        self.rules.read().await.clone()
    }

    /// Custom rules ordered by word.
    pub async fn custom_rules(&self) -> Vec<StoredCustomRule> {
        let mut rules = self.rules.read().await.custom_rules.clone();
        rules.sort_by(|a, b| a.word.cmp(&b.word));
        rules
    }

    /// Exclusions ordered by word.
    pub async fn exclusions(&self) -> Vec<StoredExclusion> {
        let mut exclusions = self.rules.read().await.exclusions.clone();
        exclusions.sort_by(|a, b| a.word.cmp(&b.word));
        exclusions
    }

    pub async fn add_custom_rule(
        &self,
        _session: &AdminSession,
        word: &str,
        hyphenated: &str,
    ) -> Result<StoredCustomRule> {
        let (word, hyphenated) = validate_custom_rule(word, hyphenated)?;
        let mut rules = self.rules.write().await;

        if rules.custom_rules.iter().any(|rule| rule.word == word) {
            return Err(WorkerError::DuplicateRule(word));
        }

        let now = Utc::now();
        let rule = StoredCustomRule {
            id: Uuid::new_v4(),
            word,
            hyphenated,
            created_at: now,
            updated_at: now,
        };
        rules.custom_rules.push(rule.clone());

        tracing::info!(word = %rule.word, hyphenated = %rule.hyphenated, "custom rule added");
        Ok(rule)
    }

    pub async fn update_custom_rule(
        &self,
        _session: &AdminSession,
        id: Uuid,
        word: &str,
        hyphenated: &str,
    ) -> Result<StoredCustomRule> {
        let (word, hyphenated) = validate_custom_rule(word, hyphenated)?;
        let mut rules = self.rules.write().await;

        if rules
            .custom_rules
            .iter()
            .any(|rule| rule.word == word && rule.id != id)
        {
            return Err(WorkerError::DuplicateRule(word));
        }

        let rule = rules
            .custom_rules
            .iter_mut()
            .find(|rule| rule.id == id)
            .ok_or_else(|| WorkerError::RuleNotFound(id.to_string()))?;

        rule.word = word;
        rule.hyphenated = hyphenated;
        rule.updated_at = Utc::now();

        tracing::info!(%id, word = %rule.word, "custom rule updated");
        Ok(rule.clone())
    }

    /// Remove custom rules by id. Returns how many were removed.
    pub async fn remove_custom_rules(&self, _session: &AdminSession, ids: &[Uuid]) -> usize {
        let mut rules = self.rules.write().await;
        let before = rules.custom_rules.len();
        rules.custom_rules.retain(|rule| !ids.contains(&rule.id));
        let removed = before - rules.custom_rules.len();

        tracing::info!(removed, "custom rules removed");
        removed
    }

    pub async fn add_exclusion(
        &self,
        _session: &AdminSession,
        word: &str,
    ) -> Result<StoredExclusion> {
        let word = normalize_word(word)
            .ok_or_else(|| WorkerError::InvalidRule("word is required".into()))?;
        let mut rules = self.rules.write().await;

        if rules.exclusions.iter().any(|exclusion| exclusion.word == word) {
            return Err(WorkerError::DuplicateRule(word));
        }

        let exclusion = StoredExclusion {
            id: Uuid::new_v4(),
            word,
            created_at: Utc::now(),
        };
        rules.exclusions.push(exclusion.clone());

        tracing::info!(word = %exclusion.word, "exclusion added");
        Ok(exclusion)
    }

    /// Add many exclusions at once.
    ///
    /// Words are trimmed and lowercased; blank entries are skipped without
    /// being counted. Words already excluded, including repeats within the
    /// batch, count as duplicates.
    pub async fn add_exclusions<I, S>(&self, _session: &AdminSession, words: I) -> BulkAddOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = self.rules.write().await;
        let mut outcome = BulkAddOutcome::default();
        let now = Utc::now();

        for word in words {
            let Some(word) = normalize_word(word.as_ref()) else {
                continue;
            };

            if rules.exclusions.iter().any(|exclusion| exclusion.word == word) {
                outcome.duplicates += 1;
                continue;
            }

            rules.exclusions.push(StoredExclusion {
                id: Uuid::new_v4(),
                word,
                created_at: now,
            });
            outcome.added += 1;
        }

        tracing::info!(
            added = outcome.added,
            duplicates = outcome.duplicates,
            "bulk exclusion insert"
        );
        outcome
    }

    /// Remove exclusions by id. Returns how many were removed.
    pub async fn remove_exclusions(&self, _session: &AdminSession, ids: &[Uuid]) -> usize {
        let mut rules = self.rules.write().await;
        let before = rules.exclusions.len();
        rules.exclusions.retain(|exclusion| !ids.contains(&exclusion.id));
        let removed = before - rules.exclusions.len();

        tracing::info!(removed, "exclusions removed");
        removed
    }
}

#[async_trait]
impl RuleSource for RuleStore {
    async fn fetch(&self) -> Result<RuleSet> {
        Ok(self.rule_set().await)
    }
}

fn normalize_word(word: &str) -> Option<String> {
    let word = word.trim();
    (!word.is_empty()).then(|| word.to_lowercase())
}

/// Check a custom rule and return its normalized `(word, hyphenated)` pair.
///
/// The hyphenated form must spell the word once its markers are removed.
pub fn validate_custom_rule(word: &str, hyphenated: &str) -> Result<(String, String)> {
    let hyphenated = hyphenated.trim();
    let Some(word) = normalize_word(word).filter(|_| !hyphenated.is_empty()) else {
        return Err(WorkerError::InvalidRule(
            "word and hyphenated form are required".into(),
        ));
    };

    let spelled = hyphenated
        .replace(SOFT_HYPHEN_ENTITY, "")
        .replace(SOFT_HYPHEN_STR, "")
        .to_lowercase();
    if spelled != word {
        return Err(WorkerError::InvalidRule(format!(
            "'{hyphenated}' does not spell '{word}'"
        )));
    }

    Ok((word, hyphenated.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{hash_password, AdminAuth};
    use softhyphen_engine::RuleLookup;

    fn session() -> AdminSession {
        AdminAuth::new(Some(hash_password("secret")))
            .login("secret")
            .unwrap()
    }

    #[test]
    fn test_validate_custom_rule() {
        let (word, hyphenated) =
            validate_custom_rule(" Ladungssicherung ", "Ladungs&shy;sicherung").unwrap();
        assert_eq!(word, "ladungssicherung");
        assert_eq!(hyphenated, "Ladungs&shy;sicherung");

        assert!(validate_custom_rule("Zurrgurt", "Zurr\u{AD}gurt").is_ok());
    }

    #[test]
    fn test_validate_rejects_mismatch_and_blanks() {
        assert!(matches!(
            validate_custom_rule("Zurrgurt", "Zurr&shy;gurte"),
            Err(WorkerError::InvalidRule(_))
        ));
        assert!(matches!(
            validate_custom_rule("", "x"),
            Err(WorkerError::InvalidRule(_))
        ));
        assert!(matches!(
            validate_custom_rule("Zurrgurt", "  "),
            Err(WorkerError::InvalidRule(_))
        ));
    }

    #[tokio::test]
    async fn test_add_custom_rule() {
        let store = RuleStore::new();
        let rule = store
            .add_custom_rule(&session(), "Zurrgurt", "Zurr&shy;gurt")
            .await
            .unwrap();

        assert_eq!(rule.word, "zurrgurt");
        assert_eq!(rule.created_at, rule.updated_at);
        assert_eq!(store.custom_rules().await, vec![rule]);
    }

    #[tokio::test]
    async fn test_duplicate_custom_rule_is_rejected() {
        let store = RuleStore::new();
        let session = session();
        store
            .add_custom_rule(&session, "Zurrgurt", "Zurr&shy;gurt")
            .await
            .unwrap();

        let result = store
            .add_custom_rule(&session, "ZURRGURT", "ZURR&shy;GURT")
            .await;
        assert!(matches!(result, Err(WorkerError::DuplicateRule(word)) if word == "zurrgurt"));
    }

    #[tokio::test]
    async fn test_update_custom_rule() {
        let store = RuleStore::new();
        let session = session();
        let rule = store
            .add_custom_rule(&session, "Organisation", "Organi&shy;sation")
            .await
            .unwrap();

        let updated = store
            .update_custom_rule(&session, rule.id, "Organisation", "Or&shy;ga&shy;ni&shy;sa&shy;tion")
            .await
            .unwrap();

        assert_eq!(updated.id, rule.id);
        assert_eq!(updated.hyphenated, "Or&shy;ga&shy;ni&shy;sa&shy;tion");
        assert!(updated.updated_at >= rule.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_rule() {
        let store = RuleStore::new();
        let result = store
            .update_custom_rule(&session(), Uuid::new_v4(), "Zurrgurt", "Zurr&shy;gurt")
            .await;
        assert!(matches!(result, Err(WorkerError::RuleNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_cannot_take_another_rules_word() {
        let store = RuleStore::new();
        let session = session();
        store
            .add_custom_rule(&session, "Zurrgurt", "Zurr&shy;gurt")
            .await
            .unwrap();
        let other = store
            .add_custom_rule(&session, "Spanngurt", "Spann&shy;gurt")
            .await
            .unwrap();

        let result = store
            .update_custom_rule(&session, other.id, "Zurrgurt", "Zurr&shy;gurt")
            .await;
        assert!(matches!(result, Err(WorkerError::DuplicateRule(_))));
    }

    #[tokio::test]
    async fn test_remove_custom_rules() {
        let store = RuleStore::new();
        let session = session();
        let rule = store
            .add_custom_rule(&session, "Zurrgurt", "Zurr&shy;gurt")
            .await
            .unwrap();

        assert_eq!(
            store
                .remove_custom_rules(&session, &[rule.id, Uuid::new_v4()])
                .await,
            1
        );
        assert!(store.custom_rules().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_exclusions_in_bulk() {
        let store = RuleStore::new();
        let session = session();
        store.add_exclusion(&session, "Zucker").await.unwrap();

        let outcome = store
            .add_exclusions(
                &session,
                ["  Ladungssicherung ", "", "zucker", "NATO", "   ", "ladungssicherung"],
            )
            .await;

        assert_eq!(
            outcome,
            BulkAddOutcome {
                added: 2,
                duplicates: 2
            }
        );

        let words: Vec<String> = store
            .exclusions()
            .await
            .into_iter()
            .map(|exclusion| exclusion.word)
            .collect();
        assert_eq!(words, vec!["ladungssicherung", "nato", "zucker"]);
    }

    #[tokio::test]
    async fn test_add_blank_exclusion_is_invalid() {
        let store = RuleStore::new();
        let result = store.add_exclusion(&session(), "  ").await;
        assert!(matches!(result, Err(WorkerError::InvalidRule(_))));
    }

    #[tokio::test]
    async fn test_remove_exclusions() {
        let store = RuleStore::new();
        let session = session();
        let exclusion = store.add_exclusion(&session, "Zucker").await.unwrap();
        store.add_exclusion(&session, "NATO").await.unwrap();

        assert_eq!(store.remove_exclusions(&session, &[exclusion.id]).await, 1);
        assert_eq!(store.exclusions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_builds_snapshot() {
        let store = RuleStore::new();
        let session = session();
        store
            .add_custom_rule(&session, "Zurrgurt", "Zurr&shy;gurt")
            .await
            .unwrap();
        store.add_exclusion(&session, "Zucker").await.unwrap();

        let snapshot = store.fetch().await.unwrap().to_snapshot();
        assert_eq!(
            snapshot.custom_hyphenation("ZURRGURT"),
            Some("Zurr\u{AD}gurt")
        );
        assert!(snapshot.is_excluded("zucker"));
    }
}
