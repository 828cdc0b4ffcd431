use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::store::{RuleSet, RuleSource};

/// JSON file holding a [`RuleSet`]:
///
/// ```json
/// { "customRules": [ ... ], "exclusions": [ ... ] }
/// ```
#[derive(Debug, Clone)]
pub struct RuleFile {
    path: PathBuf,
}

impl RuleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file. A missing file is an empty rule set.
    pub async fn load(&self) -> Result<RuleSet> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "rule file not found, using empty rule set");
                Ok(RuleSet::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the rule set, replacing the file atomically.
    pub async fn save(&self, rules: &RuleSet) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(rules)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::info!(
            path = %self.path.display(),
            custom_rules = rules.custom_rules.len(),
            exclusions = rules.exclusions.len(),
            "rule file saved"
        );
        Ok(())
    }
}

#[async_trait]
impl RuleSource for RuleFile {
    async fn fetch(&self) -> Result<RuleSet> {
        self.load().await
    }
}
