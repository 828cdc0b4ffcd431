use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, WorkerError};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// JSON rule file; without one the worker starts with an empty in-memory store
    pub rules_path: Option<PathBuf>,
    /// How long a rule snapshot stays fresh
    pub cache_ttl: Duration,
    /// Bound on queued requests
    pub queue_capacity: usize,
    /// Lowercase hex SHA-256 of the admin password; `None` disables admin operations
    pub admin_password_hash: Option<String>,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rules_path = var("SOFTHYPHEN_RULES_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let cache_ttl_secs: u64 = var("SOFTHYPHEN_RULE_CACHE_TTL_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        let queue_capacity: usize = var("SOFTHYPHEN_QUEUE_CAPACITY")
            .and_then(|v| v.parse().ok())
            .filter(|&capacity| capacity > 0)
            .unwrap_or(DEFAULT_QUEUE_CAPACITY);

        let admin_password_hash = var("SOFTHYPHEN_ADMIN_PASSWORD_HASH")
            .filter(|v| !v.trim().is_empty())
            .map(|v| validate_password_hash(&v))
            .transpose()?;

        Ok(Self {
            rules_path,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            queue_capacity,
            admin_password_hash,
        })
    }

    pub fn new() -> Self {
        Self {
            rules_path: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            admin_password_hash: None,
        }
    }

    pub fn with_rules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules_path = Some(path.into());
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Zero is raised to one; a bounded channel needs room for a message.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn with_admin_password_hash(mut self, hash: impl Into<String>) -> Result<Self> {
        self.admin_password_hash = Some(validate_password_hash(&hash.into())?);
        Ok(self)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_password_hash(hash: &str) -> Result<String> {
    let hash = hash.trim().to_ascii_lowercase();
    if hash.len() != 64 || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(WorkerError::Config(
            "SOFTHYPHEN_ADMIN_PASSWORD_HASH must be a hex SHA-256 digest".into(),
        ));
    }
    Ok(hash)
}
