//! Admin authentication for rule mutations.
//!
//! The configured secret is the hex SHA-256 of the admin password. A
//! successful login yields an [`AdminSession`], which every mutating
//! [`RuleStore`](crate::store::RuleStore) operation takes as proof.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::config::WorkerConfig;
use crate::error::{Result, WorkerError};

/// Lowercase hex SHA-256 of a password, the form stored in
/// `SOFTHYPHEN_ADMIN_PASSWORD_HASH`.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

#[derive(Debug, Clone)]
pub struct AdminAuth {
    password_hash: Option<String>,
}

impl AdminAuth {
    pub fn new(password_hash: Option<String>) -> Self {
        Self {
            password_hash: password_hash.map(|hash| hash.trim().to_ascii_lowercase()),
        }
    }

    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::new(config.admin_password_hash.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Verify a password and open a session.
    pub fn login(&self, password: &str) -> Result<AdminSession> {
        let expected = self
            .password_hash
            .as_deref()
            .ok_or_else(|| WorkerError::Config("admin password not configured".into()))?;

        let candidate = hash_password(password);
        if !constant_time_eq(candidate.as_bytes(), expected.as_bytes()) {
            tracing::warn!("rejected admin login");
            return Err(WorkerError::Unauthorized);
        }

        Ok(AdminSession {
            issued_at: Utc::now(),
        })
    }
}

/// Proof of a successful admin login. Only [`AdminAuth::login`] creates one.
#[derive(Debug, Clone)]
pub struct AdminSession {
    issued_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
