//! Soft hyphen worker
//!
//! Runs the hyphenation engine behind an asynchronous request/response
//! boundary and maintains the custom hyphenation and exclusion rules it
//! consults:
//! - Rule store with admin-authenticated mutations and a JSON rule file
//! - Time-boxed rule cache that fails open to the last good snapshot
//! - Worker task with correlation ids and panic containment
//! - Line-delimited JSON protocol over stdio (see `softhyphen-worker serve`)

pub mod auth;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod rule_file;
pub mod store;
pub mod worker;

pub use auth::{hash_password, AdminAuth, AdminSession};
pub use cache::RuleCache;
pub use config::WorkerConfig;
pub use error::{Result, WorkerError};
pub use rule_file::RuleFile;
pub use store::{BulkAddOutcome, RuleSet, RuleSource, RuleStore, StoredCustomRule, StoredExclusion};
pub use worker::{
    handle_request, spawn_worker, LatestResponse, WorkerHandle, WorkerRequest, WorkerResponse,
    AUTO_LANGUAGE,
};
