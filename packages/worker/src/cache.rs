//! Time-boxed cache of the rule snapshot used for hyphenation.
//!
//! Readers get an `Arc` to an immutable [`RuleSnapshot`]; a refresh builds a
//! new snapshot and swaps it in, so no reader ever sees a partial update.
//! Fetch failures keep the previous snapshot (initially empty).

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use softhyphen_engine::RuleSnapshot;

use crate::store::RuleSource;

#[derive(Debug)]
struct CacheState {
    snapshot: Arc<RuleSnapshot>,
    refreshed_at: Option<Instant>,
}

#[derive(Debug)]
pub struct RuleCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl RuleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState {
                snapshot: Arc::new(RuleSnapshot::empty()),
                refreshed_at: None,
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<RuleSnapshot> {
        Arc::clone(
            &self
                .state
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .snapshot,
        )
    }

    /// Time of the last successful refresh.
    pub fn refreshed_at(&self) -> Option<Instant> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refreshed_at
    }

    pub fn is_stale(&self) -> bool {
        self.refreshed_at()
            .is_none_or(|refreshed_at| refreshed_at.elapsed() >= self.ttl)
    }

    /// Force the next [`refresh_if_stale`](Self::refresh_if_stale) to refetch.
    pub fn invalidate(&self) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .refreshed_at = None;
    }

    /// Refetch when the freshness window has elapsed. Returns whether a new
    /// snapshot was installed.
    pub async fn refresh_if_stale(&self, source: &dyn RuleSource) -> bool {
        if !self.is_stale() {
            return false;
        }
        self.force_refresh(source).await
    }

    /// Refetch unconditionally. Returns whether a new snapshot was installed.
    pub async fn force_refresh(&self, source: &dyn RuleSource) -> bool {
        let rules = match source.fetch().await {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch rules, keeping previous snapshot");
                return false;
            }
        };

        let snapshot = Arc::new(rules.to_snapshot());
        tracing::info!(
            custom_rules = snapshot.custom_rule_count(),
            exclusions = snapshot.exclusion_count(),
            "rule cache refreshed"
        );

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.snapshot = snapshot;
        state.refreshed_at = Some(Instant::now());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, WorkerError};
    use crate::store::{RuleSet, StoredExclusion};
    use async_trait::async_trait;
    use chrono::Utc;
    use softhyphen_engine::RuleLookup;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Returns pre-configured fetch results in order.
    struct MockRuleSource {
        responses: Mutex<Vec<Result<RuleSet>>>,
        calls: Mutex<usize>,
    }

    impl MockRuleSource {
        fn new(mut responses: Vec<Result<RuleSet>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl RuleSource for MockRuleSource {
        async fn fetch(&self) -> Result<RuleSet> {
            *self.calls.lock().unwrap() += 1;
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(WorkerError::Config("no more responses".into())))
        }
    }

    fn excluding(word: &str) -> RuleSet {
        RuleSet {
            custom_rules: Vec::new(),
            exclusions: vec![StoredExclusion {
                id: Uuid::new_v4(),
                word: word.to_string(),
                created_at: Utc::now(),
            }],
        }
    }

    #[test]
    fn test_new_cache_is_empty_and_stale() {
        let cache = RuleCache::new(Duration::from_secs(300));
        assert!(cache.snapshot().is_empty());
        assert!(cache.is_stale());
        assert!(cache.refreshed_at().is_none());
    }

    #[tokio::test]
    async fn test_refresh_installs_snapshot() {
        let cache = RuleCache::new(Duration::from_secs(300));
        let source = MockRuleSource::new(vec![Ok(excluding("zucker"))]);

        assert!(cache.refresh_if_stale(&source).await);
        assert!(cache.snapshot().is_excluded("Zucker"));
        assert!(!cache.is_stale());
    }

    #[tokio::test]
    async fn test_fresh_cache_does_not_refetch() {
        let cache = RuleCache::new(Duration::from_secs(300));
        let source = MockRuleSource::new(vec![Ok(excluding("zucker")), Ok(RuleSet::default())]);

        cache.refresh_if_stale(&source).await;
        assert!(!cache.refresh_if_stale(&source).await);
        assert_eq!(source.calls(), 1);
        assert!(cache.snapshot().is_excluded("zucker"));
    }

    #[tokio::test]
    async fn test_zero_ttl_always_refetches() {
        let cache = RuleCache::new(Duration::ZERO);
        let source = MockRuleSource::new(vec![Ok(excluding("zucker")), Ok(excluding("nato"))]);

        cache.refresh_if_stale(&source).await;
        cache.refresh_if_stale(&source).await;
        assert_eq!(source.calls(), 2);
        assert!(cache.snapshot().is_excluded("nato"));
        assert!(!cache.snapshot().is_excluded("zucker"));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_snapshot() {
        let cache = RuleCache::new(Duration::from_secs(300));
        let source = MockRuleSource::new(vec![
            Ok(excluding("zucker")),
            Err(WorkerError::Config("rule source unavailable".into())),
        ]);

        assert!(cache.force_refresh(&source).await);
        let before = cache.snapshot();

        assert!(!cache.force_refresh(&source).await);
        assert!(Arc::ptr_eq(&before, &cache.snapshot()));
        assert!(cache.snapshot().is_excluded("zucker"));
    }

    #[tokio::test]
    async fn test_failed_first_fetch_leaves_empty_snapshot() {
        let cache = RuleCache::new(Duration::from_secs(300));
        let source = MockRuleSource::new(vec![Err(WorkerError::Config("down".into()))]);

        assert!(!cache.refresh_if_stale(&source).await);
        assert!(cache.snapshot().is_empty());
        assert!(cache.is_stale());
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = RuleCache::new(Duration::from_secs(300));
        let source = MockRuleSource::new(vec![Ok(RuleSet::default()), Ok(excluding("nato"))]);

        cache.refresh_if_stale(&source).await;
        cache.invalidate();
        assert!(cache.refresh_if_stale(&source).await);
        assert!(cache.snapshot().is_excluded("NATO"));
    }

    #[tokio::test]
    async fn test_readers_keep_their_snapshot_across_refresh() {
        let cache = RuleCache::new(Duration::ZERO);
        let source = MockRuleSource::new(vec![Ok(excluding("zucker")), Ok(RuleSet::default())]);

        cache.force_refresh(&source).await;
        let held = cache.snapshot();
        cache.force_refresh(&source).await;

        assert!(held.is_excluded("zucker"));
        assert!(!cache.snapshot().is_excluded("zucker"));
    }
}
