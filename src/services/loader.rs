//! Tiered content loading with graceful degradation.
//!
//! Page content is served through three strategies, tried in order and
//! short-circuiting on the first populated record: a cache-backed read raced
//! against a short timeout, direct store reads with bounded linear-backoff
//! retry, and one last unguarded store read. No failure in any tier reaches
//! the caller; the only observable outcomes are a record or `None`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::models::{is_valid_identifier, ContentRecord, LoaderConfig};
use crate::domain::ports::{ContentCache, ContentStore};
use crate::services::timeout::with_timeout;

/// Strategy behind a single fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Cache-backed read, raced against the short timeout.
    Cached,
    /// Direct store read inside the bounded retry tier.
    Direct,
    /// The last-resort store read with no timeout guard.
    Final,
}

impl FetchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cached => "cached",
            Self::Direct => "direct",
            Self::Final => "final",
        }
    }
}

/// How a single fetch attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A populated record came back.
    Hit,
    /// The tier answered definitively with "nothing here".
    Miss,
    /// The tier failed; the message is log-only detail.
    Error(String),
    /// The tier did not answer within its time limit.
    TimedOut,
}

impl FetchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Error(_) => "error",
            Self::TimedOut => "timed_out",
        }
    }
}

/// One attempt within a single load invocation.
///
/// Lives only for the duration of that invocation; never persisted.
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    pub strategy: FetchStrategy,
    pub started_at: DateTime<Utc>,
    pub outcome: FetchOutcome,
}

/// Loads content records through the tiered fallback chain.
///
/// Holds no shared mutable state: concurrent invocations are fully
/// independent, and identical concurrent requests each run the whole chain.
pub struct ContentLoader {
    cache: Arc<dyn ContentCache>,
    store: Arc<dyn ContentStore>,
    config: LoaderConfig,
}

impl ContentLoader {
    /// Create a loader with the production timings.
    pub fn new(cache: Arc<dyn ContentCache>, store: Arc<dyn ContentStore>) -> Self {
        Self::with_config(cache, store, LoaderConfig::default())
    }

    /// Create a loader with custom timings.
    pub fn with_config(
        cache: Arc<dyn ContentCache>,
        store: Arc<dyn ContentStore>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            cache,
            store,
            config,
        }
    }

    /// Load a content record by identifier.
    ///
    /// Returns `None` when the record does not exist anywhere, when the
    /// identifier is invalid, or when every tier failed; callers map all of
    /// these to their not-found outcome. Error detail stays in the logs and
    /// in [`ContentLoader::load_with_attempts`].
    pub async fn load(&self, identifier: &str) -> Option<ContentRecord> {
        self.load_with_attempts(identifier).await.0
    }

    /// Same contract as [`ContentLoader::load`], additionally returning the
    /// attempt trace for diagnostics.
    pub async fn load_with_attempts(
        &self,
        identifier: &str,
    ) -> (Option<ContentRecord>, Vec<FetchAttempt>) {
        let mut attempts = Vec::new();

        if !is_valid_identifier(identifier) {
            debug!(identifier, "rejected invalid content identifier");
            return (None, attempts);
        }

        if let Some(record) = self.cached_read(identifier, &mut attempts).await {
            return (Some(record), attempts);
        }

        if let Some(record) = self.direct_read_with_retry(identifier, &mut attempts).await {
            return (Some(record), attempts);
        }

        let record = self.final_read(identifier, &mut attempts).await;
        if record.is_none() {
            warn!(
                identifier,
                attempts = attempts.len(),
                "content not found after all strategies"
            );
        }
        (record, attempts)
    }

    /// Tier 1: cache-backed read raced against the short timeout.
    ///
    /// A miss, an error, and a timeout all fall through identically; cache
    /// trouble must never surface to the caller.
    async fn cached_read(
        &self,
        identifier: &str,
        attempts: &mut Vec<FetchAttempt>,
    ) -> Option<ContentRecord> {
        let started_at = Utc::now();
        let limit = self.config.cached_read_timeout();

        let (record, outcome) = match with_timeout(limit, self.cache.get(identifier)).await {
            Ok(Ok(Some(record))) => {
                debug!(identifier, "cached read hit");
                (Some(record), FetchOutcome::Hit)
            }
            Ok(Ok(None)) => {
                debug!(identifier, "cached read miss");
                (None, FetchOutcome::Miss)
            }
            Ok(Err(err)) => {
                warn!(identifier, error = %err, "cached read failed, falling back to direct read");
                (None, FetchOutcome::Error(err.to_string()))
            }
            Err(_) => {
                warn!(
                    identifier,
                    limit_ms = limit.as_millis() as u64,
                    "cached read timed out, falling back to direct read"
                );
                (None, FetchOutcome::TimedOut)
            }
        };

        attempts.push(FetchAttempt {
            strategy: FetchStrategy::Cached,
            started_at,
            outcome,
        });
        record
    }

    /// Tier 2: direct store reads with bounded retry and linear backoff.
    async fn direct_read_with_retry(
        &self,
        identifier: &str,
        attempts: &mut Vec<FetchAttempt>,
    ) -> Option<ContentRecord> {
        let limit = self.config.direct_read_timeout();

        for attempt in 1..=self.config.direct_read_attempts {
            let started_at = Utc::now();

            let (record, outcome) =
                match with_timeout(limit, self.store.find_by_slug(identifier)).await {
                    Ok(Ok(Some(record))) => {
                        debug!(identifier, attempt, "direct read hit");
                        (Some(record), FetchOutcome::Hit)
                    }
                    Ok(Ok(None)) => {
                        debug!(identifier, attempt, "direct read returned nothing");
                        (None, FetchOutcome::Miss)
                    }
                    Ok(Err(err)) => {
                        warn!(identifier, attempt, error = %err, "direct read failed");
                        (None, FetchOutcome::Error(err.to_string()))
                    }
                    Err(_) => {
                        warn!(
                            identifier,
                            attempt,
                            limit_ms = limit.as_millis() as u64,
                            "direct read timed out"
                        );
                        (None, FetchOutcome::TimedOut)
                    }
                };

            attempts.push(FetchAttempt {
                strategy: FetchStrategy::Direct,
                started_at,
                outcome,
            });

            if let Some(record) = record {
                return Some(record);
            }

            if attempt < self.config.direct_read_attempts {
                sleep(self.backoff_delay(attempt)).await;
            }
        }

        None
    }

    /// Tier 3: one unguarded store read, catching the case where the earlier
    /// timeouts were themselves too aggressive (e.g. a slow-starting pool).
    async fn final_read(
        &self,
        identifier: &str,
        attempts: &mut Vec<FetchAttempt>,
    ) -> Option<ContentRecord> {
        let started_at = Utc::now();

        let (record, outcome) = match self.store.find_by_slug(identifier).await {
            Ok(Some(record)) => {
                debug!(identifier, "final read hit");
                (Some(record), FetchOutcome::Hit)
            }
            Ok(None) => (None, FetchOutcome::Miss),
            Err(err) => {
                warn!(identifier, error = %err, "final read failed");
                (None, FetchOutcome::Error(err.to_string()))
            }
        };

        attempts.push(FetchAttempt {
            strategy: FetchStrategy::Final,
            started_at,
            outcome,
        });
        record
    }

    /// Linear backoff: attempt N waits N times the configured step.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(u64::from(attempt) * self.config.backoff_step_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::domain::models::ContentKind;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn sample_record(slug: &str) -> ContentRecord {
        ContentRecord::new(
            slug,
            ContentKind::Project,
            "Layan Verde",
            json!({"location": "Phuket", "units": 120}),
        )
    }

    #[derive(Clone)]
    enum Reply {
        Hit(ContentRecord),
        Miss,
        Fail(&'static str),
        Hang,
    }

    struct FakeCache {
        calls: AtomicU32,
        replies: Mutex<VecDeque<Reply>>,
    }

    impl FakeCache {
        fn with_replies(replies: Vec<Reply>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                replies: Mutex::new(replies.into()),
            })
        }

        fn missing() -> Arc<Self> {
            Self::with_replies(vec![])
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        fn next_reply(&self) -> Reply {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Reply::Miss)
        }
    }

    #[async_trait]
    impl ContentCache for FakeCache {
        async fn get(&self, _slug: &str) -> DomainResult<Option<ContentRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.next_reply() {
                Reply::Hit(record) => Ok(Some(record)),
                Reply::Miss => Ok(None),
                Reply::Fail(msg) => Err(DomainError::CacheError(msg.to_string())),
                Reply::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }

        async fn invalidate(&self, _slug: &str) {}

        async fn invalidate_all(&self) {}
    }

    struct FakeStore {
        calls: AtomicU32,
        call_instants: Mutex<Vec<Instant>>,
        replies: Mutex<VecDeque<Reply>>,
        always: Option<ContentRecord>,
    }

    impl FakeStore {
        fn with_replies(replies: Vec<Reply>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                call_instants: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
                always: None,
            })
        }

        fn always(record: ContentRecord) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                call_instants: Mutex::new(Vec::new()),
                replies: Mutex::new(VecDeque::new()),
                always: Some(record),
            })
        }

        fn missing() -> Arc<Self> {
            Self::with_replies(vec![])
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        fn call_gap(&self) -> Duration {
            let instants = self.call_instants.lock().unwrap();
            instants[1] - instants[0]
        }

        fn next_reply(&self) -> Reply {
            if let Some(record) = &self.always {
                return Reply::Hit(record.clone());
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Reply::Miss)
        }
    }

    #[async_trait]
    impl ContentStore for FakeStore {
        async fn find_by_slug(&self, _slug: &str) -> DomainResult<Option<ContentRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.call_instants.lock().unwrap().push(Instant::now());
            match self.next_reply() {
                Reply::Hit(record) => Ok(Some(record)),
                Reply::Miss => Ok(None),
                Reply::Fail(msg) => Err(DomainError::DatabaseError(msg.to_string())),
                Reply::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }

        async fn upsert(&self, _record: &ContentRecord) -> DomainResult<()> {
            Ok(())
        }

        async fn delete(&self, _slug: &str) -> DomainResult<()> {
            Ok(())
        }

        async fn list(&self, _kind: Option<ContentKind>) -> DomainResult<Vec<ContentRecord>> {
            Ok(vec![])
        }
    }

    fn loader(cache: Arc<FakeCache>, store: Arc<FakeStore>) -> ContentLoader {
        ContentLoader::new(cache, store)
    }

    #[tokio::test]
    async fn test_invalid_identifier_makes_no_attempts() {
        let cache = FakeCache::missing();
        let store = FakeStore::missing();
        let loader = loader(cache.clone(), store.clone());

        for identifier in ["", "two words", "line\nbreak"] {
            let (record, attempts) = loader.load_with_attempts(identifier).await;
            assert!(record.is_none());
            assert!(attempts.is_empty());
        }

        assert_eq!(cache.calls(), 0);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_cache_hit_is_the_fast_path() {
        let cache = FakeCache::with_replies(vec![Reply::Hit(sample_record("layan-verde"))]);
        let store = FakeStore::missing();
        let loader = loader(cache.clone(), store.clone());

        let record = loader.load("layan-verde").await.unwrap();

        assert_eq!(record.slug, "layan-verde");
        assert_eq!(cache.calls(), 1);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_store_only_record_arrives_via_direct_tier() {
        // "layan-verde" present only in the store: cache tried exactly once,
        // store exactly once, record returned from tier 2 attempt 1.
        let record = sample_record("layan-verde");
        let cache = FakeCache::missing();
        let store = FakeStore::with_replies(vec![Reply::Hit(record.clone())]);
        let loader = loader(cache.clone(), store.clone());

        let (loaded, attempts) = loader.load_with_attempts("layan-verde").await;

        assert_eq!(loaded.unwrap().id, record.id);
        assert_eq!(cache.calls(), 1);
        assert_eq!(store.calls(), 1);

        let outcomes: Vec<(FetchStrategy, &str)> = attempts
            .iter()
            .map(|a| (a.strategy, a.outcome.as_str()))
            .collect();
        assert_eq!(
            outcomes,
            vec![(FetchStrategy::Cached, "miss"), (FetchStrategy::Direct, "hit")]
        );
    }

    #[tokio::test]
    async fn test_cache_error_never_reaches_the_caller() {
        let cache = FakeCache::with_replies(vec![Reply::Fail("redis gone")]);
        let store = FakeStore::with_replies(vec![Reply::Hit(sample_record("layan-verde"))]);
        let loader = loader(cache.clone(), store.clone());

        let record = loader.load("layan-verde").await;

        assert!(record.is_some());
        assert_eq!(cache.calls(), 1);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_cache_is_bounded_by_the_timeout() {
        let cache = FakeCache::with_replies(vec![Reply::Hang]);
        let store = FakeStore::with_replies(vec![Reply::Hit(sample_record("layan-verde"))]);
        let loader = loader(cache.clone(), store.clone());

        let start = Instant::now();
        let (record, attempts) = loader.load_with_attempts("layan-verde").await;
        let elapsed = start.elapsed();

        assert!(record.is_some());
        assert_eq!(attempts[0].outcome, FetchOutcome::TimedOut);
        assert!(elapsed >= Duration::from_secs(3), "elapsed: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(4), "elapsed: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_store_failure_is_retried_with_backoff() {
        // First direct attempt fails, second succeeds: exactly 2 store calls
        // separated by the 500ms linear backoff.
        let cache = FakeCache::missing();
        let store = FakeStore::with_replies(vec![
            Reply::Fail("connection reset"),
            Reply::Hit(sample_record("layan-verde")),
        ]);
        let loader = loader(cache.clone(), store.clone());

        let record = loader.load("layan-verde").await;

        assert!(record.is_some());
        assert_eq!(store.calls(), 2);

        let gap = store.call_gap();
        assert!(gap >= Duration::from_millis(500), "gap: {gap:?}");
        assert!(gap < Duration::from_millis(600), "gap: {gap:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_direct_read_falls_through() {
        let cache = FakeCache::missing();
        let store = FakeStore::with_replies(vec![
            Reply::Hang,
            Reply::Hit(sample_record("layan-verde")),
        ]);
        let loader = loader(cache.clone(), store.clone());

        let (record, attempts) = loader.load_with_attempts("layan-verde").await;

        assert!(record.is_some());
        assert_eq!(attempts[1].outcome, FetchOutcome::TimedOut);
        assert_eq!(attempts[2].outcome, FetchOutcome::Hit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_tier_rescues_a_struggling_store() {
        let cache = FakeCache::missing();
        let store = FakeStore::with_replies(vec![
            Reply::Fail("pool exhausted"),
            Reply::Fail("pool exhausted"),
            Reply::Hit(sample_record("layan-verde")),
        ]);
        let loader = loader(cache.clone(), store.clone());

        let (record, attempts) = loader.load_with_attempts("layan-verde").await;

        assert!(record.is_some());
        assert_eq!(store.calls(), 3);
        assert_eq!(attempts.last().unwrap().strategy, FetchStrategy::Final);
        assert_eq!(attempts.last().unwrap().outcome, FetchOutcome::Hit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_everywhere_resolves_to_none_after_four_reads() {
        // "ghost-project": cache once, direct tier twice, final tier once.
        let cache = FakeCache::missing();
        let store = FakeStore::missing();
        let loader = loader(cache.clone(), store.clone());

        let (record, attempts) = loader.load_with_attempts("ghost-project").await;

        assert!(record.is_none());
        assert_eq!(cache.calls(), 1);
        assert_eq!(store.calls(), 3);
        assert_eq!(attempts.len(), 4);

        let strategies: Vec<FetchStrategy> = attempts.iter().map(|a| a.strategy).collect();
        assert_eq!(
            strategies,
            vec![
                FetchStrategy::Cached,
                FetchStrategy::Direct,
                FetchStrategy::Direct,
                FetchStrategy::Final
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_tier_failing_never_panics() {
        let cache = FakeCache::with_replies(vec![Reply::Fail("cache down")]);
        let store = FakeStore::with_replies(vec![
            Reply::Fail("db down"),
            Reply::Fail("db down"),
            Reply::Fail("db down"),
        ]);
        let loader = loader(cache.clone(), store.clone());

        let record = loader.load("layan-verde").await;

        assert!(record.is_none());
        assert_eq!(store.calls(), 3);
    }

    #[tokio::test]
    async fn test_sequential_loads_are_idempotent() {
        let record = sample_record("layan-verde");
        let cache = FakeCache::missing();
        let store = FakeStore::always(record.clone());
        let loader = loader(cache.clone(), store.clone());

        let first = loader.load("layan-verde").await.unwrap();
        let second = loader.load("layan-verde").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.id, record.id);
    }

    #[test]
    fn test_backoff_is_linear() {
        let cache: Arc<dyn ContentCache> = FakeCache::missing();
        let store: Arc<dyn ContentStore> = FakeStore::missing();
        let loader = ContentLoader::with_config(
            cache,
            store,
            LoaderConfig {
                backoff_step_ms: 500,
                ..Default::default()
            },
        );

        assert_eq!(loader.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(loader.backoff_delay(2), Duration::from_millis(1000));
        assert_eq!(loader.backoff_delay(3), Duration::from_millis(1500));
    }

    #[test]
    fn test_strategy_and_outcome_labels() {
        assert_eq!(FetchStrategy::Cached.as_str(), "cached");
        assert_eq!(FetchStrategy::Direct.as_str(), "direct");
        assert_eq!(FetchStrategy::Final.as_str(), "final");
        assert_eq!(FetchOutcome::Error("x".into()).as_str(), "error");
    }
}
