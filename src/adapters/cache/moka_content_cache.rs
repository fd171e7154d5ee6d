//! Read-through content cache using moka TTL cache.
//!
//! Caches slug lookups against an inner [`ContentStore`]. Entries expire on a
//! time-to-live clock; the write path invalidates touched slugs explicitly.
//! Misses are not cached, so a slug that gains a record becomes visible on
//! the next read.

use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::DomainResult;
use crate::domain::models::ContentRecord;
use crate::domain::ports::{ContentCache, ContentStore};

/// Default TTL for cached content records.
const CONTENT_CACHE_TTL_SECS: u64 = 60;

/// Maximum number of cached records.
const CONTENT_CACHE_MAX_CAPACITY: u64 = 1024;

/// Read-through cache over a content store.
pub struct MokaContentCache<S: ContentStore> {
    inner: Arc<S>,
    /// Cache keyed by slug -> ContentRecord.
    by_slug: Cache<String, Arc<ContentRecord>>,
}

impl<S: ContentStore> MokaContentCache<S> {
    /// Create a cache with the default TTL and capacity.
    pub fn new(inner: Arc<S>) -> Self {
        Self::with_settings(
            inner,
            Duration::from_secs(CONTENT_CACHE_TTL_SECS),
            CONTENT_CACHE_MAX_CAPACITY,
        )
    }

    /// Create with custom TTL and capacity.
    pub fn with_settings(inner: Arc<S>, ttl: Duration, max_capacity: u64) -> Self {
        let by_slug = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { inner, by_slug }
    }

    /// Number of live cache entries.
    pub fn entry_count(&self) -> u64 {
        self.by_slug.entry_count()
    }
}

#[async_trait]
impl<S: ContentStore + 'static> ContentCache for MokaContentCache<S> {
    async fn get(&self, slug: &str) -> DomainResult<Option<ContentRecord>> {
        // Check cache first
        if let Some(cached) = self.by_slug.get(slug).await {
            return Ok(Some((*cached).clone()));
        }

        // Cache miss - fetch from inner store
        let result = self.inner.find_by_slug(slug).await?;
        if let Some(ref record) = result {
            self.by_slug
                .insert(slug.to_string(), Arc::new(record.clone()))
                .await;
        }
        Ok(result)
    }

    async fn invalidate(&self, slug: &str) {
        self.by_slug.invalidate(slug).await;
    }

    async fn invalidate_all(&self) {
        self.by_slug.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainResult;
    use crate::domain::models::ContentKind;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingStore {
        calls: AtomicU32,
        record: Option<ContentRecord>,
    }

    impl CountingStore {
        fn holding(record: ContentRecord) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                record: Some(record),
            })
        }

        fn empty() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                record: None,
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentStore for CountingStore {
        async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<ContentRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.record.clone().filter(|r| r.slug == slug))
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

    fn record(slug: &str) -> ContentRecord {
        ContentRecord::new(slug, ContentKind::Page, "Home", json!({"hero": "skyline"}))
    }

    #[tokio::test]
    async fn test_get_populates_from_store_once() {
        let store = CountingStore::holding(record("home"));
        let cache = MokaContentCache::new(store.clone());

        let first = cache.get("home").await.unwrap();
        let second = cache.get("home").await.unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_misses_are_not_cached() {
        let store = CountingStore::empty();
        let cache = MokaContentCache::new(store.clone());

        assert!(cache.get("home").await.unwrap().is_none());
        assert!(cache.get("home").await.unwrap().is_none());

        // Each miss goes back to the store
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_a_reread() {
        let store = CountingStore::holding(record("home"));
        let cache = MokaContentCache::new(store.clone());

        cache.get("home").await.unwrap();
        cache.invalidate("home").await;
        cache.get("home").await.unwrap();

        assert_eq!(store.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_everything() {
        let store = CountingStore::holding(record("home"));
        let cache = MokaContentCache::new(store.clone());

        cache.get("home").await.unwrap();
        cache.invalidate_all().await;
        cache.by_slug.run_pending_tasks().await;

        assert_eq!(cache.entry_count(), 0);
    }
}
