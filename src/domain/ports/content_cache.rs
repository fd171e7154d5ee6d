use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ContentRecord;

/// Cache-backed access to content records.
///
/// Implementations own their expiry policy and may populate themselves as a
/// side effect of `get`. A `get` that resolves `Ok(None)` means "no cached
/// answer and upstream has nothing"; callers treat it as a miss, never as a
/// failure.
#[async_trait]
pub trait ContentCache: Send + Sync {
    /// Fetch a record through the cache.
    async fn get(&self, slug: &str) -> DomainResult<Option<ContentRecord>>;

    /// Drop the cached entry for one slug, if any.
    async fn invalidate(&self, slug: &str);

    /// Drop every cached entry.
    async fn invalidate_all(&self);
}
