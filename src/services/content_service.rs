//! Coordinates reads through the loader and writes through the store.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{is_valid_identifier, ContentKind, ContentRecord, LoaderConfig};
use crate::domain::ports::{ContentCache, ContentStore};
use crate::services::loader::{ContentLoader, FetchAttempt};

/// Content read/write facade.
///
/// Reads go through the resilient loader; writes go straight to the store and
/// invalidate the cache entry for the touched slug. The loader never writes.
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    cache: Arc<dyn ContentCache>,
    loader: ContentLoader,
}

impl ContentService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        cache: Arc<dyn ContentCache>,
        loader_config: LoaderConfig,
    ) -> Self {
        let loader = ContentLoader::with_config(cache.clone(), store.clone(), loader_config);
        Self {
            store,
            cache,
            loader,
        }
    }

    /// Load a record through the tiered fallback chain.
    pub async fn load(&self, slug: &str) -> Option<ContentRecord> {
        self.loader.load(slug).await
    }

    /// Load a record and return the attempt trace alongside it.
    pub async fn load_with_attempts(
        &self,
        slug: &str,
    ) -> (Option<ContentRecord>, Vec<FetchAttempt>) {
        self.loader.load_with_attempts(slug).await
    }

    /// Read one record directly from the store, bypassing the loader.
    pub async fn get(&self, slug: &str) -> DomainResult<Option<ContentRecord>> {
        self.store.find_by_slug(slug).await
    }

    /// Insert or replace a record, then drop its cache entry.
    pub async fn publish(&self, record: &ContentRecord) -> DomainResult<()> {
        if !is_valid_identifier(&record.slug) {
            return Err(DomainError::InvalidIdentifier(record.slug.clone()));
        }

        self.store.upsert(record).await?;
        self.cache.invalidate(&record.slug).await;
        info!(slug = %record.slug, kind = %record.kind, "content published");
        Ok(())
    }

    /// Delete a record, then drop its cache entry.
    pub async fn remove(&self, slug: &str) -> DomainResult<()> {
        self.store.delete(slug).await?;
        self.cache.invalidate(slug).await;
        info!(slug, "content removed");
        Ok(())
    }

    /// List stored records, optionally restricted to one kind.
    pub async fn list(&self, kind: Option<ContentKind>) -> DomainResult<Vec<ContentRecord>> {
        self.store.list(kind).await
    }
}
