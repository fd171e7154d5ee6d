use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{ContentKind, ContentRecord};

/// Direct access to the content document store.
///
/// `find_by_slug` returns `Ok(None)` for a record that does not exist;
/// errors are reserved for connectivity and query failures. Implementations
/// must not consult any cache; the loader decides when a read bypasses it.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Look up a single record by its slug.
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<ContentRecord>>;

    /// Insert a record, or replace the record currently holding its slug.
    ///
    /// # Errors
    /// Returns error if the write or serialization fails.
    async fn upsert(&self, record: &ContentRecord) -> DomainResult<()>;

    /// Delete a record by slug.
    ///
    /// # Errors
    /// Returns `ContentNotFound` if no record holds the slug.
    async fn delete(&self, slug: &str) -> DomainResult<()>;

    /// List records, optionally restricted to one kind, newest first.
    async fn list(&self, kind: Option<ContentKind>) -> DomainResult<Vec<ContentRecord>>;
}
