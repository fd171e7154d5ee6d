//! Builds the service graph from configuration.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::cache::MokaContentCache;
use crate::adapters::sqlite::{
    content_schema_migrations, create_pool, SqliteContentStore, Migrator,
};
use crate::domain::models::Config;
use crate::services::ContentService;

/// Open the database, apply migrations, and wire store -> cache -> service.
pub async fn build_content_service(config: &Config) -> Result<ContentService> {
    let pool = create_pool(&config.database)
        .await
        .context("Failed to open content database")?;

    Migrator::new(pool.clone())
        .run_embedded_migrations(content_schema_migrations())
        .await
        .context("Failed to apply database migrations")?;

    let store = Arc::new(SqliteContentStore::new(pool));
    let cache = Arc::new(MokaContentCache::with_settings(
        store.clone(),
        config.cache.ttl(),
        config.cache.max_capacity,
    ));

    Ok(ContentService::new(store, cache, config.loader.clone()))
}
