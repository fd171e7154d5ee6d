//! SQLite implementation of the ContentStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ContentKind, ContentRecord};
use crate::domain::ports::ContentStore;

#[derive(Clone)]
pub struct SqliteContentStore {
    pool: SqlitePool,
}

impl SqliteContentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; conversion into the domain record does the parsing.
#[derive(sqlx::FromRow)]
struct ContentRow {
    id: String,
    slug: String,
    kind: String,
    title: String,
    body: String,
    published: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ContentRow> for ContentRecord {
    type Error = DomainError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        Ok(ContentRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| DomainError::SerializationError(e.to_string()))?,
            slug: row.slug,
            kind: row.kind.parse()?,
            title: row.title,
            body: serde_json::from_str(&row.body)?,
            published: row.published != 0,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

fn parse_timestamp(raw: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DomainError::SerializationError(e.to_string()))
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<ContentRecord>> {
        let row: Option<ContentRow> = sqlx::query_as("SELECT * FROM content WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn upsert(&self, record: &ContentRecord) -> DomainResult<()> {
        let body_json = serde_json::to_string(&record.body)?;

        sqlx::query(
            r"INSERT INTO content (id, slug, kind, title, body, published, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(slug) DO UPDATE SET
                   kind = excluded.kind,
                   title = excluded.title,
                   body = excluded.body,
                   published = excluded.published,
                   updated_at = excluded.updated_at",
        )
        .bind(record.id.to_string())
        .bind(&record.slug)
        .bind(record.kind.as_str())
        .bind(&record.title)
        .bind(&body_json)
        .bind(i64::from(record.published))
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, slug: &str) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM content WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ContentNotFound(slug.to_string()));
        }

        Ok(())
    }

    async fn list(&self, kind: Option<ContentKind>) -> DomainResult<Vec<ContentRecord>> {
        let rows: Vec<ContentRow> = if let Some(kind) = kind {
            sqlx::query_as("SELECT * FROM content WHERE kind = ? ORDER BY updated_at DESC")
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query_as("SELECT * FROM content ORDER BY updated_at DESC")
                .fetch_all(&self.pool)
                .await?
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
