//! Content records and identifier rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Longest identifier accepted anywhere in the system.
pub const MAX_IDENTIFIER_LEN: usize = 512;

/// The families of documents the site serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A real-estate development (e.g. a residential tower).
    Project,
    /// A blog article.
    Article,
    /// A static page section (home, about, contact).
    Page,
    /// A customer testimonial.
    Testimonial,
    /// A frequently asked question.
    Faq,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Article => "article",
            Self::Page => "page",
            Self::Testimonial => "testimonial",
            Self::Faq => "faq",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(Self::Project),
            "article" => Ok(Self::Article),
            "page" => Ok(Self::Page),
            "testimonial" => Ok(Self::Testimonial),
            "faq" => Ok(Self::Faq),
            other => Err(DomainError::UnknownContentKind(other.to_string())),
        }
    }
}

/// An identifier-keyed document served by the site.
///
/// The loader treats `body` as an opaque payload; only presence or absence of
/// the record matters to the fetch path. Interpretation of the payload belongs
/// to the rendering side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: Uuid,
    /// Unique, URL-safe identifier (e.g. "layan-verde").
    pub slug: String,
    pub kind: ContentKind,
    pub title: String,
    /// Opaque document payload.
    pub body: serde_json::Value,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Create a new published record with a fresh id and current timestamps.
    pub fn new(
        slug: impl Into<String>,
        kind: ContentKind,
        title: impl Into<String>,
        body: serde_json::Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            kind,
            title: title.into(),
            body,
            published: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the record as a draft.
    pub fn draft(mut self) -> Self {
        self.published = false;
        self
    }
}

/// Whether a string is acceptable as a content identifier.
///
/// Identifiers must be non-empty, at most [`MAX_IDENTIFIER_LEN`] bytes, and
/// free of whitespace and control characters. Anything else fails fast before
/// any cache or store access is attempted.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier.len() <= MAX_IDENTIFIER_LEN
        && !identifier
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
}
