//! Atrium - Resilient Content Delivery
//!
//! Atrium serves the dynamic content of a real-estate marketing site
//! (projects, articles, page sections, testimonials, FAQs) from a SQLite
//! document store fronted by an in-process TTL cache.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Content model, ports, and domain errors
//! - **Service Layer** (`services`): The tiered content loader and write path
//! - **Adapters** (`adapters`): SQLite store and moka cache implementations
//! - **Infrastructure Layer** (`infrastructure`): Configuration, logging, wiring
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use atrium::services::ContentLoader;
//!
//! #[tokio::main]
//! async fn main() {
//!     // loader.load("layan-verde").await -> Option<ContentRecord>
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    CacheConfig, Config, ContentKind, ContentRecord, DatabaseConfig, LoaderConfig, LoggingConfig,
};
pub use domain::ports::{ContentCache, ContentStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ContentLoader, ContentService, FetchAttempt, FetchOutcome, FetchStrategy};
