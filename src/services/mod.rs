//! Service layer: the resilient content loader and the write path.

pub mod content_service;
pub mod loader;
pub mod timeout;

pub use content_service::ContentService;
pub use loader::{ContentLoader, FetchAttempt, FetchOutcome, FetchStrategy};
pub use timeout::{with_timeout, TimedOut};
