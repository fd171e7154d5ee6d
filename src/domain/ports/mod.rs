//! Ports: capabilities the services are handed at construction time.

pub mod content_cache;
pub mod content_store;

pub use content_cache::ContentCache;
pub use content_store::ContentStore;
