//! Cache adapters.

pub mod moka_content_cache;

pub use moka_content_cache::MokaContentCache;
