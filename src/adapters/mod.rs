//! Adapters implementing the domain ports against concrete backends.

pub mod cache;
pub mod sqlite;
