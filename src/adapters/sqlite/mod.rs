//! SQLite persistence adapters.

pub mod connection;
pub mod content_store;
pub mod migrations;

pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError};
pub use content_store::SqliteContentStore;
pub use migrations::{content_schema_migrations, Migration, MigrationError, Migrator};
