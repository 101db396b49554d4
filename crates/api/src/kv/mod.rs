//! Key-value storage backends.
//!
//! The collection store treats storage as a plain durable string-to-string
//! map with optional expiry. Two backends exist: `PostgreSQL` for real
//! deployments and an in-memory map for tests and local development.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryKv;
pub use postgres::PgKv;

/// Error from a storage backend.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A durable key-value map.
///
/// Values written with a TTL become invisible to reads once the TTL
/// elapses.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), KvError>;

    /// Remove the value stored under `key`, if any.
    async fn delete(&self, key: &str) -> Result<(), KvError>;
}
