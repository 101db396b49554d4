//! `PostgreSQL` key-value backend.
//!
//! One row per key in the `kv` table (see `migrations/`). TTLs become an
//! `expires_at` timestamp computed server-side; expired rows are invisible
//! to reads and overwritten on the next put.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{KvError, KvStore};

/// Key-value backend over a `PostgreSQL` connection pool.
#[derive(Debug, Clone)]
pub struct PgKv {
    pool: PgPool,
}

impl PgKv {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for PgKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let value: Option<String> = sqlx::query_scalar(
            "SELECT value FROM kv WHERE key = $1 AND (expires_at IS NULL OR expires_at > now())",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), KvError> {
        let ttl_secs: Option<f64> = ttl.map(|ttl| ttl.as_secs_f64());
        sqlx::query(
            "INSERT INTO kv (key, value, expires_at) \
             VALUES ($1, $2, now() + make_interval(secs => $3::double precision)) \
             ON CONFLICT (key) DO UPDATE \
             SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at",
        )
        .bind(key)
        .bind(value)
        .bind(ttl_secs)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        sqlx::query("DELETE FROM kv WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
