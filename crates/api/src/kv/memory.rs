//! In-memory key-value backend for tests and local development.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{KvError, KvStore};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A key-value map held in process memory. Contents vanish on restart.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryKv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), KvError> {
        let entry = Entry {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_round_trip() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("events").await.unwrap(), None);

        kv.put("events", "[]".to_string(), None).await.unwrap();
        assert_eq!(kv.get("events").await.unwrap().as_deref(), Some("[]"));

        kv.delete("events").await.unwrap();
        assert_eq!(kv.get("events").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entries_are_invisible() {
        let kv = MemoryKv::new();
        kv.put(
            "auth_abc",
            "valid".to_string(),
            Some(Duration::from_millis(10)),
        )
        .await
        .unwrap();
        assert!(kv.get("auth_abc").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(kv.get("auth_abc").await.unwrap(), None);
    }
}
