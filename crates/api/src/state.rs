//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::kv::KvStore;
use crate::store::CollectionStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The key-value backend is injected at
/// construction, so tests run against the in-memory implementation.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    kv: Arc<dyn KvStore>,
    store: CollectionStore,
}

impl AppState {
    /// Create a new application state over the given storage backend.
    #[must_use]
    pub fn new(config: ApiConfig, kv: Arc<dyn KvStore>) -> Self {
        let store = CollectionStore::new(Arc::clone(&kv));
        Self {
            inner: Arc::new(AppStateInner { config, kv, store }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the raw key-value backend.
    #[must_use]
    pub fn kv(&self) -> &Arc<dyn KvStore> {
        &self.inner.kv
    }

    /// Get a reference to the collection store.
    #[must_use]
    pub fn store(&self) -> &CollectionStore {
        &self.inner.store
    }
}
