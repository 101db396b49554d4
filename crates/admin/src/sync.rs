//! Remote-synced collection store with an optimistic cache.
//!
//! Reads are served from an in-memory cache hydrated by [`refresh`].
//! Mutations apply to the cache first, so the dashboard updates
//! instantly, then push to the data API in a background task:
//!
//! - a failed push is logged and the local mutation kept, so cache and
//!   server can diverge until the next full refresh (accepted trade-off);
//! - a 401 clears the session token; the UI notices and sends the
//!   operator back to the login screen;
//! - a successful create replaces the locally assigned temporary id with
//!   the record the server actually stored.
//!
//! Mutating methods spawn onto the ambient Tokio runtime and must be
//! called from within one.
//!
//! [`refresh`]: SyncedStore::refresh

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use serde_json::{Map, Value};

use courtside_core::{
    AnnouncementsView, Collection, EventsView, PostsView, ProductsView, ProgramsView, Record,
    Stats, interchange, today_utc,
};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Author stamped on posts created without one.
const DEFAULT_POST_AUTHOR: &str = "Club Staff";

type Cache = RwLock<HashMap<Collection, Vec<Record>>>;

/// Collection store backed by the data API, with optimistic local state.
#[derive(Debug, Clone)]
pub struct SyncedStore {
    inner: Arc<SyncedInner>,
}

#[derive(Debug)]
struct SyncedInner {
    client: ApiClient,
    cache: Cache,
}

impl SyncedStore {
    /// Create a store over the given client. The cache starts empty;
    /// call [`Self::refresh`] to hydrate it.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            inner: Arc::new(SyncedInner {
                client,
                cache: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The underlying API client.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Reload every collection from the server, replacing the cache.
    ///
    /// This is also the reconciliation point after pushes have failed:
    /// whatever the server holds wins.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error; collections fetched before the
    /// failure keep their fresh contents.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        for collection in Collection::ALL {
            let records = self.inner.client.fetch(collection).await?;
            self.inner
                .cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(collection, records);
        }
        tracing::debug!("Cache refreshed from server");
        Ok(())
    }

    fn snapshot(&self, collection: Collection) -> Vec<Record> {
        self.inner
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn with_collection<R>(
        &self,
        collection: Collection,
        f: impl FnOnce(&mut Vec<Record>) -> R,
    ) -> R {
        let mut cache = self
            .inner
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(cache.entry(collection).or_default())
    }

    // ========================================================================
    // Generic operations
    // ========================================================================

    /// All cached records for a collection, unfiltered.
    #[must_use]
    pub fn get_all(&self, collection: Collection) -> Vec<Record> {
        self.snapshot(collection)
    }

    /// The cached record with the given id, if any.
    #[must_use]
    pub fn get_by_id(&self, collection: Collection, id: &str) -> Option<Record> {
        self.snapshot(collection)
            .into_iter()
            .find(|r| r.id() == Some(id))
    }

    /// Create a record: assign a temporary id, prepend to the cache, and
    /// push to the server in the background. Returns the optimistic
    /// record immediately.
    pub fn create(&self, collection: Collection, fields: Map<String, Value>) -> Record {
        let mut record = Record::from_fields(fields);
        let temp_id = record.assign_identity(collection, Utc::now());

        self.with_collection(collection, |records| records.insert(0, record.clone()));

        let inner = Arc::clone(&self.inner);
        let payload = record.clone();
        tokio::spawn(async move {
            match inner.client.create(collection, &payload).await {
                Ok(server_record) => {
                    let mut cache = inner.cache.write().unwrap_or_else(PoisonError::into_inner);
                    let records = cache.entry(collection).or_default();
                    if let Some(slot) =
                        records.iter_mut().find(|r| r.id() == Some(temp_id.as_str()))
                    {
                        *slot = server_record;
                    }
                }
                Err(err) => handle_push_error(&inner, collection, "create", &err),
            }
        });

        record
    }

    /// Merge fields into a cached record and push the patch. Returns the
    /// optimistic record, or `None` when the id is unknown.
    pub fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Map<String, Value>,
    ) -> Option<Record> {
        let updated = self.with_collection(collection, |records| {
            let record = records.iter_mut().find(|r| r.id() == Some(id))?;
            record.apply_patch(patch.clone(), Utc::now());
            Some(record.clone())
        })?;

        let inner = Arc::clone(&self.inner);
        let id = id.to_string();
        tokio::spawn(async move {
            if let Err(err) = inner.client.update(collection, &id, &patch).await {
                handle_push_error(&inner, collection, "update", &err);
            }
        });

        Some(updated)
    }

    /// Remove a record from the cache and push the deletion. Returns
    /// whether a cached record was removed.
    pub fn delete(&self, collection: Collection, id: &str) -> bool {
        let removed = self.with_collection(collection, |records| {
            let before = records.len();
            records.retain(|r| r.id() != Some(id));
            records.len() < before
        });

        if removed {
            let inner = Arc::clone(&self.inner);
            let id = id.to_string();
            tokio::spawn(async move {
                if let Err(err) = inner.client.delete(collection, &id).await {
                    handle_push_error(&inner, collection, "delete", &err);
                }
            });
        }
        removed
    }

    /// Flip a record's `visible` flag.
    pub fn toggle_visibility(&self, collection: Collection, id: &str) -> Option<Record> {
        let record = self.get_by_id(collection, id)?;
        let mut patch = Map::new();
        patch.insert("visible".to_string(), Value::Bool(!record.is_visible()));
        self.update(collection, id, patch)
    }

    /// Replace a collection's contents wholesale and push a bulk save.
    pub fn replace(&self, collection: Collection, records: Vec<Record>) {
        self.with_collection(collection, |cached| {
            *cached = records.clone();
        });

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            if let Err(err) = inner.client.save(collection, &records).await {
                handle_push_error(&inner, collection, "save", &err);
            }
        });
    }

    // ========================================================================
    // Typed facades
    // ========================================================================

    /// Query view over the events cache.
    #[must_use]
    pub fn events(&self) -> EventsView {
        EventsView::new(self.snapshot(Collection::Events))
    }

    /// Query view over the programs cache.
    #[must_use]
    pub fn programs(&self) -> ProgramsView {
        ProgramsView::new(self.snapshot(Collection::Programs))
    }

    /// Query view over the posts cache.
    #[must_use]
    pub fn posts(&self) -> PostsView {
        PostsView::new(self.snapshot(Collection::Posts))
    }

    /// Query view over the announcements cache.
    #[must_use]
    pub fn announcements(&self) -> AnnouncementsView {
        AnnouncementsView::new(self.snapshot(Collection::Announcements))
    }

    /// Query view over the products cache.
    #[must_use]
    pub fn products(&self) -> ProductsView {
        ProductsView::new(self.snapshot(Collection::Products))
    }

    /// Create an event; new events always start with zero registrations.
    pub fn create_event(&self, mut fields: Map<String, Value>) -> Record {
        fields.insert("registered".to_string(), Value::from(0));
        self.create(Collection::Events, fields)
    }

    /// Create a post, stamping the default author when none is given.
    pub fn create_post(&self, mut fields: Map<String, Value>) -> Record {
        fields
            .entry("author".to_string())
            .or_insert_with(|| Value::String(DEFAULT_POST_AUTHOR.to_string()));
        self.create(Collection::Posts, fields)
    }

    // ========================================================================
    // Bulk interchange & stats
    // ========================================================================

    /// Export every cached collection as a pretty-printed backup document.
    #[must_use]
    pub fn export_all(&self) -> String {
        let collections: Vec<(Collection, Vec<Record>)> = Collection::ALL
            .into_iter()
            .map(|c| (c, self.snapshot(c)))
            .collect();
        interchange::export(&collections)
    }

    /// Import a backup document, replacing the collections it names and
    /// ignoring unknown keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed; nothing is replaced
    /// in that case.
    pub fn import_all(&self, document: &str) -> Result<(), serde_json::Error> {
        for (collection, records) in interchange::parse(document)? {
            self.replace(collection, records);
        }
        Ok(())
    }

    /// Dashboard summary numbers over the cached collections.
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::compute(
            &self.snapshot(Collection::Events),
            &self.snapshot(Collection::Programs),
            &self.snapshot(Collection::Posts),
            &self.snapshot(Collection::Products),
            today_utc(),
        )
    }
}

/// A push failed after the optimistic local mutation already happened.
///
/// The local state is deliberately NOT rolled back; on a 401 the session
/// is cleared so the UI returns to the login screen.
fn handle_push_error(
    inner: &SyncedInner,
    collection: Collection,
    action: &str,
    err: &ClientError,
) {
    if err.is_unauthorized() {
        inner.client.session().clear();
        tracing::warn!(collection = %collection, action, "Session rejected by server; cleared local token");
    } else {
        tracing::error!(collection = %collection, action, error = %err, "Background sync failed; local state kept");
    }
}
