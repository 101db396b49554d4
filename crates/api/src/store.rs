//! The server-side collection store.
//!
//! Generic CRUD over the five content collections, persisted as one
//! key-value entry per collection (key = collection name, value = the
//! JSON-serialized record list). Every mutation reads the full list,
//! changes it in memory, and writes the full list back; concurrent
//! writers race at collection granularity and last write wins.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;

use courtside_core::{Collection, Record, defaults};

use crate::kv::{KvError, KvStore};

/// Error from a collection store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,
    #[error("stored collection is malformed: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error(transparent)]
    Kv(#[from] KvError),
}

/// Outcome of a seed request.
#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    /// All collections were populated with default content.
    Seeded(Vec<Collection>),
    /// The store already held content; nothing was written.
    AlreadySeeded,
}

/// CRUD operations over named collections, backed by an injectable
/// key-value store.
#[derive(Clone)]
pub struct CollectionStore {
    kv: Arc<dyn KvStore>,
}

impl CollectionStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    async fn load(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        match self.kv.get(collection.as_str()).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(
        &self,
        collection: Collection,
        records: &[Record],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.kv.put(collection.as_str(), raw, None).await?;
        Ok(())
    }

    /// The full record list for a collection, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored list is
    /// malformed.
    pub async fn get_all(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        self.load(collection).await
    }

    /// The first record with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored list is
    /// malformed.
    pub async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Record>, StoreError> {
        let records = self.load(collection).await?;
        Ok(records.into_iter().find(|r| r.id() == Some(id)))
    }

    /// Create a record: assign an id and `createdAt`, prepend, persist.
    ///
    /// Caller-supplied `id` or `createdAt` fields are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored list is
    /// malformed.
    pub async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Record, StoreError> {
        let mut records = self.load(collection).await?;

        let mut record = Record::from_fields(fields);
        record.assign_identity(collection, Utc::now());
        records.insert(0, record.clone());

        self.persist(collection, &records).await?;
        Ok(record)
    }

    /// Shallow-merge a patch into the record with the given id and stamp
    /// `updatedAt`. The id itself is immutable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id.
    pub async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Record, StoreError> {
        let mut records = self.load(collection).await?;

        let record = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or(StoreError::NotFound)?;
        record.apply_patch(patch, Utc::now());
        let updated = record.clone();

        self.persist(collection, &records).await?;
        Ok(updated)
    }

    /// Remove the record with the given id. Returns whether a record was
    /// actually removed; nothing is written when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the stored list is
    /// malformed.
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<bool, StoreError> {
        let mut records = self.load(collection).await?;
        let before = records.len();
        records.retain(|r| r.id() != Some(id));

        if records.len() == before {
            return Ok(false);
        }
        self.persist(collection, &records).await?;
        Ok(true)
    }

    /// Flip the `visible` flag on the record with the given id.
    ///
    /// A record without the field counts as visible, so toggling it hides
    /// the record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has that id.
    pub async fn toggle_visibility(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Record, StoreError> {
        let record = self
            .get_by_id(collection, id)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut patch = Map::new();
        patch.insert("visible".to_string(), Value::Bool(!record.is_visible()));
        self.update(collection, id, patch).await
    }

    /// Replace a collection's contents wholesale (bulk save).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn replace(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<(), StoreError> {
        self.persist(collection, &records).await
    }

    /// Populate every collection with default content, unless the store
    /// already holds an `events` entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn seed(&self) -> Result<SeedOutcome, StoreError> {
        if self.kv.get(Collection::Events.as_str()).await?.is_some() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let mut seeded = Vec::new();
        for (collection, records) in defaults::all() {
            self.persist(collection, &records).await?;
            seeded.push(collection);
        }
        Ok(SeedOutcome::Seeded(seeded))
    }
}
