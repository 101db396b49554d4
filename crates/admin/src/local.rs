//! Local-only collection store backed by JSON files.
//!
//! The no-server deployment mode: one file per collection in a content
//! directory, read and rewritten in full on every operation. Missing
//! files are seeded from the default content on open. No locking; the
//! last writer wins.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::{Map, Value};
use thiserror::Error;

use courtside_core::{
    AnnouncementsView, Collection, EventsView, PostsView, ProductsView, ProgramsView, Record,
    Stats, defaults, interchange, today_utc,
};

/// Error from a local store operation.
#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed content file: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed collection store for running without a data API.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store in the given directory, creating it and seeding any
    /// missing collection files with default content.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or seed files cannot be written.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, LocalStoreError> {
        let store = Self { dir: dir.into() };
        std::fs::create_dir_all(&store.dir)?;

        for (collection, records) in defaults::all() {
            if !store.path(collection).exists() {
                store.write(collection, &records)?;
            }
        }
        Ok(store)
    }

    /// The directory holding the collection files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    fn read(&self, collection: Collection) -> Result<Vec<Record>, LocalStoreError> {
        let path = self.path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write(&self, collection: Collection, records: &[Record]) -> Result<(), LocalStoreError> {
        let raw = serde_json::to_string(records)?;
        std::fs::write(self.path(collection), raw)?;
        Ok(())
    }

    // ========================================================================
    // Generic operations
    // ========================================================================

    /// The full record list for a collection, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or parsed.
    pub fn get_all(&self, collection: Collection) -> Result<Vec<Record>, LocalStoreError> {
        self.read(collection)
    }

    /// The record with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or parsed.
    pub fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Record>, LocalStoreError> {
        Ok(self
            .read(collection)?
            .into_iter()
            .find(|r| r.id() == Some(id)))
    }

    /// Create a record: assign an id and `createdAt`, prepend, write.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or written.
    pub fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Record, LocalStoreError> {
        let mut records = self.read(collection)?;

        let mut record = Record::from_fields(fields);
        record.assign_identity(collection, Utc::now());
        records.insert(0, record.clone());

        self.write(collection, &records)?;
        Ok(record)
    }

    /// Shallow-merge a patch into the record with the given id.
    ///
    /// Returns `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or written.
    pub fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<Record>, LocalStoreError> {
        let mut records = self.read(collection)?;

        let Some(record) = records.iter_mut().find(|r| r.id() == Some(id)) else {
            return Ok(None);
        };
        record.apply_patch(patch, Utc::now());
        let updated = record.clone();

        self.write(collection, &records)?;
        Ok(Some(updated))
    }

    /// Remove the record with the given id, returning whether one was
    /// removed. The file is rewritten either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or written.
    pub fn delete(&self, collection: Collection, id: &str) -> Result<bool, LocalStoreError> {
        let records = self.read(collection)?;
        let before = records.len();
        let remaining: Vec<Record> = records.into_iter().filter(|r| r.id() != Some(id)).collect();

        self.write(collection, &remaining)?;
        Ok(remaining.len() < before)
    }

    /// Flip a record's `visible` flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or written.
    pub fn toggle_visibility(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Record>, LocalStoreError> {
        let Some(record) = self.get_by_id(collection, id)? else {
            return Ok(None);
        };
        let mut patch = Map::new();
        patch.insert("visible".to_string(), Value::Bool(!record.is_visible()));
        self.update(collection, id, patch)
    }

    /// Replace a collection's contents wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be written.
    pub fn replace(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<(), LocalStoreError> {
        self.write(collection, &records)
    }

    /// Overwrite every collection with its default content.
    ///
    /// # Errors
    ///
    /// Returns an error if a content file cannot be written.
    pub fn reset_all(&self) -> Result<(), LocalStoreError> {
        for (collection, records) in defaults::all() {
            self.write(collection, &records)?;
        }
        Ok(())
    }

    // ========================================================================
    // Typed facades
    // ========================================================================

    /// Query view over the events collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or parsed.
    pub fn events(&self) -> Result<EventsView, LocalStoreError> {
        Ok(EventsView::new(self.read(Collection::Events)?))
    }

    /// Query view over the programs collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or parsed.
    pub fn programs(&self) -> Result<ProgramsView, LocalStoreError> {
        Ok(ProgramsView::new(self.read(Collection::Programs)?))
    }

    /// Query view over the posts collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or parsed.
    pub fn posts(&self) -> Result<PostsView, LocalStoreError> {
        Ok(PostsView::new(self.read(Collection::Posts)?))
    }

    /// Query view over the announcements collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or parsed.
    pub fn announcements(&self) -> Result<AnnouncementsView, LocalStoreError> {
        Ok(AnnouncementsView::new(self.read(Collection::Announcements)?))
    }

    /// Query view over the products collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file cannot be read or parsed.
    pub fn products(&self) -> Result<ProductsView, LocalStoreError> {
        Ok(ProductsView::new(self.read(Collection::Products)?))
    }

    // ========================================================================
    // Bulk interchange & stats
    // ========================================================================

    /// Export every collection as a pretty-printed backup document.
    ///
    /// # Errors
    ///
    /// Returns an error if a content file cannot be read or parsed.
    pub fn export_all(&self) -> Result<String, LocalStoreError> {
        let mut collections = Vec::new();
        for collection in Collection::ALL {
            collections.push((collection, self.read(collection)?));
        }
        Ok(interchange::export(&collections))
    }

    /// Import a backup document, replacing the collections it names and
    /// ignoring unknown keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or a file cannot be
    /// written.
    pub fn import_all(&self, document: &str) -> Result<(), LocalStoreError> {
        for (collection, records) in interchange::parse(document)? {
            self.write(collection, &records)?;
        }
        Ok(())
    }

    /// Dashboard summary numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if a content file cannot be read or parsed.
    pub fn stats(&self) -> Result<Stats, LocalStoreError> {
        Ok(Stats::compute(
            &self.read(Collection::Events)?,
            &self.read(Collection::Programs)?,
            &self.read(Collection::Posts)?,
            &self.read(Collection::Products)?,
            today_utc(),
        ))
    }
}
