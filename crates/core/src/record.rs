//! The schema-less content record.
//!
//! Records are JSON objects with a handful of well-known fields (`id`,
//! `visible`, `createdAt`, `updatedAt`, `date`); everything else is
//! passed through untouched so the dashboard can add fields without a
//! code change on either side.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::collection::Collection;

/// Error converting a JSON value into a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record must be a JSON object")]
    NotAnObject,
}

/// A single content record: a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Wrap a field map as a record.
    #[must_use]
    pub const fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Convert an arbitrary JSON value into a record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(RecordError::NotAnObject),
        }
    }

    /// The record id, if assigned.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// A string field by name.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// A boolean field by name.
    #[must_use]
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    /// A numeric field by name.
    #[must_use]
    pub fn number_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Whether the record is publicly visible.
    ///
    /// Absence of the `visible` field counts as visible; only an explicit
    /// `false` hides a record.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.bool_field("visible") != Some(false)
    }

    /// The record's `date` field parsed as a calendar date (`YYYY-MM-DD`).
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.str_field("date").and_then(|s| s.parse().ok())
    }

    /// The record's `createdAt` timestamp, if present and well-formed.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.str_field("createdAt")
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Stamp a freshly created record with an id and creation time.
    ///
    /// Any caller-supplied `id` or `createdAt` is overwritten. Returns the
    /// assigned id.
    pub fn assign_identity(&mut self, collection: Collection, now: DateTime<Utc>) -> String {
        let id = collection.generate_id();
        self.insert("id", Value::String(id.clone()));
        self.insert("createdAt", Value::String(format_timestamp(now)));
        id
    }

    /// Shallow-merge a patch into this record and stamp `updatedAt`.
    ///
    /// The id is immutable: a patch carrying `id` has that field ignored.
    pub fn apply_patch(&mut self, patch: Map<String, Value>, now: DateTime<Utc>) {
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
        self.insert("updatedAt", Value::String(format_timestamp(now)));
    }

    /// Borrow the underlying field map.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the record, returning the underlying field map.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Object(record.fields)
    }
}

/// Render a timestamp in the wire format (`2025-01-15T10:00:00.000Z`).
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Record::from_value(json!([1, 2])).is_err());
        assert!(Record::from_value(json!("hi")).is_err());
        assert!(Record::from_value(json!({"id": "evt-1"})).is_ok());
    }

    #[test]
    fn test_absent_visible_counts_as_visible() {
        assert!(record(json!({"title": "Open Play"})).is_visible());
        assert!(record(json!({"visible": true})).is_visible());
        assert!(record(json!({"visible": null})).is_visible());
        assert!(!record(json!({"visible": false})).is_visible());
    }

    #[test]
    fn test_assign_identity_overwrites_caller_fields() {
        let now = Utc::now();
        let mut rec = record(json!({"id": "spoofed", "createdAt": "1999-01-01T00:00:00Z"}));
        let id = rec.assign_identity(Collection::Events, now);
        assert!(id.starts_with("evt-"));
        assert_eq!(rec.id(), Some(id.as_str()));
        assert_eq!(rec.created_at().unwrap().timestamp(), now.timestamp());
    }

    #[test]
    fn test_apply_patch_merges_shallow_and_keeps_id() {
        let now = Utc::now();
        let mut rec = record(json!({"id": "evt-1", "title": "Mixer", "price": 45}));
        let patch = record(json!({"id": "evt-2", "price": 50, "capacity": 24})).into_fields();
        rec.apply_patch(patch, now);

        assert_eq!(rec.id(), Some("evt-1"));
        assert_eq!(rec.number_field("price"), Some(50.0));
        assert_eq!(rec.number_field("capacity"), Some(24.0));
        assert_eq!(rec.str_field("title"), Some("Mixer"));
        assert!(rec.str_field("updatedAt").is_some());
    }

    #[test]
    fn test_date_parses_calendar_dates() {
        let rec = record(json!({"date": "2025-03-15"}));
        assert_eq!(
            rec.date(),
            Some(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        );
        assert!(record(json!({"date": "soon"})).date().is_none());
        assert!(record(json!({"title": "no date"})).date().is_none());
    }

    #[test]
    fn test_timestamp_wire_format() {
        let ts = DateTime::parse_from_rfc3339("2025-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(ts), "2025-01-15T10:00:00.000Z");
    }
}
