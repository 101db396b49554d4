//! Bulk export/import interchange format.
//!
//! A backup is a single JSON object keyed by collection name, each value
//! the full record list: `{ "events": [...], "posts": [...] }`. Export is
//! pretty-printed with collections in key order, so exporting, importing,
//! and exporting again reproduces the same bytes. Import ignores keys
//! that are not collection names.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::collection::Collection;
use crate::record::Record;

/// Serialize collection snapshots as a pretty-printed backup document.
#[must_use]
pub fn export(collections: &[(Collection, Vec<Record>)]) -> String {
    let document: BTreeMap<&str, &Vec<Record>> = collections
        .iter()
        .map(|(collection, records)| (collection.as_str(), records))
        .collect();
    serde_json::to_string_pretty(&document).expect("backup document serializes to JSON")
}

/// Parse a backup document into per-collection record lists.
///
/// Unknown keys are skipped; the order of the result follows
/// [`Collection::ALL`] for the collections present.
///
/// # Errors
///
/// Returns an error if the document is not a JSON object or a collection
/// entry is not an array of objects.
pub fn parse(document: &str) -> Result<Vec<(Collection, Vec<Record>)>, serde_json::Error> {
    let parsed: BTreeMap<String, Value> = serde_json::from_str(document)?;

    let mut collections = Vec::new();
    for collection in Collection::ALL {
        if let Some(value) = parsed.get(collection.as_str()) {
            let records: Vec<Record> = serde_json::from_value(value.clone())?;
            collections.push((collection, records));
        }
    }
    Ok(collections)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_export_import_round_trip_is_byte_stable() {
        let first = export(&defaults::all());
        let reimported = parse(&first).unwrap();
        let second = export(&reimported);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let document = r#"{"events": [{"id": "evt-1"}], "widgets": [{"id": "w-1"}]}"#;
        let collections = parse(document).unwrap();
        assert_eq!(collections.len(), 1);
        let (collection, records) = collections.first().unwrap();
        assert_eq!(*collection, Collection::Events);
        assert_eq!(records.first().unwrap().id(), Some("evt-1"));
    }

    #[test]
    fn test_parse_rejects_malformed_documents() {
        assert!(parse("[1, 2, 3]").is_err());
        assert!(parse(r#"{"events": "not a list"}"#).is_err());
        assert!(parse("{not json").is_err());
    }
}
