//! The closed set of content collections.
//!
//! Every piece of managed content lives in exactly one of five named
//! collections. The set is fixed; operations on any other name are
//! rejected at the edges (HTTP handlers, import) by failing to parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A named content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Events,
    Programs,
    Posts,
    Announcements,
    Products,
}

/// Error returned when parsing an unknown collection name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown collection '{0}', expected one of: events, programs, posts, announcements, products")]
pub struct UnknownCollection(pub String);

impl Collection {
    /// All collections, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Events,
        Self::Programs,
        Self::Posts,
        Self::Announcements,
        Self::Products,
    ];

    /// The collection name as used in storage keys and over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Programs => "programs",
            Self::Posts => "posts",
            Self::Announcements => "announcements",
            Self::Products => "products",
        }
    }

    /// Short prefix used for record ids in this collection (`evt-...`).
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Events => "evt",
            Self::Programs => "prg",
            Self::Posts => "post",
            Self::Announcements => "ann",
            Self::Products => "prod",
        }
    }

    /// Generate a fresh record id for this collection.
    ///
    /// Ids are the collection prefix plus a random UUID, so they stay
    /// readable in exports while being collision-resistant under
    /// concurrent creation.
    #[must_use]
    pub fn generate_id(self) -> String {
        format!("{}-{}", self.id_prefix(), Uuid::new_v4())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events" => Ok(Self::Events),
            "programs" => Ok(Self::Programs),
            "posts" => Ok(Self::Posts),
            "announcements" => Ok(Self::Announcements),
            "products" => Ok(Self::Products),
            other => Err(UnknownCollection(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        for collection in Collection::ALL {
            assert_eq!(collection.as_str().parse::<Collection>(), Ok(collection));
        }
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "members".parse::<Collection>().unwrap_err();
        assert_eq!(err, UnknownCollection("members".to_string()));
        assert!("".parse::<Collection>().is_err());
        assert!("Events".parse::<Collection>().is_err());
    }

    #[test]
    fn test_generated_ids_carry_prefix_and_are_unique() {
        let a = Collection::Events.generate_id();
        let b = Collection::Events.generate_id();
        assert!(a.starts_with("evt-"));
        assert_ne!(a, b);

        let uuid_part = a.strip_prefix("evt-").unwrap();
        assert!(Uuid::parse_str(uuid_part).is_ok());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Collection::Announcements).unwrap();
        assert_eq!(json, "\"announcements\"");
        let back: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Collection::Announcements);
    }
}
