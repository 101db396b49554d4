//! Shared content types for the Courtside club platform.
//!
//! This crate holds everything both sides of the system agree on: the
//! closed set of content collections, the schema-less record type, pure
//! query views over record lists, the static default content, and the
//! bulk export/import interchange format.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod defaults;
pub mod display;
pub mod interchange;
pub mod record;
pub mod views;

pub use collection::{Collection, UnknownCollection};
pub use record::{Record, RecordError};
pub use views::{
    AnnouncementsView, EventsView, PostsView, ProductsView, ProgramsView, Stats, today_utc,
};
