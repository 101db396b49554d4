//! Courtside dashboard content layer.
//!
//! This crate is the data half of the admin dashboard: it talks to the
//! data API, keeps an optimistic local cache so the UI never waits on
//! the network, and falls back to a purely local file-backed store when
//! running without an API.
//!
//! Two deployment modes exist:
//!
//! - [`SyncedStore`] - reads come from an in-memory cache hydrated from
//!   the API; mutations apply to the cache immediately and push to the
//!   server in the background. Push failures are logged and not rolled
//!   back, so local and remote state can diverge until the next
//!   [`SyncedStore::refresh`]. This is a deliberate trade-off, not a bug.
//! - [`LocalStore`] - every operation reads and writes a JSON file per
//!   collection. No network, no cache, last writer wins.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod local;
pub mod session;
pub mod sync;

pub use client::ApiClient;
pub use config::AdminConfig;
pub use error::ClientError;
pub use local::{LocalStore, LocalStoreError};
pub use session::Session;
pub use sync::SyncedStore;
