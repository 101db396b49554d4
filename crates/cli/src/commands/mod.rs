//! CLI command implementations.

pub mod data;
pub mod migrate;
pub mod seed;

use std::sync::Arc;

use courtside_api::kv::PgKv;
use courtside_api::store::CollectionStore;
use courtside_api::{config, db};

/// Connect to the configured database and build a collection store over it.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the connection fails.
pub async fn open_store() -> Result<CollectionStore, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = config::database_url_from_env()?;
    let pool = db::create_pool(&database_url).await?;
    Ok(CollectionStore::new(Arc::new(PgKv::new(pool))))
}
