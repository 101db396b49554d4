//! Populate default content directly against the storage backend.

use tracing::info;

use courtside_api::store::SeedOutcome;

use super::open_store;

/// Seed default content, unless the store already holds any.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a write fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;

    match store.seed().await? {
        SeedOutcome::AlreadySeeded => info!("Data already seeded; nothing to do"),
        SeedOutcome::Seeded(collections) => {
            info!("Default content seeded:");
            for collection in collections {
                info!("  {collection}");
            }
        }
    }
    Ok(())
}
