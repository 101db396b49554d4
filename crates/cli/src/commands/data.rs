//! Content backup, restore, and stats commands.

use std::path::Path;

use tracing::{info, warn};

use courtside_core::{Collection, Record, Stats, interchange, today_utc};

use super::open_store;

/// Export every collection to a backup document.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the file cannot be
/// written.
pub async fn export(out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;

    let mut collections: Vec<(Collection, Vec<Record>)> = Vec::new();
    for collection in Collection::ALL {
        let records = store.get_all(collection).await?;
        info!("  {}: {} records", collection, records.len());
        collections.push((collection, records));
    }

    tokio::fs::write(out, interchange::export(&collections)).await?;
    info!("Backup written to {}", out.display());
    Ok(())
}

/// Import collections from a backup document, replacing their contents.
///
/// # Errors
///
/// Returns an error if the file is unreadable, the document is malformed,
/// or a write fails.
pub async fn import(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;

    let document = tokio::fs::read_to_string(file).await?;
    let collections = interchange::parse(&document)?;
    if collections.is_empty() {
        warn!("Backup document names no known collections; nothing imported");
        return Ok(());
    }

    for (collection, records) in collections {
        info!("  {}: {} records", collection, records.len());
        store.replace(collection, records).await?;
    }
    info!("Import complete");
    Ok(())
}

/// Print dashboard summary numbers.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn stats() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;

    let stats = Stats::compute(
        &store.get_all(Collection::Events).await?,
        &store.get_all(Collection::Programs).await?,
        &store.get_all(Collection::Posts).await?,
        &store.get_all(Collection::Products).await?,
        today_utc(),
    );

    info!("Courtside content stats");
    info!("=======================");
    info!("Upcoming events:      {}", stats.upcoming_events);
    info!("Visible programs:     {}", stats.visible_programs);
    info!("Visible posts:        {}", stats.visible_posts);
    info!("Visible products:     {}", stats.visible_products);
    info!("Total registrations:  {}", stats.total_registrations);
    info!("Estimated revenue:    ${:.2}", stats.estimated_revenue);
    Ok(())
}
