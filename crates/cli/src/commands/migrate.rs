//! Run key-value schema migrations.

use tracing::info;

use courtside_api::{config, db};

/// Apply pending migrations to the configured database.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = config::database_url_from_env()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    db::run_migrations(&pool).await?;
    info!("Migrations applied");

    Ok(())
}
