//! Database migration command.
//!
//! Runs the storefront migrations (the `documents` table) and then the
//! tower-sessions store migration, which owns the `tower_sessions` schema.

use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

/// Run all database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running storefront migrations");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Running session store migration");
    let session_store = PostgresStore::new(pool);
    session_store.migrate().await?;

    info!("Migrations complete");
    Ok(())
}
