//! CLI command implementations.

pub mod editor;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect to the storefront database from the environment.
///
/// # Errors
///
/// Returns an error if `OAKLINE_DATABASE_URL` (or `DATABASE_URL`) is missing
/// or the connection fails.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("OAKLINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "OAKLINE_DATABASE_URL not set")?;

    let pool = oakline_storefront::db::create_pool(&database_url).await?;
    Ok(pool)
}
