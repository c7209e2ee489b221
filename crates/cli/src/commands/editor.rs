//! Editor account management.

use tracing::info;

use oakline_storefront::cms::store::Store;
use oakline_storefront::services::auth;

/// Create an editor account.
///
/// # Errors
///
/// Returns an error if the email is malformed or the insert fails.
pub async fn create(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let store = Store::postgres(pool);

    let editor = auth::create_editor(&store, email, password).await?;
    info!(id = %editor.id, email = %editor.email, "Editor created");
    Ok(())
}
