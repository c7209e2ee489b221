//! Session middleware configuration and session-key helpers.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. Sessions carry
//! two things: the signed-in editor's document id and the preview flag that
//! switches page routes to draft revisions.

use sqlx::PgPool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use oakline_core::DocumentId;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "oakline_session";

/// Session key holding the signed-in editor's document id.
pub const EDITOR_SESSION_KEY: &str = "editor_id";

/// Session key holding the draft-preview flag.
pub const PREVIEW_SESSION_KEY: &str = "preview";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with a `PostgreSQL` store.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The sessions table is created by the store's own migration (CLI)
    let store = PostgresStore::new(pool.clone());

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// The signed-in editor's id, if any.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_editor(
    session: &Session,
) -> Result<Option<DocumentId>, tower_sessions::session::Error> {
    session.get::<DocumentId>(EDITOR_SESSION_KEY).await
}

/// Record a successful editor sign-in.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_current_editor(
    session: &Session,
    editor_id: DocumentId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(EDITOR_SESSION_KEY, editor_id).await
}

/// Whether this session has preview mode enabled.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn preview_enabled(
    session: &Session,
) -> Result<bool, tower_sessions::session::Error> {
    Ok(session
        .get::<bool>(PREVIEW_SESSION_KEY)
        .await?
        .unwrap_or(false))
}

/// Turn preview mode on or off for this session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_preview(
    session: &Session,
    enabled: bool,
) -> Result<(), tower_sessions::session::Error> {
    if enabled {
        session.insert(PREVIEW_SESSION_KEY, true).await
    } else {
        session.remove::<bool>(PREVIEW_SESSION_KEY).await.map(|_| ())
    }
}
