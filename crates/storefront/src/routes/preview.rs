//! Draft preview entry and exit.
//!
//! `GET /preview` validates a referenced draft document, flips the session's
//! preview flag, and redirects to the requested path. The checks run in a
//! fixed order so the response is precise about what failed: missing `path`
//! is a 404, an unauthenticated caller is a 401, a missing document is a
//! 404, and only then is the flag set.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument};

use oakline_core::Slug;

use crate::error::{AppError, Result};
use crate::middleware::session::{current_editor, set_preview};
use crate::state::AppState;

/// Preview entry query parameters.
#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    pub path: Option<String>,
    pub collection: Option<String>,
    pub slug: Option<String>,
}

/// Enter preview mode and redirect to the previewed path.
///
/// # Errors
///
/// Returns 404 when `path` is missing or the referenced document does not
/// exist, 401 when no editor is signed in.
#[instrument(skip(state, session))]
pub async fn enter(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PreviewParams>,
) -> Result<Response> {
    let Some(path) = params.path.filter(|p| p.starts_with('/')) else {
        return Err(AppError::NotFound("preview path missing".to_string()));
    };

    if current_editor(&session).await?.is_none() {
        return Err(AppError::Unauthorized(
            "preview requires an editor session".to_string(),
        ));
    }

    // When the link names a document, require it to exist before enabling
    // preview; a stale link should 404 instead of silently previewing.
    if let (Some(collection), Some(slug)) = (params.collection.as_deref(), params.slug.as_deref()) {
        let slug = Slug::parse(slug)
            .map_err(|_| AppError::NotFound(format!("no document at {collection}/{slug}")))?;
        let found = state
            .store()
            .find_by_slug(collection, slug.clone(), true)
            .await?;
        if found.is_none() {
            return Err(AppError::NotFound(format!(
                "no document at {collection}/{slug}"
            )));
        }
    }

    set_preview(&session, true).await?;
    info!(%path, "Preview mode enabled");
    Ok(Redirect::to(&path).into_response())
}

/// Leave preview mode and return to the live home page.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip(session))]
pub async fn exit(session: Session) -> Result<Response> {
    set_preview(&session, false).await?;
    info!("Preview mode disabled");
    Ok(Redirect::to("/").into_response())
}
