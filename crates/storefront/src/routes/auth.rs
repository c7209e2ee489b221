//! Editor authentication routes.
//!
//! Sign-in exists only to gate draft preview; there are no visitor
//! accounts. Failed sign-ins re-render the form with a generic message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::cms::documents::FooterData;
use crate::error::Result;
use crate::filters;
use crate::middleware::session::{set_current_editor, set_preview};
use crate::services::auth::{AuthError, verify_editor};
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub next: Option<String>,
    pub footer: FooterData,
}

/// Login page query parameters.
#[derive(Debug, Deserialize)]
pub struct LoginParams {
    /// Path to return to after sign-in.
    pub next: Option<String>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

/// Display the login page.
#[instrument(skip(state))]
pub async fn login_page(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> LoginTemplate {
    LoginTemplate {
        error: None,
        next: sanitize_next(params.next),
        footer: super::site_footer(state.store()).await,
    }
}

/// Handle a login form submission.
///
/// # Errors
///
/// Returns an error if the session store fails; bad credentials re-render
/// the form instead of erroring.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<LoginForm>,
) -> Result<Response> {
    let next = sanitize_next(form.next);

    match verify_editor(state.store(), &form.email, &form.password).await {
        Ok(editor) => {
            // Rotate the session id on privilege change
            session.cycle_id().await?;
            set_current_editor(&session, editor.id).await?;
            info!(editor = %editor.email, "Editor signed in");
            Ok(Redirect::to(next.as_deref().unwrap_or("/")).into_response())
        }
        Err(
            err @ (AuthError::InvalidCredentials
            | AuthError::EditorNotFound
            | AuthError::InvalidEmail(_)),
        ) => {
            warn!(error = %err, "Sign-in rejected");
            Ok(LoginTemplate {
                error: Some("Invalid email or password.".to_string()),
                next,
                footer: super::site_footer(state.store()).await,
            }
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Sign out: drop the editor and the preview flag with the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    set_preview(&session, false).await?;
    session.flush().await?;
    info!("Editor signed out");
    Ok(Redirect::to("/").into_response())
}

/// Only allow same-site relative redirect targets.
fn sanitize_next(next: Option<String>) -> Option<String> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_next_only_relative_paths() {
        assert_eq!(
            sanitize_next(Some("/pages/about".to_string())),
            Some("/pages/about".to_string())
        );
        assert_eq!(sanitize_next(Some("https://evil.example".to_string())), None);
        assert_eq!(sanitize_next(Some("//evil.example".to_string())), None);
        assert_eq!(sanitize_next(None), None);
    }
}
