//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                     - Home page (the `home` page document)
//! GET  /pages/{slug}         - Block-composed page
//! GET  /products/{slug}      - Product detail
//! GET  /search               - Product search and catalog browse
//!
//! # Preview
//! GET  /preview              - Enter draft preview (editors only)
//! GET  /preview/exit         - Leave draft preview
//!
//! # Auth
//! GET  /auth/login           - Login page
//! POST /auth/login           - Login action
//! POST /auth/logout          - Logout action
//!
//! # Webhooks
//! POST /webhooks/payments    - Payment provider events
//! ```

pub mod auth;
pub mod pages;
pub mod preview;
pub mod products;
pub mod search;
pub mod webhooks;

use axum::{
    Router,
    routing::{get, post},
};
use tracing::warn;

use oakline_core::Slug;

use crate::cms::collections;
use crate::cms::documents::FooterData;
use crate::cms::store::Store;
use crate::state::AppState;

/// Create the application router (without the ambient middleware layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/pages/{slug}", get(pages::page))
        .route("/products/{slug}", get(products::product))
        .route("/search", get(search::search))
        .route("/preview", get(preview::enter))
        .route("/preview/exit", get(preview::exit))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/webhooks/payments", post(webhooks::payments))
}

/// Fetch the footer global for the base template. A missing or unreadable
/// footer renders as the built-in fallback rather than failing the page.
pub(crate) async fn site_footer(store: &Store) -> FooterData {
    let Ok(slug) = Slug::parse("footer") else {
        return FooterData::default();
    };
    match store.find_by_slug(collections::GLOBALS, slug, false).await {
        Ok(Some(doc)) => doc.payload(false).unwrap_or_else(|err| {
            warn!(error = %err, "Corrupt footer global");
            FooterData::default()
        }),
        Ok(None) => FooterData::default(),
        Err(err) => {
            warn!(error = %err, "Footer global lookup failed");
            FooterData::default()
        }
    }
}
