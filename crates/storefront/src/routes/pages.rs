//! Page route handlers.
//!
//! Serves block-composed pages from the `pages` collection. The home page
//! is the page with slug `home`. Published renders are cached; preview
//! requests (draft revisions) bypass the cache entirely.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use oakline_core::Slug;

use crate::cms::blocks::{Block, PopulateBy};
use crate::cms::collections;
use crate::cms::documents::{FooterData, PageData, ProductData};
use crate::cms::store::{DocumentQuery, SortKey, Store};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::session::preview_enabled;
use crate::render::{ProductCard, render_block, render_hero};
use crate::state::AppState;

/// Slug of the page served at `/`.
const HOME_SLUG: &str = "home";

/// Block-composed page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/page.html")]
pub struct PageTemplate {
    pub title: String,
    pub description: Option<String>,
    pub hero_html: Option<String>,
    pub blocks_html: Vec<String>,
    pub preview: bool,
    pub footer: FooterData,
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub footer: FooterData,
}

/// Render the 404 page as a response.
#[must_use]
pub fn not_found_response(footer: FooterData) -> Response {
    (StatusCode::NOT_FOUND, NotFoundTemplate { footer }).into_response()
}

/// Display the home page.
///
/// # Errors
///
/// Returns an error if the store or a template fails.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<Response> {
    serve_page(&state, &session, HOME_SLUG).await
}

/// Display a page by slug.
///
/// # Errors
///
/// Returns an error if the store or a template fails.
#[instrument(skip(state, session))]
pub async fn page(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Response> {
    serve_page(&state, &session, &slug).await
}

async fn serve_page(state: &AppState, session: &Session, slug: &str) -> Result<Response> {
    let Ok(slug) = Slug::parse(slug) else {
        return Ok(not_found_response(super::site_footer(state.store()).await));
    };

    let preview = preview_enabled(session).await?;

    let cache_key = format!("page:{slug}");
    if !preview {
        if let Some(cached) = state.page_cache().get(&cache_key).await {
            return Ok(Html(cached).into_response());
        }
    }

    let Some(doc) = state
        .store()
        .find_by_slug(collections::PAGES, slug, preview)
        .await?
    else {
        return Ok(not_found_response(super::site_footer(state.store()).await));
    };

    let data: PageData = doc
        .payload(preview)
        .map_err(|e| AppError::Internal(format!("corrupt page payload: {e}")))?;

    let hero_html = render_hero(&data.hero)
        .map_err(|e| AppError::Internal(format!("hero render failed: {e}")))?;

    let mut blocks_html = Vec::with_capacity(data.layout.len());
    for block in &data.layout {
        let products = archive_products(state.store(), block).await?;
        let html = render_block(block, &products)
            .map_err(|e| AppError::Internal(format!("block render failed: {e}")))?;
        blocks_html.push(html);
    }

    let template = PageTemplate {
        title: data.title,
        description: data.description,
        hero_html,
        blocks_html,
        preview,
        footer: super::site_footer(state.store()).await,
    };
    let html = template
        .render()
        .map_err(|e| AppError::Internal(format!("page render failed: {e}")))?;

    if !preview {
        state.page_cache().insert(cache_key, html.clone()).await;
    }
    Ok(Html(html).into_response())
}

/// Fetch the product cards an archive block needs. Non-archive blocks get an
/// empty slice.
///
/// Archive blocks always show published products, in preview mode too: a
/// draft product has no live detail page to link to.
async fn archive_products(store: &Store, block: &Block) -> Result<Vec<ProductCard>> {
    let Block::Archive {
        populate_by,
        categories,
        selection,
        limit,
        ..
    } = block
    else {
        return Ok(Vec::new());
    };

    let limit = usize::try_from(*limit).unwrap_or(usize::MAX);
    let mut cards = Vec::new();

    match populate_by {
        PopulateBy::Collection => {
            let docs = store
                .find(
                    collections::PRODUCTS,
                    &DocumentQuery {
                        sort: SortKey::Newest,
                        ..DocumentQuery::default()
                    },
                )
                .await?;
            for doc in docs {
                let Some(slug) = doc.slug.as_ref() else {
                    continue;
                };
                let Ok(data) = doc.payload::<ProductData>(false) else {
                    continue;
                };
                if !categories.is_empty() && !data.categories.iter().any(|c| categories.contains(c))
                {
                    continue;
                }
                cards.push(ProductCard::from_product(slug, &data));
                if cards.len() >= limit {
                    break;
                }
            }
        }
        PopulateBy::Selection => {
            for id in selection.iter().take(limit) {
                let Some(doc) = store.find_by_id(collections::PRODUCTS, *id).await? else {
                    continue;
                };
                if !doc.status.is_published() {
                    continue;
                }
                let Some(slug) = doc.slug.as_ref() else {
                    continue;
                };
                let Ok(data) = doc.payload::<ProductData>(false) else {
                    continue;
                };
                cards.push(ProductCard::from_product(slug, &data));
            }
        }
    }

    Ok(cards)
}
