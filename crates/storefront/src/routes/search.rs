//! Product search page.
//!
//! One store query per request: case-insensitive substring match over title
//! and description, with a requested sort order. An empty query browses the
//! whole catalog, and the template distinguishes "nothing matched your
//! query" from "the catalog is empty".

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::cms::collections;
use crate::cms::documents::{FooterData, ProductData};
use crate::cms::store::{DocumentQuery, SortKey};
use crate::error::Result;
use crate::filters;
use crate::render::ProductCard;
use crate::state::AppState;

/// Search page query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub sort: &'static str,
    /// Whether a non-empty query was submitted.
    pub searched: bool,
    pub products: Vec<ProductCard>,
    pub footer: FooterData,
}

/// Display the search page.
///
/// # Errors
///
/// Returns an error if the store query fails.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<SearchTemplate> {
    let query = params.q.trim().to_string();
    let searched = !query.is_empty();
    let sort = params.sort.as_deref().map_or(SortKey::TitleAsc, SortKey::parse);

    let docs = state
        .store()
        .find(
            collections::PRODUCTS,
            &DocumentQuery {
                search: searched.then(|| query.clone()),
                sort,
                ..DocumentQuery::default()
            },
        )
        .await?;

    let products = docs
        .iter()
        .filter_map(|doc| {
            let slug = doc.slug.as_ref()?;
            let data: ProductData = doc.payload(false).ok()?;
            Some(ProductCard::from_product(slug, &data))
        })
        .collect();

    Ok(SearchTemplate {
        query,
        sort: sort.as_str(),
        searched,
        products,
        footer: super::site_footer(state.store()).await,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(query: &str, searched: bool, products: Vec<ProductCard>) -> String {
        SearchTemplate {
            query: query.to_string(),
            sort: SortKey::TitleAsc.as_str(),
            searched,
            products,
            footer: FooterData::default(),
        }
        .render()
        .unwrap()
    }

    fn card(title: &str) -> ProductCard {
        ProductCard {
            title: title.to_string(),
            href: "/products/oak-barrel".to_string(),
            image: None,
            price: "$100.00".to_string(),
            sale_price: None,
            percent_off: None,
        }
    }

    #[test]
    fn test_no_match_message_names_the_query() {
        let html = render("bourbon", true, vec![]);
        assert!(html.contains("No products match"));
        assert!(html.contains("bourbon"));
        assert!(!html.contains("product-grid"));
    }

    #[test]
    fn test_empty_catalog_message_differs_from_no_match() {
        let html = render("", false, vec![]);
        assert!(html.contains("No products available yet"));
        assert!(!html.contains("No products match"));
    }

    #[test]
    fn test_results_render_cards_without_empty_messaging() {
        let html = render("barrel", true, vec![card("Oak Barrel")]);
        assert!(html.contains("product-grid"));
        assert!(html.contains("Oak Barrel"));
        assert!(html.contains("$100.00"));
        assert!(!html.contains("No products"));
    }
}
