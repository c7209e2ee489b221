//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use oakline_core::Slug;

use crate::cms::collections;
use crate::cms::documents::{FooterData, ProductData};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::session::preview_enabled;
use crate::render::{ImageView, markdown::render_markdown};
use crate::routes::pages::not_found_response;
use crate::state::AppState;

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/product.html")]
pub struct ProductTemplate {
    pub title: String,
    pub meta_description: Option<String>,
    pub description_html: String,
    pub price: String,
    pub sale_price: Option<String>,
    pub percent_off: Option<u8>,
    pub in_stock: bool,
    pub gallery: Vec<ImageView>,
    pub variants: Vec<VariantView>,
    pub preview: bool,
    /// Provider dashboard deep link, shown in the preview bar for synced
    /// products. Test-mode keys link into the dashboard's test area.
    pub dashboard_url: Option<String>,
    pub footer: FooterData,
}

/// One selectable variant row.
pub struct VariantView {
    pub label: String,
    pub price: String,
    /// Sale price display, present only while the variant's own sale is active.
    pub sale_price: Option<String>,
}

impl std::fmt::Display for VariantView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.sale_price {
            Some(sale) => write!(f, "{} — {sale} (was {})", self.label, self.price),
            None => write!(f, "{} — {}", self.label, self.price),
        }
    }
}

/// Display a product by slug.
///
/// # Errors
///
/// Returns an error if the store or the template fails.
#[instrument(skip(state, session))]
pub async fn product(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Response> {
    let Ok(slug) = Slug::parse(&slug) else {
        return Ok(not_found_response(super::site_footer(state.store()).await));
    };

    let preview = preview_enabled(&session).await?;

    let Some(doc) = state
        .store()
        .find_by_slug(collections::PRODUCTS, slug, preview)
        .await?
    else {
        return Ok(not_found_response(super::site_footer(state.store()).await));
    };

    let data: ProductData = doc
        .payload(preview)
        .map_err(|e| AppError::Internal(format!("corrupt product payload: {e}")))?;

    let sale = data.active_sale_price();
    let dashboard_url = if preview {
        data.provider_id
            .as_deref()
            .map(|id| state.config().payments.product_dashboard_url(id))
    } else {
        None
    };
    let template = ProductTemplate {
        meta_description: summarize(&data.description),
        description_html: render_markdown(&data.description),
        price: data.price.display(),
        sale_price: sale.map(|p| p.display()),
        percent_off: sale.and_then(|p| data.price.percent_off(p)),
        in_stock: data.stock > 0,
        gallery: data
            .gallery
            .iter()
            .filter_map(|media| {
                media.resolved().map(|(url, alt)| ImageView {
                    url: url.to_string(),
                    alt: alt.to_string(),
                })
            })
            .collect(),
        variants: data
            .variants
            .iter()
            .filter(|v| v.active)
            .map(|v| VariantView {
                label: v.label.clone(),
                price: v.price.display(),
                sale_price: v.active_sale_price().map(|p| p.display()),
            })
            .collect(),
        title: data.title,
        preview,
        dashboard_url,
        footer: super::site_footer(state.store()).await,
    };
    Ok(template.into_response())
}

/// First line of the description, for the meta tag.
fn summarize(description: &str) -> Option<String> {
    let line = description.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.chars().take(200).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_takes_first_line() {
        assert_eq!(
            summarize("Charred white oak.\n\nAges 5L batches."),
            Some("Charred white oak.".to_string())
        );
        assert_eq!(summarize(""), None);
        assert_eq!(summarize("\n\n"), None);
    }

    #[test]
    fn test_variant_row_shows_sale_price_when_present() {
        let on_sale = VariantView {
            label: "5 litre".to_string(),
            price: "$100.00".to_string(),
            sale_price: Some("$75.00".to_string()),
        };
        assert_eq!(on_sale.to_string(), "5 litre — $75.00 (was $100.00)");

        let regular = VariantView {
            label: "3 litre".to_string(),
            price: "$80.00".to_string(),
            sale_price: None,
        };
        assert_eq!(regular.to_string(), "3 litre — $80.00");
    }

    fn preview_template(dashboard_url: Option<String>) -> ProductTemplate {
        ProductTemplate {
            title: "Oak Barrel".to_string(),
            meta_description: None,
            description_html: "<p>Charred white oak.</p>".to_string(),
            price: "$100.00".to_string(),
            sale_price: None,
            percent_off: None,
            in_stock: true,
            gallery: vec![],
            variants: vec![],
            preview: true,
            dashboard_url,
            footer: FooterData::default(),
        }
    }

    #[test]
    fn test_preview_bar_links_synced_products_to_the_dashboard() {
        let html = preview_template(Some(
            "https://dashboard.payments.example.com/test/products/prod_123".to_string(),
        ))
        .render()
        .unwrap();
        assert!(html.contains("Open in payments dashboard"));
        assert!(html.contains("/test/products/prod_123"));
    }

    #[test]
    fn test_unsynced_products_get_no_dashboard_link() {
        let html = preview_template(None).render().unwrap();
        assert!(html.contains("Previewing draft content"));
        assert!(!html.contains("Open in payments dashboard"));
    }
}
