//! Integration test fixtures for Oakline.
//!
//! The behavioural tests in `tests/` run the storefront's CMS, render, and
//! sync layers against the in-memory store backend, so they need no running
//! database or payment provider.

use oakline_core::{DocumentStatus, Price, Slug};
use oakline_storefront::cms::collections;
use oakline_storefront::cms::documents::{Document, ProductData};
use oakline_storefront::cms::store::{MutationCtx, Store};
use oakline_storefront::services::payments::ProviderProduct;
use oakline_storefront::services::sync::{WebhookData, WebhookEvent};

/// A published product document ready for the memory store.
///
/// # Panics
///
/// Panics on an invalid slug or unserializable payload; fixtures use
/// known-good values.
#[must_use]
pub fn product_doc(title: &str, slug: &str, cents: i64, sale_cents: Option<i64>) -> Document {
    let data = ProductData {
        title: title.to_string(),
        description: format!("{title} from the Oakline workshop"),
        price: Price::from_cents(cents),
        sale_price: sale_cents.map(Price::from_cents),
        on_sale: sale_cents.is_some(),
        active: true,
        stock: 10,
        ..ProductData::default()
    };
    Document::new(
        collections::PRODUCTS,
        Some(Slug::parse(slug).expect("valid fixture slug")),
        DocumentStatus::Published,
        &data,
    )
    .expect("serializable fixture payload")
}

/// Seed a memory store with a small published catalog.
///
/// # Panics
///
/// Panics if a fixture insert fails, which the memory backend never does.
pub async fn seeded_catalog() -> Store {
    let store = Store::memory();
    let ctx = MutationCtx::local();
    for doc in [
        product_doc("Oak Barrel", "oak-barrel", 10_000, Some(7_500)),
        product_doc("Barrel Stand", "barrel-stand", 4_500, None),
        product_doc("Char Sampler Kit", "char-sampler-kit", 2_999, None),
    ] {
        store.create(&ctx, doc).await.expect("fixture insert");
    }
    store
}

/// Build a `product.*` webhook event.
#[must_use]
pub fn provider_event(kind: &str, id: &str, name: &str, metadata: &[(&str, &str)]) -> WebhookEvent {
    WebhookEvent {
        kind: kind.to_string(),
        data: WebhookData {
            object: ProviderProduct {
                id: id.to_string(),
                name: name.to_string(),
                description: Some(format!("{name} description")),
                active: true,
                metadata: metadata
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            },
        },
    }
}
