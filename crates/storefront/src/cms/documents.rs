//! Document envelope and typed per-collection payloads.
//!
//! A [`Document`] is the raw stored record: identity, collection tag,
//! lifecycle status, and a JSON payload for the published revision plus an
//! optional diverged draft revision. The typed structs in this module give
//! each collection its editable shape; [`Document::payload`] decodes one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use oakline_core::{DocumentId, DocumentStatus, Email, Price, Slug, SyncOrigin};

use super::blocks::{Hero, Layout, MediaRef};

/// A stored CMS document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub collection: String,
    pub slug: Option<Slug>,
    pub status: DocumentStatus,
    /// Published revision.
    pub data: Value,
    /// Draft revision, when it has diverged from the published one.
    pub draft_data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a fresh document for `collection` from a typed payload.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload cannot be encoded,
    /// which only happens for non-string map keys and the like.
    pub fn new<T: Serialize>(
        collection: &str,
        slug: Option<Slug>,
        status: DocumentStatus,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        let now = Utc::now();
        Ok(Self {
            id: DocumentId::generate(),
            collection: collection.to_string(),
            slug,
            status,
            data: serde_json::to_value(payload)?,
            draft_data: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// The revision a request should see: draft when previewing (if one has
    /// diverged), published otherwise.
    #[must_use]
    pub fn revision(&self, draft: bool) -> &Value {
        if draft {
            self.draft_data.as_ref().unwrap_or(&self.data)
        } else {
            &self.data
        }
    }

    /// Decode the requested revision into a typed payload.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error if the stored JSON does not match the
    /// collection's shape.
    pub fn payload<T: DeserializeOwned>(&self, draft: bool) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.revision(draft).clone())
    }
}

// =============================================================================
// Pages
// =============================================================================

/// Editable shape of a page: title, hero, and an ordered block layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageData {
    pub title: String,
    pub description: Option<String>,
    pub hero: Hero,
    pub layout: Layout,
}

// =============================================================================
// Products
// =============================================================================

/// A product variant, independently priced and independently markable on-sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub label: String,
    pub price: Price,
    #[serde(default)]
    pub sale_price: Option<Price>,
    #[serde(default)]
    pub on_sale: bool,
    #[serde(default)]
    pub active: bool,
}

impl ProductVariant {
    /// The variant's sale price to show, if its sale is active and plausible.
    #[must_use]
    pub fn active_sale_price(&self) -> Option<Price> {
        if !self.on_sale {
            return None;
        }
        self.sale_price.filter(|sale| sale.cents() < self.price.cents())
    }
}

/// Editable shape of a product.
///
/// Provider-owned fields (`title`, `description`, `active`) are overwritten
/// by webhook sync; everything else is locally owned and preserved verbatim
/// across sync events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductData {
    pub title: String,
    /// Searchable description, also shown on the product page.
    pub description: String,
    pub price: Price,
    pub sale_price: Option<Price>,
    pub on_sale: bool,
    pub active: bool,
    pub stock: i64,
    pub gallery: Vec<MediaRef>,
    pub categories: Vec<DocumentId>,
    pub variants: Vec<ProductVariant>,
    /// External payment-provider identifier, once synced.
    pub provider_id: Option<String>,
    /// Where the record originated.
    pub origin: SyncOrigin,
}

impl ProductData {
    /// The sale price to show, if the sale is active and plausible.
    #[must_use]
    pub fn active_sale_price(&self) -> Option<Price> {
        if !self.on_sale {
            return None;
        }
        self.sale_price.filter(|sale| sale.cents() < self.price.cents())
    }
}

// =============================================================================
// Supporting collections
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryData {
    pub title: String,
    pub description: Option<String>,
}

/// An uploaded media document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaData {
    pub url: String,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A column of links in the site footer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterColumn {
    pub heading: String,
    pub links: Vec<FooterLink>,
}

/// A single footer link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

/// The footer global: reference/config document with no special lifecycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterData {
    pub columns: Vec<FooterColumn>,
    pub copyright: Option<String>,
}

/// An editor account, used only to gate draft preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorData {
    pub email: Email,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::collections;

    #[test]
    fn test_revision_prefers_draft_in_preview() {
        let mut doc = Document::new(
            collections::PAGES,
            Some(Slug::parse("home").expect("valid slug")),
            DocumentStatus::Published,
            &PageData {
                title: "Live title".to_string(),
                ..PageData::default()
            },
        )
        .expect("serializable");

        // No draft: both modes see the published revision
        let live: PageData = doc.payload(false).expect("decode");
        let preview: PageData = doc.payload(true).expect("decode");
        assert_eq!(live.title, "Live title");
        assert_eq!(preview.title, "Live title");

        // Diverged draft: only preview sees it
        doc.draft_data = Some(
            serde_json::to_value(PageData {
                title: "Draft title".to_string(),
                ..PageData::default()
            })
            .expect("serializable"),
        );
        let live: PageData = doc.payload(false).expect("decode");
        let preview: PageData = doc.payload(true).expect("decode");
        assert_eq!(live.title, "Live title");
        assert_eq!(preview.title, "Draft title");
    }

    #[test]
    fn test_active_sale_price_requires_discount() {
        let mut product = ProductData {
            price: Price::from_cents(10_000),
            sale_price: Some(Price::from_cents(7_500)),
            on_sale: true,
            ..ProductData::default()
        };
        assert_eq!(product.active_sale_price(), Some(Price::from_cents(7_500)));

        // Sale flag off
        product.on_sale = false;
        assert_eq!(product.active_sale_price(), None);

        // Sale price not below regular: suppressed rather than rendered
        product.on_sale = true;
        product.sale_price = Some(Price::from_cents(12_000));
        assert_eq!(product.active_sale_price(), None);
    }

    #[test]
    fn test_variant_sale_price_is_independent() {
        let mut variant = ProductVariant {
            label: "5 litre".to_string(),
            price: Price::from_cents(10_000),
            sale_price: Some(Price::from_cents(7_500)),
            on_sale: true,
            active: true,
        };
        assert_eq!(variant.active_sale_price(), Some(Price::from_cents(7_500)));

        variant.on_sale = false;
        assert_eq!(variant.active_sale_price(), None);

        variant.on_sale = true;
        variant.sale_price = Some(Price::from_cents(10_000));
        assert_eq!(variant.active_sale_price(), None);
    }

    #[test]
    fn test_product_defaults_for_unowned_fields() {
        // A product created from a webhook carries only provider-owned
        // fields; everything else must default cleanly.
        let json = serde_json::json!({
            "title": "Oak Barrel",
            "description": "A barrel",
            "active": true,
            "providerId": "prod_123",
            "origin": "external"
        });
        let product: ProductData = serde_json::from_value(json).expect("decode");
        assert_eq!(product.stock, 0);
        assert!(product.gallery.is_empty());
        assert!(product.categories.is_empty());
        assert_eq!(product.provider_id.as_deref(), Some("prod_123"));
        assert_eq!(product.origin, SyncOrigin::External);
    }
}
