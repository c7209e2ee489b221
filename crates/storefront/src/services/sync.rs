//! Inbound payment-provider sync.
//!
//! Applies verified `product.*` webhook events to the document store. Three
//! rules keep the two systems from fighting each other:
//!
//! - an event whose metadata carries the CMS origin tag is the echo of a
//!   write this system made itself and is never applied (loop prevention);
//! - provider-owned fields (name, description, active flag) are the only
//!   fields an update overwrites; everything locally owned (price, stock,
//!   gallery, categories, variants) is preserved verbatim;
//! - a provider-side delete tombstones by status instead of removing the
//!   record, so local work survives an accidental delete.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use oakline_core::{DocumentStatus, Slug, SyncOrigin};

use crate::cms::collections;
use crate::cms::documents::{Document, ProductData};
use crate::cms::store::{DocumentQuery, MutationCtx, Store, StoreError};
use crate::services::payments::ProviderProduct;

/// Errors from applying a sync event.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("product payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A provider webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: WebhookData,
}

/// The `data` member of a webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    pub object: ProviderProduct,
}

/// What applying an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
    Tombstoned,
    Skipped(SkipReason),
}

/// Why an event was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The event is the echo of a CMS-originated write.
    CmsOrigin,
    /// A record with this provider id already exists.
    AlreadyExists,
    /// No record with this provider id.
    NotFound,
    /// Event type this service does not handle.
    UnhandledEvent,
}

/// Apply one verified webhook event to the store.
///
/// # Errors
///
/// Returns an error if the store fails or a stored product payload is
/// corrupt. Callers at the webhook boundary log and swallow these.
#[instrument(skip(store, event), fields(kind = %event.kind, provider_id = %event.data.object.id))]
pub async fn apply_event(store: &Store, event: &WebhookEvent) -> Result<SyncOutcome, SyncError> {
    let outcome = match event.kind.as_str() {
        "product.created" => product_created(store, &event.data.object).await?,
        "product.updated" => product_updated(store, &event.data.object).await?,
        "product.deleted" => product_deleted(store, &event.data.object).await?,
        _ => SyncOutcome::Skipped(SkipReason::UnhandledEvent),
    };
    info!(?outcome, "Applied sync event");
    Ok(outcome)
}

async fn product_created(
    store: &Store,
    product: &ProviderProduct,
) -> Result<SyncOutcome, SyncError> {
    let origin = SyncOrigin::from_metadata_tag(product.origin_tag());
    if !origin.should_apply_inbound() {
        return Ok(SyncOutcome::Skipped(SkipReason::CmsOrigin));
    }

    let existing = find_by_provider_id(store, &product.id).await?;
    if existing.is_some() {
        // Repeat delivery; the first one won.
        return Ok(SyncOutcome::Skipped(SkipReason::AlreadyExists));
    }

    let data = ProductData {
        title: product.name.clone(),
        description: product.description.clone().unwrap_or_default(),
        active: product.active,
        provider_id: Some(product.id.clone()),
        origin,
        ..ProductData::default()
    };

    let slug = slug_for_provider_product(product);
    let doc = Document::new(collections::PRODUCTS, slug, DocumentStatus::Draft, &data)?;
    store.create(&MutationCtx::external(), doc).await?;
    Ok(SyncOutcome::Created)
}

async fn product_updated(
    store: &Store,
    product: &ProviderProduct,
) -> Result<SyncOutcome, SyncError> {
    let origin = SyncOrigin::from_metadata_tag(product.origin_tag());
    if !origin.should_apply_inbound() {
        return Ok(SyncOutcome::Skipped(SkipReason::CmsOrigin));
    }

    let Some(doc) = find_by_provider_id(store, &product.id).await? else {
        return Ok(SyncOutcome::Skipped(SkipReason::NotFound));
    };

    // Overwrite only the provider-owned fields; everything else stays.
    let mut data: ProductData = doc.payload(false)?;
    data.title = product.name.clone();
    data.description = product.description.clone().unwrap_or_default();
    data.active = product.active;

    store
        .update(
            &MutationCtx::external(),
            collections::PRODUCTS,
            doc.id,
            serde_json::to_value(&data)?,
        )
        .await?;
    Ok(SyncOutcome::Updated)
}

async fn product_deleted(
    store: &Store,
    product: &ProviderProduct,
) -> Result<SyncOutcome, SyncError> {
    let Some(doc) = find_by_provider_id(store, &product.id).await? else {
        return Ok(SyncOutcome::Skipped(SkipReason::NotFound));
    };

    store
        .set_status(
            &MutationCtx::external(),
            collections::PRODUCTS,
            doc.id,
            DocumentStatus::Draft,
        )
        .await?;
    Ok(SyncOutcome::Tombstoned)
}

async fn find_by_provider_id(
    store: &Store,
    provider_id: &str,
) -> Result<Option<Document>, StoreError> {
    let mut docs = store
        .find(
            collections::PRODUCTS,
            &DocumentQuery::by_provider_id(provider_id),
        )
        .await?;
    Ok(docs.drain(..).next())
}

/// Derive a slug from the provider product name, falling back to the
/// provider id when the name has no usable characters.
fn slug_for_provider_product(product: &ProviderProduct) -> Option<Slug> {
    slugify(&product.name).or_else(|| slugify(&product.id))
}

fn slugify(input: &str) -> Option<Slug> {
    let mut out = String::with_capacity(input.len());
    let mut last_hyphen = true;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out.truncate(128);
    Slug::parse(&out).ok()
}
