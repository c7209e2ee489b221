//! Local catalog mutations.
//!
//! The outbound half of provider sync: product writes that originate inside
//! the CMS (CLI seeding, editor tooling) go through here so they are pushed
//! to the payment provider with the CMS origin tag before the local record
//! is saved. The provider then echoes the write back as a webhook event,
//! which the inbound sync recognizes by the tag and ignores.

use thiserror::Error;
use tracing::{info, instrument, warn};

use oakline_core::{DocumentId, DocumentStatus, Slug};

use crate::cms::collections;
use crate::cms::documents::{Document, ProductData};
use crate::cms::store::{MutationCtx, Store, StoreError};
use crate::services::payments::{PaymentsClient, PaymentsError};

/// Errors from catalog mutations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Payments(#[from] PaymentsError),

    #[error("product payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Create a product locally, pushing it to the provider first when a client
/// is configured.
///
/// A successful provider push stamps `provider_id` before the local insert,
/// so the echoed `product.created` webhook finds the record and no-ops. A
/// failed push is logged and the product is still saved locally without a
/// provider id; a later push can adopt it.
///
/// # Errors
///
/// Returns an error if the local insert fails.
#[instrument(skip(store, payments, data), fields(title = %data.title))]
pub async fn create_product(
    store: &Store,
    payments: Option<&PaymentsClient>,
    slug: Option<Slug>,
    mut data: ProductData,
    status: DocumentStatus,
) -> Result<Document, CatalogError> {
    data.origin = oakline_core::SyncOrigin::Local;

    if let Some(client) = payments {
        match client
            .create_product(&data.title, Some(&data.description), data.active)
            .await
        {
            Ok(remote) => {
                info!(provider_id = %remote.id, "Pushed product to provider");
                data.provider_id = Some(remote.id);
            }
            Err(err) => {
                warn!(error = %err, "Provider push failed, saving locally only");
            }
        }
    }

    let doc = Document::new(collections::PRODUCTS, slug, status, &data)?;
    let doc = store.create(&MutationCtx::local(), doc).await?;
    Ok(doc)
}

/// Update a product locally and push the provider-owned fields outward.
///
/// # Errors
///
/// Returns an error if the local update fails.
#[instrument(skip(store, payments, data))]
pub async fn update_product(
    store: &Store,
    payments: Option<&PaymentsClient>,
    id: DocumentId,
    data: ProductData,
) -> Result<Document, CatalogError> {
    if let (Some(client), Some(provider_id)) = (payments, data.provider_id.as_deref()) {
        if let Err(err) = client
            .update_product(provider_id, &data.title, Some(&data.description), data.active)
            .await
        {
            warn!(error = %err, provider_id, "Provider push failed, updating locally only");
        }
    }

    let doc = store
        .update(
            &MutationCtx::local(),
            collections::PRODUCTS,
            id,
            serde_json::to_value(&data)?,
        )
        .await?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oakline_core::{Price, SyncOrigin};

    #[tokio::test]
    async fn test_create_without_provider_client() {
        let store = Store::memory();
        let data = ProductData {
            title: "Oak Barrel".to_string(),
            description: "Charred white oak".to_string(),
            price: Price::from_cents(10_000),
            active: true,
            ..ProductData::default()
        };
        let doc = create_product(
            &store,
            None,
            Some(Slug::parse("oak-barrel").expect("valid")),
            data,
            DocumentStatus::Published,
        )
        .await
        .expect("create");

        let stored: ProductData = doc.payload(false).expect("decode");
        assert_eq!(stored.origin, SyncOrigin::Local);
        assert!(stored.provider_id.is_none());
        assert_eq!(doc.status, DocumentStatus::Published);
    }

    #[tokio::test]
    async fn test_update_without_provider_client() {
        let store = Store::memory();
        let doc = create_product(
            &store,
            None,
            Some(Slug::parse("oak-barrel").expect("valid")),
            ProductData {
                title: "Oak Barrel".to_string(),
                ..ProductData::default()
            },
            DocumentStatus::Draft,
        )
        .await
        .expect("create");

        let mut data: ProductData = doc.payload(false).expect("decode");
        data.stock = 5;
        let updated = update_product(&store, None, doc.id, data)
            .await
            .expect("update");
        let stored: ProductData = updated.payload(false).expect("decode");
        assert_eq!(stored.stock, 5);
    }
}
