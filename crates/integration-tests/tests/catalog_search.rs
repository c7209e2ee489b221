//! Catalog query tests against a seeded store: search matching, sort
//! orders, and the visibility rules tombstoned products fall under.

use oakline_core::{DocumentStatus, Slug};
use oakline_integration_tests::seeded_catalog;
use oakline_storefront::cms::collections;
use oakline_storefront::cms::documents::ProductData;
use oakline_storefront::cms::store::{DocumentQuery, MutationCtx, SortKey, Store};

async fn titles(store: &Store, query: &DocumentQuery) -> Vec<String> {
    store
        .find(collections::PRODUCTS, query)
        .await
        .expect("store query")
        .iter()
        .map(|doc| {
            let data: ProductData = doc.payload(false).expect("payload");
            data.title
        })
        .collect()
}

#[tokio::test]
async fn test_search_is_case_insensitive_over_title() {
    let store = seeded_catalog().await;
    let query = DocumentQuery {
        search: Some("BARREL".to_string()),
        ..DocumentQuery::default()
    };
    assert_eq!(titles(&store, &query).await, ["Barrel Stand", "Oak Barrel"]);
}

#[tokio::test]
async fn test_search_also_matches_description() {
    let store = seeded_catalog().await;
    // Every fixture description mentions the workshop
    let query = DocumentQuery {
        search: Some("workshop".to_string()),
        ..DocumentQuery::default()
    };
    assert_eq!(titles(&store, &query).await.len(), 3);
}

#[tokio::test]
async fn test_search_without_match_is_empty() {
    let store = seeded_catalog().await;
    let query = DocumentQuery {
        search: Some("wine rack".to_string()),
        ..DocumentQuery::default()
    };
    assert!(titles(&store, &query).await.is_empty());
}

#[tokio::test]
async fn test_default_sort_is_alphabetical() {
    let store = seeded_catalog().await;
    assert_eq!(
        titles(&store, &DocumentQuery::default()).await,
        ["Barrel Stand", "Char Sampler Kit", "Oak Barrel"]
    );
}

#[tokio::test]
async fn test_price_sort_orders_by_list_price() {
    let store = seeded_catalog().await;
    let cheapest_first = DocumentQuery {
        sort: SortKey::PriceAsc,
        ..DocumentQuery::default()
    };
    assert_eq!(
        titles(&store, &cheapest_first).await,
        ["Char Sampler Kit", "Barrel Stand", "Oak Barrel"]
    );

    let dearest_first = DocumentQuery {
        sort: SortKey::PriceDesc,
        ..DocumentQuery::default()
    };
    assert_eq!(
        titles(&store, &dearest_first).await,
        ["Oak Barrel", "Barrel Stand", "Char Sampler Kit"]
    );
}

#[tokio::test]
async fn test_tombstoned_product_leaves_search_results() {
    let store = seeded_catalog().await;
    let doc = store
        .find_by_slug(
            collections::PRODUCTS,
            Slug::parse("oak-barrel").expect("valid slug"),
            false,
        )
        .await
        .expect("store query")
        .expect("product found");
    store
        .set_status(
            &MutationCtx::external(),
            collections::PRODUCTS,
            doc.id,
            DocumentStatus::Draft,
        )
        .await
        .expect("tombstone");

    let query = DocumentQuery {
        search: Some("barrel".to_string()),
        ..DocumentQuery::default()
    };
    assert_eq!(titles(&store, &query).await, ["Barrel Stand"]);

    // Draft-inclusive queries still see it
    let draft_query = DocumentQuery {
        search: Some("barrel".to_string()),
        draft: true,
        ..DocumentQuery::default()
    };
    assert_eq!(
        titles(&store, &draft_query).await,
        ["Barrel Stand", "Oak Barrel"]
    );
}
