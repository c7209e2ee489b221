//! The document store: the query/mutation API the storefront consumes.
//!
//! Two backends sit behind one [`Store`] enum: `PostgreSQL` (JSONB rows in
//! the `documents` table) for production and an in-memory map for tests and
//! seeded demos. Both answer the same [`DocumentQuery`] with the same
//! semantics, so everything above this module is backend-agnostic.
//!
//! Mutations take a [`MutationCtx`] carrying the [`SyncOrigin`] guard used
//! by webhook loop prevention; the store itself only logs it, the sync
//! service is what acts on it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde_json::Value;
use sqlx::{PgPool, Row, postgres::PgRow};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use oakline_core::{DocumentId, DocumentStatus, Slug, SyncOrigin};

use super::documents::Document;

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored row did not match the expected shape.
    #[error("corrupt document {id}: {reason}")]
    Corrupt { id: DocumentId, reason: String },

    /// Payload could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No document with the given id in the collection.
    #[error("document not found: {collection}/{id}")]
    NotFound {
        collection: String,
        id: DocumentId,
    },
}

/// Sort order for document queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Alphabetical by title — the default everywhere.
    #[default]
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortKey {
    /// Parse a query-string sort value; anything unrecognized falls back to
    /// the default alphabetical order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "-title" => Self::TitleDesc,
            "price" => Self::PriceAsc,
            "-price" => Self::PriceDesc,
            "-createdAt" => Self::Newest,
            _ => Self::TitleAsc,
        }
    }

    /// Query-string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TitleAsc => "title",
            Self::TitleDesc => "-title",
            Self::PriceAsc => "price",
            Self::PriceDesc => "-price",
            Self::Newest => "-createdAt",
        }
    }
}

/// Filter predicate, selection and sort for [`Store::find`].
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    /// Exact slug match.
    pub slug: Option<Slug>,
    /// Exact provider-id match (`data ->> 'providerId'`).
    pub provider_id: Option<String>,
    /// Case-insensitive substring match across title and description.
    pub search: Option<String>,
    pub sort: SortKey,
    /// Draft mode: include unpublished documents.
    pub draft: bool,
    pub limit: Option<i64>,
}

impl DocumentQuery {
    /// Query for a single document by slug.
    #[must_use]
    pub fn by_slug(slug: Slug, draft: bool) -> Self {
        Self {
            slug: Some(slug),
            draft,
            limit: Some(1),
            ..Self::default()
        }
    }

    /// Query for a single document by its external provider id.
    ///
    /// Provider lookups always include drafts: a tombstoned product must
    /// still be found so repeat deliveries stay no-ops.
    #[must_use]
    pub fn by_provider_id(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: Some(provider_id.into()),
            draft: true,
            limit: Some(1),
            ..Self::default()
        }
    }
}

/// Context threaded through every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationCtx {
    /// Who initiated this mutation.
    pub origin: SyncOrigin,
}

impl MutationCtx {
    /// A mutation initiated inside the CMS.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            origin: SyncOrigin::Local,
        }
    }

    /// A mutation applied on behalf of an inbound provider event.
    #[must_use]
    pub const fn external() -> Self {
        Self {
            origin: SyncOrigin::External,
        }
    }
}

/// The document store, dispatching to one of two backends.
#[derive(Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Store {
    /// Production store backed by `PostgreSQL`.
    #[must_use]
    pub const fn postgres(pool: PgPool) -> Self {
        Self::Postgres(PgStore { pool })
    }

    /// Ephemeral in-memory store for tests and demos.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Find documents in a collection matching a query.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the backend query fails.
    #[instrument(skip(self))]
    pub async fn find(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Postgres(pg) => pg.find(collection, query).await,
            Self::Memory(mem) => mem.find(collection, query),
        }
    }

    /// Find a single document by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the backend query fails.
    pub async fn find_by_id(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        match self {
            Self::Postgres(pg) => pg.find_by_id(collection, id).await,
            Self::Memory(mem) => Ok(mem.find_by_id(collection, id)),
        }
    }

    /// Find a single document by slug. Convenience over [`Self::find`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the backend query fails.
    pub async fn find_by_slug(
        &self,
        collection: &str,
        slug: Slug,
        draft: bool,
    ) -> Result<Option<Document>, StoreError> {
        let mut docs = self
            .find(collection, &DocumentQuery::by_slug(slug, draft))
            .await?;
        Ok(docs.drain(..).next())
    }

    /// Insert a new document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the insert fails.
    #[instrument(skip(self, doc), fields(collection = doc.collection, id = %doc.id, origin = %ctx.origin))]
    pub async fn create(&self, ctx: &MutationCtx, doc: Document) -> Result<Document, StoreError> {
        tracing::debug!("Creating document");
        match self {
            Self::Postgres(pg) => pg.create(doc).await,
            Self::Memory(mem) => Ok(mem.create(doc)),
        }
    }

    /// Overwrite the published revision of a document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist, or
    /// `StoreError::Database` if the update fails.
    #[instrument(skip(self, data), fields(origin = %ctx.origin))]
    pub async fn update(
        &self,
        ctx: &MutationCtx,
        collection: &str,
        id: DocumentId,
        data: Value,
    ) -> Result<Document, StoreError> {
        tracing::debug!("Updating document");
        match self {
            Self::Postgres(pg) => pg.update(collection, id, data).await,
            Self::Memory(mem) => mem.update(collection, id, data),
        }
    }

    /// Save a diverged draft revision without touching the published one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist.
    pub async fn save_draft(
        &self,
        collection: &str,
        id: DocumentId,
        draft: Value,
    ) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pg) => pg.save_draft(collection, id, draft).await,
            Self::Memory(mem) => mem.save_draft(collection, id, draft),
        }
    }

    /// Change a document's lifecycle status.
    ///
    /// Publishing promotes the draft revision (if any) to published;
    /// unpublishing (the tombstone path) changes only the status and leaves
    /// every field value exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the document does not exist.
    #[instrument(skip(self), fields(origin = %ctx.origin))]
    pub async fn set_status(
        &self,
        ctx: &MutationCtx,
        collection: &str,
        id: DocumentId,
        status: DocumentStatus,
    ) -> Result<(), StoreError> {
        tracing::debug!(status = %status, "Setting document status");
        match self {
            Self::Postgres(pg) => pg.set_status(collection, id, status).await,
            Self::Memory(mem) => mem.set_status(collection, id, status),
        }
    }
}

// =============================================================================
// PostgreSQL backend
// =============================================================================

/// `PostgreSQL` document store backend.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

const DOCUMENT_COLUMNS: &str =
    "id, collection, slug, status, data, draft_data, created_at, updated_at";

impl PgStore {
    fn order_clause(sort: SortKey) -> &'static str {
        match sort {
            SortKey::TitleAsc => " ORDER BY lower(data ->> 'title') ASC NULLS LAST",
            SortKey::TitleDesc => " ORDER BY lower(data ->> 'title') DESC NULLS LAST",
            SortKey::PriceAsc => " ORDER BY (data ->> 'price')::bigint ASC NULLS LAST",
            SortKey::PriceDesc => " ORDER BY (data ->> 'price')::bigint DESC NULLS LAST",
            SortKey::Newest => " ORDER BY created_at DESC",
        }
    }

    async fn find(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE collection = "
        ));
        builder.push_bind(collection.to_string());

        if !query.draft {
            builder.push(" AND status = 'published'");
        }
        if let Some(slug) = &query.slug {
            builder.push(" AND slug = ");
            builder.push_bind(slug.as_str().to_string());
        }
        if let Some(provider_id) = &query.provider_id {
            builder.push(" AND data ->> 'providerId' = ");
            builder.push_bind(provider_id.clone());
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", escape_like(search));
            builder.push(" AND (data ->> 'title' ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR data ->> 'description' ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }

        builder.push(Self::order_clause(query.sort));

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(document_from_row).collect()
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE collection = $1 AND id = $2"
        ))
        .bind(collection)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(document_from_row).transpose()
    }

    async fn create(&self, doc: Document) -> Result<Document, StoreError> {
        sqlx::query(
            "INSERT INTO documents (id, collection, slug, status, data, draft_data, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(doc.id.as_uuid())
        .bind(&doc.collection)
        .bind(doc.slug.as_ref().map(|s| s.as_str().to_string()))
        .bind(doc.status.as_str())
        .bind(&doc.data)
        .bind(&doc.draft_data)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(doc)
    }

    async fn update(
        &self,
        collection: &str,
        id: DocumentId,
        data: Value,
    ) -> Result<Document, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE documents SET data = $3, updated_at = now() \
             WHERE collection = $1 AND id = $2 \
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(collection)
        .bind(id.as_uuid())
        .bind(&data)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => document_from_row(&row),
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id,
            }),
        }
    }

    async fn save_draft(
        &self,
        collection: &str,
        id: DocumentId,
        draft: Value,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE documents SET draft_data = $3, updated_at = now() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id.as_uuid())
        .bind(&draft)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id,
            });
        }
        Ok(())
    }

    async fn set_status(
        &self,
        collection: &str,
        id: DocumentId,
        status: DocumentStatus,
    ) -> Result<(), StoreError> {
        // Publishing promotes the draft revision; any other status change
        // leaves both revisions untouched (tombstone-by-status).
        let sql = if status.is_published() {
            "UPDATE documents SET status = $3, data = COALESCE(draft_data, data), \
             draft_data = NULL, updated_at = now() \
             WHERE collection = $1 AND id = $2"
        } else {
            "UPDATE documents SET status = $3, updated_at = now() \
             WHERE collection = $1 AND id = $2"
        };

        let result = sqlx::query(sql)
            .bind(collection)
            .bind(id.as_uuid())
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id,
            });
        }
        Ok(())
    }
}

/// Escape `%` and `_` so user input can't act as LIKE wildcards.
fn escape_like(input: &str) -> String {
    input.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn document_from_row(row: &PgRow) -> Result<Document, StoreError> {
    let id = DocumentId::from_uuid(row.try_get::<Uuid, _>("id")?);
    let status: String = row.try_get("status")?;
    let slug: Option<String> = row.try_get("slug")?;

    Ok(Document {
        id,
        collection: row.try_get("collection")?,
        slug: slug
            .map(|s| Slug::parse(&s))
            .transpose()
            .map_err(|e| StoreError::Corrupt {
                id,
                reason: e.to_string(),
            })?,
        status: status.parse().unwrap_or_default(),
        data: row.try_get("data")?,
        draft_data: row.try_get("draft_data")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// =============================================================================
// In-memory backend
// =============================================================================

/// In-memory document store for tests and seeded demos.
#[derive(Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<HashMap<Uuid, Document>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::unnecessary_wraps)] // signature mirrors the Postgres backend
    fn find(&self, collection: &str, query: &DocumentQuery) -> Result<Vec<Document>, StoreError> {
        let docs = self.docs.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut matched: Vec<Document> = docs
            .values()
            .filter(|doc| doc.collection == collection)
            .filter(|doc| query.draft || doc.status.is_published())
            .filter(|doc| {
                query
                    .slug
                    .as_ref()
                    .is_none_or(|slug| doc.slug.as_ref() == Some(slug))
            })
            .filter(|doc| {
                query.provider_id.as_deref().is_none_or(|pid| {
                    doc.data.get("providerId").and_then(Value::as_str) == Some(pid)
                })
            })
            .filter(|doc| {
                query.search.as_deref().is_none_or(|needle| {
                    let needle = needle.to_lowercase();
                    ["title", "description"].iter().any(|field| {
                        doc.data
                            .get(field)
                            .and_then(Value::as_str)
                            .is_some_and(|text| text.to_lowercase().contains(&needle))
                    })
                })
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| Self::compare(query.sort, a, b));

        if let Some(limit) = query.limit {
            matched.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(matched)
    }

    fn compare(sort: SortKey, a: &Document, b: &Document) -> std::cmp::Ordering {
        let title = |doc: &Document| {
            doc.data
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_lowercase()
        };
        let price = |doc: &Document| doc.data.get("price").and_then(Value::as_i64).unwrap_or(0);

        match sort {
            SortKey::TitleAsc => title(a).cmp(&title(b)),
            SortKey::TitleDesc => title(b).cmp(&title(a)),
            SortKey::PriceAsc => price(a).cmp(&price(b)),
            SortKey::PriceDesc => price(b).cmp(&price(a)),
            SortKey::Newest => b.created_at.cmp(&a.created_at),
        }
    }

    fn find_by_id(&self, collection: &str, id: DocumentId) -> Option<Document> {
        let docs = self.docs.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        docs.get(&id.as_uuid())
            .filter(|doc| doc.collection == collection)
            .cloned()
    }

    fn create(&self, doc: Document) -> Document {
        let mut docs = self.docs.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        docs.insert(doc.id.as_uuid(), doc.clone());
        doc
    }

    fn update(
        &self,
        collection: &str,
        id: DocumentId,
        data: Value,
    ) -> Result<Document, StoreError> {
        let mut docs = self.docs.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let doc = docs
            .get_mut(&id.as_uuid())
            .filter(|doc| doc.collection == collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id,
            })?;
        doc.data = data;
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    fn save_draft(
        &self,
        collection: &str,
        id: DocumentId,
        draft: Value,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let doc = docs
            .get_mut(&id.as_uuid())
            .filter(|doc| doc.collection == collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id,
            })?;
        doc.draft_data = Some(draft);
        doc.updated_at = Utc::now();
        Ok(())
    }

    fn set_status(
        &self,
        collection: &str,
        id: DocumentId,
        status: DocumentStatus,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let doc = docs
            .get_mut(&id.as_uuid())
            .filter(|doc| doc.collection == collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id,
            })?;
        if status.is_published() {
            if let Some(draft) = doc.draft_data.take() {
                doc.data = draft;
            }
        }
        doc.status = status;
        doc.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::collections;
    use crate::cms::documents::{PageData, ProductData};
    use oakline_core::Price;

    async fn seeded_store() -> Store {
        let store = Store::memory();
        let ctx = MutationCtx::local();

        for (title, description, cents, published) in [
            ("Oak Barrel", "Charred white oak aging barrel", 10_000, true),
            ("Barrel Stand", "Steel cradle for a 5L barrel", 4_500, true),
            ("Test Batch Kit", "Unreleased sampler", 2_000, false),
        ] {
            let slug = Slug::parse(&title.to_lowercase().replace(' ', "-")).expect("valid slug");
            let status = if published {
                DocumentStatus::Published
            } else {
                DocumentStatus::Draft
            };
            let doc = Document::new(
                collections::PRODUCTS,
                Some(slug),
                status,
                &ProductData {
                    title: title.to_string(),
                    description: description.to_string(),
                    price: Price::from_cents(cents),
                    active: true,
                    ..ProductData::default()
                },
            )
            .expect("serializable");
            store.create(&ctx, doc).await.expect("create");
        }
        store
    }

    #[tokio::test]
    async fn test_find_excludes_drafts_by_default() {
        let store = seeded_store().await;
        let all = store
            .find(collections::PRODUCTS, &DocumentQuery::default())
            .await
            .expect("find");
        assert_eq!(all.len(), 2);

        let with_drafts = store
            .find(
                collections::PRODUCTS,
                &DocumentQuery {
                    draft: true,
                    ..DocumentQuery::default()
                },
            )
            .await
            .expect("find");
        assert_eq!(with_drafts.len(), 3);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = seeded_store().await;
        let query = DocumentQuery {
            search: Some("BARREL".to_string()),
            ..DocumentQuery::default()
        };
        let hits = store
            .find(collections::PRODUCTS, &query)
            .await
            .expect("find");
        assert_eq!(hits.len(), 2);

        // Matches the description field too
        let query = DocumentQuery {
            search: Some("steel cradle".to_string()),
            ..DocumentQuery::default()
        };
        let hits = store
            .find(collections::PRODUCTS, &query)
            .await
            .expect("find");
        assert_eq!(hits.len(), 1);

        // Non-matching query returns empty, not an error
        let query = DocumentQuery {
            search: Some("velvet".to_string()),
            ..DocumentQuery::default()
        };
        let hits = store
            .find(collections::PRODUCTS, &query)
            .await
            .expect("find");
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_default_sort_is_alphabetical_by_title() {
        let store = seeded_store().await;
        let docs = store
            .find(collections::PRODUCTS, &DocumentQuery::default())
            .await
            .expect("find");
        let titles: Vec<_> = docs
            .iter()
            .map(|d| d.data.get("title").and_then(Value::as_str).unwrap_or(""))
            .collect();
        assert_eq!(titles, ["Barrel Stand", "Oak Barrel"]);
    }

    #[tokio::test]
    async fn test_price_sort() {
        let store = seeded_store().await;
        let docs = store
            .find(
                collections::PRODUCTS,
                &DocumentQuery {
                    sort: SortKey::PriceDesc,
                    ..DocumentQuery::default()
                },
            )
            .await
            .expect("find");
        let prices: Vec<_> = docs
            .iter()
            .map(|d| d.data.get("price").and_then(Value::as_i64).unwrap_or(0))
            .collect();
        assert_eq!(prices, [10_000, 4_500]);
    }

    #[tokio::test]
    async fn test_publish_promotes_draft_revision() {
        let store = Store::memory();
        let ctx = MutationCtx::local();
        let doc = Document::new(
            collections::PAGES,
            Some(Slug::parse("about").expect("valid")),
            DocumentStatus::Published,
            &PageData {
                title: "Old".to_string(),
                ..PageData::default()
            },
        )
        .expect("serializable");
        let id = doc.id;
        store.create(&ctx, doc).await.expect("create");

        let draft = serde_json::to_value(PageData {
            title: "New".to_string(),
            ..PageData::default()
        })
        .expect("serializable");
        store
            .save_draft(collections::PAGES, id, draft)
            .await
            .expect("save draft");

        store
            .set_status(&ctx, collections::PAGES, id, DocumentStatus::Published)
            .await
            .expect("publish");

        let doc = store
            .find_by_id(collections::PAGES, id)
            .await
            .expect("find")
            .expect("exists");
        assert_eq!(doc.data.get("title").and_then(Value::as_str), Some("New"));
        assert!(doc.draft_data.is_none());
    }

    #[tokio::test]
    async fn test_set_status_not_found() {
        let store = Store::memory();
        let err = store
            .set_status(
                &MutationCtx::external(),
                collections::PRODUCTS,
                DocumentId::generate(),
                DocumentStatus::Draft,
            )
            .await
            .expect_err("missing doc");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("title"), SortKey::TitleAsc);
        assert_eq!(SortKey::parse("-title"), SortKey::TitleDesc);
        assert_eq!(SortKey::parse("price"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("-price"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("-createdAt"), SortKey::Newest);
        assert_eq!(SortKey::parse("anything-else"), SortKey::TitleAsc);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }
}
