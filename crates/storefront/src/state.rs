//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::cms::store::Store;
use crate::config::StorefrontConfig;
use crate::services::payments::{PaymentsClient, PaymentsError};

/// Page cache TTL.
const PAGE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Page cache capacity.
const PAGE_CACHE_CAPACITY: u64 = 512;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the document store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: Option<PgPool>,
    store: Store,
    payments: PaymentsClient,
    /// Rendered-page cache keyed by request path. Preview requests bypass it.
    page_cache: Cache<String, String>,
}

impl AppState {
    /// Create the application state for the production Postgres store.
    ///
    /// # Errors
    ///
    /// Returns an error if the payments HTTP client fails to build.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, PaymentsError> {
        let payments = PaymentsClient::new(&config.payments)?;
        let store = Store::postgres(pool.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool: Some(pool),
                store,
                payments,
                page_cache: page_cache(),
            }),
        })
    }

    /// Create state over an in-memory store. Used by tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the payments HTTP client fails to build.
    pub fn in_memory(config: StorefrontConfig) -> Result<Self, PaymentsError> {
        let payments = PaymentsClient::new(&config.payments)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool: None,
                store: Store::memory(),
                payments,
                page_cache: page_cache(),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the database connection pool, when running against Postgres.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the payment provider client.
    #[must_use]
    pub fn payments(&self) -> &PaymentsClient {
        &self.inner.payments
    }

    /// Get a reference to the rendered-page cache.
    #[must_use]
    pub fn page_cache(&self) -> &Cache<String, String> {
        &self.inner.page_cache
    }
}

fn page_cache() -> Cache<String, String> {
    Cache::builder()
        .max_capacity(PAGE_CACHE_CAPACITY)
        .time_to_live(PAGE_CACHE_TTL)
        .build()
}
