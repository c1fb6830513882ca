//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::auth::TokenCodec;
use crate::services::listing::{ListingClient, ListingError};
use crate::storage::FileStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool, the file store, and the
/// canonical product catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    files: FileStore,
    catalog: Catalog,
    tokens: TokenCodec,
    listing: ListingClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing-copy HTTP client fails to build.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, ListingError> {
        let files = FileStore::new(pool.clone());
        let tokens = TokenCodec::new(&config.jwt_secret);
        let listing = ListingClient::new(&config.listing_api_url)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                files,
                catalog: Catalog::builtin(),
                tokens,
                listing,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the blob file store.
    #[must_use]
    pub fn files(&self) -> &FileStore {
        &self.inner.files
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the session token codec.
    #[must_use]
    pub fn tokens(&self) -> &TokenCodec {
        &self.inner.tokens
    }

    /// Get a reference to the listing-copy client.
    #[must_use]
    pub fn listing(&self) -> &ListingClient {
        &self.inner.listing
    }
}
