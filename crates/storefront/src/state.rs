//! Application state shared across handlers.

use std::sync::Arc;

use crate::carts::CartStore;
use crate::catalog::CatalogClient;
use crate::config::ShopHubConfig;
use crate::wishlist::{FileStore, WishlistStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the catalog client, the cart registry, and the
/// wishlist store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopHubConfig,
    catalog: CatalogClient,
    carts: CartStore,
    wishlist: WishlistStore,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// The wishlist is backed by a file store under the configured data
    /// directory.
    #[must_use]
    pub fn new(config: ShopHubConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let wishlist = WishlistStore::new(FileStore::new(&config.data_dir));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts: CartStore::new(),
                wishlist,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &ShopHubConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }
}
