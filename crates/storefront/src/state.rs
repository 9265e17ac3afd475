//! Application state shared across UI event handlers.

use std::sync::{Arc, Mutex};

use tracing::warn;

use oakline_core::ItemId;

use crate::catalog::{CatalogClient, CatalogError, FavoriteView};
use crate::checkout::{CheckoutError, CheckoutService, OrderForm, SubmittedOrder};
use crate::config::StorefrontConfig;
use crate::store::{CartStore, FavoritesStore, Storage, persistence};
use crate::telegram::TelegramClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The stores are explicit
/// injected instances rather than ambient globals: every test (and every
/// engine embedding) constructs its own isolated state. Mutations are
/// expected from a single event loop; the mutexes only enforce the
/// exclusive access the model already assumes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: Mutex<CartStore>,
    favorites: Mutex<FavoritesStore>,
    catalog: CatalogClient,
    checkout: CheckoutService<TelegramClient>,
}

impl AppState {
    /// Create the state with on-disk persistence at the configured
    /// data directory.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        if !persistence::probe_data_dir(&config.data_dir) {
            warn!(dir = %config.data_dir.display(), "data directory unusable, snapshots will not persist");
        }
        let storage = Storage::on_disk(&config.data_dir);
        Self::with_storage(config, storage)
    }

    /// Create the state over an explicit storage handle.
    ///
    /// Tests use this with [`Storage::in_memory`] to get isolated
    /// engines per case.
    #[must_use]
    pub fn with_storage(config: StorefrontConfig, storage: Storage) -> Self {
        let cart = Mutex::new(CartStore::open(storage.clone()));
        let favorites = Mutex::new(FavoritesStore::open(storage));
        let catalog = CatalogClient::new(config.catalog_url.clone());
        let checkout = CheckoutService::new(TelegramClient::new(&config.telegram));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                favorites,
                catalog,
                checkout,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// Get a reference to the favorites store.
    #[must_use]
    pub fn favorites(&self) -> &Mutex<FavoritesStore> {
        &self.inner.favorites
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService<TelegramClient> {
        &self.inner.checkout
    }

    /// Submit the current cart as an order.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]; submission failures leave the cart intact.
    pub async fn submit_order(
        &self,
        form: &OrderForm,
        promo: Option<&str>,
    ) -> Result<SubmittedOrder, CheckoutError> {
        self.inner
            .checkout
            .submit(&self.inner.cart, form, promo)
            .await
    }

    /// Resolve the favorites set against the catalog for display.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog cannot be fetched; the
    /// favorites set itself is unaffected.
    pub async fn resolved_favorites(&self) -> Result<Vec<FavoriteView>, CatalogError> {
        let ids: Vec<ItemId> = self
            .inner
            .favorites
            .lock()
            .map(|favorites| favorites.ids().to_vec())
            .unwrap_or_default();
        self.inner.catalog.resolve_favorites(&ids).await
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.inner.catalog)
            .finish_non_exhaustive()
    }
}
