//! Read-only client for the static catalog document.
//!
//! The whole catalog (products and fabric materials) ships as one static
//! JSON document of shape `[ { products: [...], materials: [...] } ]`.
//! The client fetches it on demand and caches the parsed document with a
//! short TTL, so one page load costs at most one download no matter how
//! many widgets consult it. The document is never written back.
//!
//! A failed fetch degrades catalog resolution only: carts and favorites
//! keep operating on their already-denormalized state.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use oakline_core::ItemId;

pub use types::{
    CatalogDocument, CollectionRecord, MaterialRecord, ProductRecord, VariantRecord,
};

/// Single cache key: the document is one unit.
const CACHE_KEY: &str = "catalog";

/// How long a fetched document stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Errors that can occur fetching or decoding the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The document decoded but does not have the expected shape.
    #[error("unexpected catalog shape: {0}")]
    UnexpectedShape(String),
}

/// Client for the static catalog document.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    url: Url,
    cache: Cache<&'static str, Arc<CatalogDocument>>,
}

impl CatalogClient {
    /// Create a client for the document at the given URL.
    #[must_use]
    pub fn new(url: Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                url,
                cache,
            }),
        }
    }

    /// Get the catalog document, fetching it if the cache is cold.
    ///
    /// Product records missing required display fields are dropped at
    /// parse time, the same way the feed has always been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the fetch fails or the document does
    /// not decode to a non-empty array.
    #[instrument(skip(self))]
    pub async fn document(&self) -> Result<Arc<CatalogDocument>, CatalogError> {
        if let Some(document) = self.inner.cache.get(CACHE_KEY).await {
            debug!("catalog cache hit");
            return Ok(document);
        }

        let response = self
            .inner
            .client
            .get(self.inner.url.clone())
            .send()
            .await?
            .error_for_status()?;

        let body: Vec<CatalogDocument> = response
            .json()
            .await
            .map_err(|e| CatalogError::UnexpectedShape(e.to_string()))?;

        let mut document = body
            .into_iter()
            .next()
            .ok_or_else(|| CatalogError::UnexpectedShape("empty top-level array".to_string()))?;

        let before = document.products.len();
        document.products.retain(ProductRecord::is_renderable);
        let dropped = before - document.products.len();
        if dropped > 0 {
            warn!(dropped, "catalog records missing required fields");
        }

        let document = Arc::new(document);
        self.inner
            .cache
            .insert(CACHE_KEY, Arc::clone(&document))
            .await;
        debug!(
            products = document.products.len(),
            materials = document.materials.len(),
            "catalog fetched"
        );
        Ok(document)
    }

    /// Resolve favorited ids against the current catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] only when the document itself cannot be
    /// fetched; unresolvable ids are silently dropped from the view.
    pub async fn resolve_favorites(
        &self,
        ids: &[ItemId],
    ) -> Result<Vec<FavoriteView>, CatalogError> {
        let document = self.document().await?;
        Ok(resolve_favorites(&document, ids))
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("url", &self.inner.url.as_str())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Favorites resolution
// =============================================================================

/// A favorite resolved against the catalog for display.
#[derive(Debug, Clone)]
pub enum FavoriteView {
    /// A favorited furniture product.
    Product(ProductRecord),
    /// A favorited fabric color variant.
    Fabric(FabricFavorite),
}

/// Display data for a favorited fabric variant.
#[derive(Debug, Clone)]
pub struct FabricFavorite {
    pub id: ItemId,
    pub material: String,
    pub material_name: String,
    pub collection: String,
    pub collection_name: String,
    pub kind: String,
    pub applications: Vec<String>,
    pub variant: VariantRecord,
}

/// Resolve favorites lazily, at render time.
///
/// Membership is resolved against the catalog on every call: a favorite
/// referencing an id the catalog no longer knows is dropped from the
/// returned view but stays in the favorites set until explicitly removed.
#[must_use]
pub fn resolve_favorites(document: &CatalogDocument, ids: &[ItemId]) -> Vec<FavoriteView> {
    let mut views = Vec::new();

    for id in ids {
        if let Some(product) = document.products.iter().find(|p| &p.id == id) {
            views.push(FavoriteView::Product(product.clone()));
        } else if let Some(fabric) = resolve_fabric(document, id) {
            views.push(FavoriteView::Fabric(fabric));
        } else {
            debug!(%id, "favorite no longer resolves, dropped from view");
        }
    }

    views
}

fn resolve_fabric(document: &CatalogDocument, id: &ItemId) -> Option<FabricFavorite> {
    let parts = id.composite_parts()?;
    let material = document
        .materials
        .iter()
        .find(|m| m.name == parts.material)?;
    let collection = material
        .collections
        .iter()
        .find(|c| c.name == parts.collection)?;
    let variant = collection
        .variants
        .iter()
        .find(|v| v.id == parts.variant_id)?;

    Some(FabricFavorite {
        id: id.clone(),
        material: material.name.clone(),
        material_name: material.name_loc.clone(),
        collection: collection.name.clone(),
        collection_name: collection.name_loc.clone(),
        kind: collection.kind.clone(),
        applications: collection.technical_specifications.application_areas.clone(),
        variant: variant.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> CatalogDocument {
        let json = r##"
        [{
            "products": [
                {
                    "id": "sofa1",
                    "name": "Sofa Verona",
                    "slug": "sofa-verona",
                    "images": ["products/sofa1.jpg"],
                    "category": { "code": "sofas", "name": "Sofas" },
                    "dimensions": [
                        {
                            "width": 160,
                            "length": 200,
                            "height": 90,
                            "depth": null,
                            "price": 500,
                            "additionalOptions": [
                                { "name": "lift mechanism", "available": true, "price": 50 }
                            ]
                        }
                    ],
                    "color": "grey",
                    "popularity": 10
                },
                { "id": "broken", "name": "", "slug": "", "images": [], "dimensions": [] }
            ],
            "materials": [
                {
                    "name": "Velours",
                    "nameLoc": "Велюр",
                    "collections": [
                        {
                            "name": "Verona",
                            "nameLoc": "Верона",
                            "type": "velour",
                            "technicalSpecifications": { "applicationAreas": ["sofas", "beds"] },
                            "variants": [
                                { "id": 3, "color": { "code": "#777", "name": "Grey" }, "image": "fabrics/verona-3.jpg" }
                            ]
                        }
                    ]
                }
            ]
        }]
        "##;
        let mut docs: Vec<CatalogDocument> = serde_json::from_str(json).expect("parses");
        docs.remove(0)
    }

    #[test]
    fn test_document_projection_parses() {
        let document = sample_document();
        assert_eq!(document.products.len(), 2);
        assert_eq!(document.materials.len(), 1);

        let product = document.products.first().expect("product");
        assert!(product.is_renderable());
        assert_eq!(
            product
                .dimensions
                .first()
                .expect("dimension")
                .additional_options
                .first()
                .expect("option")
                .name,
            "lift mechanism"
        );

        let broken = document.products.get(1).expect("broken record");
        assert!(!broken.is_renderable());
    }

    #[test]
    fn test_resolve_product_and_fabric_favorites() {
        let document = sample_document();
        let ids = vec![
            ItemId::new("sofa1"),
            ItemId::fabric_variant("Velours", "Verona", 3),
        ];

        let views = resolve_favorites(&document, &ids);
        assert_eq!(views.len(), 2);
        assert!(matches!(views.first(), Some(FavoriteView::Product(p)) if p.id.as_str() == "sofa1"));
        match views.get(1) {
            Some(FavoriteView::Fabric(fabric)) => {
                assert_eq!(fabric.material_name, "Велюр");
                assert_eq!(fabric.variant.color.name, "Grey");
                assert_eq!(fabric.applications, vec!["sofas", "beds"]);
            }
            other => panic!("expected fabric favorite, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolvable_favorites_silently_dropped() {
        let document = sample_document();
        let ids = vec![
            ItemId::new("gone-product"),
            ItemId::fabric_variant("Velours", "Verona", 99),
            ItemId::fabric_variant("Linen", "Milan", 1),
            ItemId::new("sofa1"),
        ];

        let views = resolve_favorites(&document, &ids);
        assert_eq!(views.len(), 1);
        assert!(matches!(views.first(), Some(FavoriteView::Product(_))));
    }
}
