//! Item identifiers for cart and favorites entries.
//!
//! Furniture items carry their plain catalog id. Fabric swatches use a
//! composite id of the form `material-collection-variantId`, minted at
//! add-time so every color variant gets its own identity.

use serde::{Deserialize, Serialize};

/// Separator between the segments of a composite fabric-variant id.
const COMPOSITE_SEPARATOR: char = '-';

/// Identifier of a product or fabric-variant.
///
/// A thin newtype over the feed-supplied string id so cart, favorites and
/// catalog code cannot accidentally mix ids with other strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// The parsed segments of a composite fabric-variant id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeParts<'a> {
    /// Material name (e.g. "Velours").
    pub material: &'a str,
    /// Collection name within the material (e.g. "Verona").
    pub collection: &'a str,
    /// Numeric variant id within the collection.
    pub variant_id: u32,
}

impl ItemId {
    /// Create an id from a feed-supplied string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint the composite id for a fabric variant.
    #[must_use]
    pub fn fabric_variant(material: &str, collection: &str, variant_id: u32) -> Self {
        Self(format!(
            "{material}{COMPOSITE_SEPARATOR}{collection}{COMPOSITE_SEPARATOR}{variant_id}"
        ))
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id contains the composite separator.
    ///
    /// This is the loose check used for display grouping; fabric-sample
    /// classification additionally requires a zero unit price (see
    /// [`crate::CartLineItem::is_fabric_sample`]), so a furniture id that
    /// happens to contain a dash is not misclassified.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.0.contains(COMPOSITE_SEPARATOR)
    }

    /// Parse the id as a strict `material-collection-variantId` triple.
    ///
    /// Returns `None` unless the id has exactly three segments with a
    /// numeric final segment. Catalog resolution uses this strict form;
    /// ids that fail to parse simply never resolve to a fabric variant.
    #[must_use]
    pub fn composite_parts(&self) -> Option<CompositeParts<'_>> {
        let mut segments = self.0.split(COMPOSITE_SEPARATOR);
        let material = segments.next()?;
        let collection = segments.next()?;
        let variant_id = segments.next()?.parse().ok()?;
        if segments.next().is_some() || material.is_empty() || collection.is_empty() {
            return None;
        }
        Some(CompositeParts {
            material,
            collection,
            variant_id,
        })
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
