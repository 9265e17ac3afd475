//! Typed projections of the catalog document.
//!
//! The feed is read-only and fetched as opaque JSON; these types project
//! the fields the storefront consumes and ignore the rest. Unknown fields
//! are silently dropped by serde, so feed additions never break parsing.

use oakline_core::ItemId;
use serde::Deserialize;

/// One element of the top-level feed array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub materials: Vec<MaterialRecord>,
}

/// A furniture product listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<CategoryRecord>,
    #[serde(default)]
    pub subcategory: Option<CategoryRecord>,
    #[serde(default)]
    pub dimensions: Vec<DimensionRecord>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Category or subcategory reference.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    pub code: String,
    pub name: String,
}

/// A size variant with its price and available add-ons.
#[derive(Debug, Clone, Deserialize)]
pub struct DimensionRecord {
    pub width: u32,
    pub length: u32,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub depth: Option<u32>,
    pub price: rust_decimal::Decimal,
    #[serde(default, rename = "additionalOptions")]
    pub additional_options: Vec<AdditionalOptionRecord>,
}

/// An add-on offered for a size variant.
#[derive(Debug, Clone, Deserialize)]
pub struct AdditionalOptionRecord {
    pub name: String,
    #[serde(default)]
    pub available: bool,
    pub price: rust_decimal::Decimal,
}

/// A fabric material with its collections.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRecord {
    pub name: String,
    #[serde(default, rename = "nameLoc")]
    pub name_loc: String,
    #[serde(default)]
    pub collections: Vec<CollectionRecord>,
}

/// A fabric collection within a material.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRecord {
    pub name: String,
    #[serde(default, rename = "nameLoc")]
    pub name_loc: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
    #[serde(default, rename = "technicalSpecifications")]
    pub technical_specifications: TechnicalSpecifications,
}

/// A color variant within a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantRecord {
    pub id: u32,
    pub color: ColorRecord,
    #[serde(default)]
    pub image: String,
}

/// Color swatch metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorRecord {
    #[serde(default)]
    pub code: String,
    pub name: String,
}

/// Collection technical details; only application areas are consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TechnicalSpecifications {
    #[serde(default, rename = "applicationAreas")]
    pub application_areas: Vec<String>,
}

impl ProductRecord {
    /// Whether the record carries the fields the UI cannot render without.
    ///
    /// Mirrors the defensive feed validation: an id, a name, a slug, at
    /// least one image, a category, and at least one priced dimension.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.id.as_str().is_empty()
            && !self.name.is_empty()
            && !self.slug.is_empty()
            && !self.images.is_empty()
            && self.category.is_some()
            && !self.dimensions.is_empty()
    }
}
