//! The cart line-item model and its identity rules.
//!
//! A line's identity is the `(id, dimension, additional option name)`
//! tuple. Two adds with the same identity merge into one line with summed
//! quantity; the first add's denormalized fields (name, unit price, image,
//! configuration) stay authoritative. Configuration metadata never
//! participates in identity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ItemId;
use super::money::Money;

/// A selected size variant, in centimeters.
///
/// Part of line identity: the same product in two sizes is two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: u32,
    pub length: u32,
}

/// A selected add-on (e.g. a lift-up mechanism).
///
/// Only the `name` participates in identity; the `price` was already
/// folded into the line's unit price at add-time and is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalOption {
    pub name: String,
    pub price: Money,
}

/// Free-form descriptive metadata snapshotted at add-time.
///
/// Informational only: excluded from identity and merge comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

/// One entry in the cart: a product/variant plus quantity.
///
/// Display fields are denormalized at add-time and never re-fetched from
/// the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_option: Option<AdditionalOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
}

/// The identity tuple deciding merge-vs-new-entry.
///
/// Absence on both sides counts as equal ("no selection" matches "no
/// selection"); presence on one side only does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    id: ItemId,
    dimension: Option<Dimension>,
    option_name: Option<String>,
}

/// Rejection reasons for a malformed add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineItemError {
    /// The line has no id.
    #[error("line item has an empty id")]
    MissingId,

    /// The requested quantity is below one.
    #[error("line item quantity must be at least 1")]
    NonPositiveQuantity,
}

impl CartLineItem {
    /// Compute the line's identity key.
    #[must_use]
    pub fn line_key(&self) -> LineKey {
        LineKey {
            id: self.id.clone(),
            dimension: self.dimension,
            option_name: self.additional_option.as_ref().map(|o| o.name.clone()),
        }
    }

    /// Whether this line would merge with `other` rather than coexist.
    #[must_use]
    pub fn same_line(&self, other: &Self) -> bool {
        self.id == other.id
            && self.dimension == other.dimension
            && self.additional_option.as_ref().map(|o| o.name.as_str())
                == other.additional_option.as_ref().map(|o| o.name.as_str())
    }

    /// Whether this is a zero-price fabric swatch line.
    ///
    /// Swatches share storage and identity rules with furniture lines but
    /// are grouped separately for display and excluded from monetary
    /// aggregation.
    #[must_use]
    pub fn is_fabric_sample(&self) -> bool {
        self.unit_price.is_zero() && self.id.is_composite()
    }

    /// The line's contribution to the cart total.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }

    /// Check the line is well-formed before it may enter a cart.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError`] for an empty id or a zero quantity.
    pub fn validate(&self) -> Result<(), LineItemError> {
        if self.id.as_str().is_empty() {
            return Err(LineItemError::MissingId);
        }
        if self.quantity < 1 {
            return Err(LineItemError::NonPositiveQuantity);
        }
        Ok(())
    }
}
