//! The cart store: ordered line items with merge-on-add semantics.

use oakline_core::{CartLineItem, ItemId, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::StoreError;
use super::persistence::{CART_SLOT, Storage};

/// Persisted shape of the cart.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CartState {
    items: Vec<CartLineItem>,
}

/// Owns the ordered collection of cart line items.
///
/// Insertion order is significant: the cart page renders fabric swatches
/// and furniture as separate sections but keeps each section in the order
/// lines were first added. Every mutation writes the full snapshot
/// through [`Storage`] before returning.
///
/// Granularity is deliberately asymmetric: [`add`](Self::add) is
/// variant-aware (same product in a new size or with a new option becomes
/// its own line), while [`remove`](Self::remove) drops every line with
/// the bare id. A UI that wants to drop one variant line must adjust it
/// via [`update_quantity`](Self::update_quantity) instead.
pub struct CartStore {
    state: CartState,
    storage: Storage,
}

impl CartStore {
    /// Open the cart, restoring the persisted snapshot if one exists.
    #[must_use]
    pub fn open(storage: Storage) -> Self {
        let state = storage.load(CART_SLOT);
        Self { state, storage }
    }

    /// Add a line to the cart, merging with an identity-equal line.
    ///
    /// On merge only the quantity is summed; the first-inserted entry's
    /// name, unit price, image and configuration stay authoritative.
    /// Otherwise the candidate is appended, preserving insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLineItem`] for a malformed candidate
    /// (empty id, zero quantity); state is untouched.
    pub fn add(&mut self, item: CartLineItem) -> Result<(), StoreError> {
        item.validate()?;

        if let Some(existing) = self.state.items.iter_mut().find(|i| i.same_line(&item)) {
            existing.quantity += item.quantity;
            debug!(id = %item.id, quantity = existing.quantity, "merged cart line");
        } else {
            debug!(id = %item.id, "appended cart line");
            self.state.items.push(item);
        }

        self.persist();
        Ok(())
    }

    /// Remove every line with the given bare id, across all variants.
    pub fn remove(&mut self, id: &ItemId) {
        self.state.items.retain(|item| &item.id != id);
        self.persist();
    }

    /// Set the quantity of the first line with the given bare id.
    ///
    /// A quantity below one is a guard no-op, not a removal; dropping a
    /// line is only ever done through [`remove`](Self::remove).
    pub fn update_quantity(&mut self, id: &ItemId, quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self.state.items.iter_mut().find(|i| &i.id == id) {
            item.quantity = quantity;
            self.persist();
        }
    }

    /// Empty the cart. Called after a confirmed checkout.
    pub fn clear(&mut self) {
        self.state.items.clear();
        self.persist();
    }

    /// Sum of all quantities. Derived on demand, never cached.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.state.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of `unit_price * quantity` over all lines, swatches included
    /// (their unit price is zero by definition). Derived, never cached.
    #[must_use]
    pub fn total_price(&self) -> Money {
        self.state.items.iter().map(CartLineItem::line_total).sum()
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.state.items
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    fn persist(&self) {
        self.storage.save(CART_SLOT, &self.state);
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.state.items.len())
            .finish_non_exhaustive()
    }
}
