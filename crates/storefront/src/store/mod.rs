//! Cart and favorites stores with write-through persistence.
//!
//! Both stores follow the same discipline: explicit instances (no ambient
//! globals), synchronous mutations, and a full-snapshot write to their
//! persistence slot before every mutating call returns. Mutations on one
//! store are linearizable relative to each other; there is no cross-store
//! transaction.

pub mod cart;
pub mod favorites;
pub mod persistence;

use thiserror::Error;

pub use cart::CartStore;
pub use favorites::FavoritesStore;
pub use persistence::{JsonFileStorage, MemoryStorage, Storage, StorageBackend};

/// Errors surfaced by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A malformed add-to-cart request, rejected before mutating state.
    #[error("invalid line item: {0}")]
    InvalidLineItem(#[from] oakline_core::LineItemError),
}
