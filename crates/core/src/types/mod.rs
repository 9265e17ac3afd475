//! Core types for Oakline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line;
pub mod money;

pub use id::{CompositeParts, ItemId};
pub use line::{
    AdditionalOption, CartLineItem, Configuration, Dimension, LineItemError, LineKey,
};
pub use money::Money;
