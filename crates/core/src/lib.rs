//! Oakline Core - Shared types library.
//!
//! This crate provides common types used across all Oakline components:
//! - `storefront` - Cart/favorites engine, pricing, catalog and checkout
//! - `integration-tests` - Cross-module behavior tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage,
//! no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere, including inside the persistence and checkout layers without
//! dependency cycles.
//!
//! # Modules
//!
//! - [`types`] - Item ids, money, and the cart line-item model with its
//!   identity/merge rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
