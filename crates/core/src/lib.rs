//! ShopHub Core - Shared domain types.
//!
//! This crate provides the common types used across ShopHub components:
//! - `storefront` - Public-facing e-commerce site
//! - `integration-tests` - End-to-end test suite
//!
//! # Architecture
//!
//! The core crate contains only types and pure state logic - no I/O, no
//! HTTP clients, no storage. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and catalog record types
//! - [`cart`] - The shopping-cart state model and its derived aggregates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine, LineSnapshot};
pub use types::*;
