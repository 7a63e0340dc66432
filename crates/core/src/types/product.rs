//! Catalog record types.
//!
//! These mirror the JSON shape served by the remote catalog API. Products
//! are owned by the remote catalog and immutable from ShopHub's
//! perspective; the storefront only ever holds snapshots of them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product record from the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price. Deserializes from the API's JSON number.
    pub price: Decimal,
    /// Long-form description.
    pub description: String,
    /// Category name (e.g., "electronics").
    pub category: String,
    /// Product image URL.
    pub image: String,
    /// Aggregate customer rating.
    pub rating: Rating,
}

/// Aggregate rating attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 3.9).
    pub rate: f64,
    /// Number of ratings contributing to the average.
    pub count: i64,
}
