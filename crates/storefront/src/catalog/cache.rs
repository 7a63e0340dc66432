//! Cache types for catalog API responses.

use shophub_core::Product;

/// Cached value types, keyed by request (`product:{id}`,
/// `products:{category}`, `categories`).
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<String>),
}
