//! Remote catalog API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest` - the remote catalog is the source of
//!   truth, NO local sync, direct API calls
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//! - No retries, no backoff: a failed request surfaces as a
//!   [`CatalogError`] and the page renders its empty state
//!
//! # Example
//!
//! ```rust,ignore
//! use shophub_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! // List everything, or one category
//! let products = client.list_products(None).await?;
//! let electronics = client.list_products(Some("electronics")).await?;
//!
//! // Single product
//! let product = client.get_product(ProductId::new(1)).await?;
//! ```

mod cache;
mod client;

pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when talking to the remote catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed (connection, DNS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the JSON shape we expect.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = CatalogError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "catalog returned HTTP 500 Internal Server Error");
    }
}
