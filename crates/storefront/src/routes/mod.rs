//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Catalog page (optional ?category= filter)
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /product/{id}/details    - Product detail page
//! POST /product/{id}/wishlist   - Toggle wishlist (returns button fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add to cart (returns count, triggers cart-updated)
//! POST /cart/update             - Update quantity (returns cart_items fragment)
//! POST /cart/remove             - Remove item (returns cart_items fragment)
//! POST /cart/clear              - Empty the cart (returns cart_items fragment)
//! GET  /cart/count              - Cart count badge (fragment)
//! GET  /cart/summary            - Footer summary (fragment)
//! ```

pub mod cart;
pub mod catalog;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}/details", get(products::show))
        .route("/{id}/wishlist", post(products::toggle_wishlist))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/summary", get(cart::summary))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog page
        .route("/", get(catalog::index))
        .route("/health", get(health))
        // Product routes
        .nest("/product", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Format a decimal amount as a display price string.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price("9.99".parse().unwrap()), "$9.99");
        assert_eq!(format_price("19.5".parse().unwrap()), "$19.50");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
    }
}
