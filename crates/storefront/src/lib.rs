//! ShopHub Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod wishlist;

use axum::Router;

use crate::state::AppState;

/// Build the full storefront application.
///
/// Assembles the route tree, the session layer, and the shared state.
/// `main` adds process-level layers (request tracing) on top of this;
/// integration tests drive the returned router directly.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer();

    routes::routes().layer(session_layer).with_state(state)
}
