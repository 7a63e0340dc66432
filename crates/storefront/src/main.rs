//! ShopHub Storefront - Public e-commerce site.
//!
//! This binary serves the public-facing storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for interactivity
//! - Askama templates for server-side rendering
//! - Fake Store API for the product catalog
//! - In-memory session-scoped carts
//! - File-backed wishlist storage

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shophub_storefront::config::ShopHubConfig;
use shophub_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shophub_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ShopHubConfig::from_env().expect("Failed to load configuration");
    tracing::info!("Catalog backend: {}", config.catalog.base_url);

    // Build application state
    let state = AppState::new(config.clone());

    // Log cart activity as it happens
    spawn_cart_activity_logger(&state);

    let app = shophub_storefront::app(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Spawn a background task that logs cart mutations.
///
/// The cart store publishes a summary of every mutation on a watch
/// channel; this is its only in-process consumer (HTMX fragments carry
/// the updates to browsers).
fn spawn_cart_activity_logger(state: &AppState) {
    let mut activity = state.carts().subscribe();

    tokio::spawn(async move {
        while activity.changed().await.is_ok() {
            let summary = activity.borrow_and_update().clone();
            if let Some(cart_id) = summary.cart_id {
                tracing::debug!(
                    %cart_id,
                    total_items = summary.total_items,
                    total_price = %summary.total_price,
                    "cart updated"
                );
            }
        }
    });
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
