//! Integration test harness for ShopHub.
//!
//! Tests run the real storefront in-process against a mock catalog API,
//! both bound to ephemeral ports. Each test gets its own storefront with
//! a fresh session store, cart registry, and wishlist directory, so
//! tests are independent and need no external services.
//!
//! ```bash
//! cargo test -p shophub-integration-tests
//! ```

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use uuid::Uuid;

use shophub_storefront::config::{CatalogConfig, ShopHubConfig};
use shophub_storefront::state::AppState;

/// A running storefront plus a cookie-holding client to drive it.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// The products served by the mock catalog.
#[must_use]
pub fn sample_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Fjallraven Foldsack Backpack",
            "price": "9.99",
            "description": "Fits 15 inch laptops, perfect for everyday use.",
            "category": "men's clothing",
            "image": "https://example.test/backpack.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }),
        json!({
            "id": 2,
            "title": "WD 2TB Portable Drive",
            "price": "64.00",
            "description": "USB 3.0 portable external hard drive.",
            "category": "electronics",
            "image": "https://example.test/drive.jpg",
            "rating": { "rate": 4.4, "count": 203 }
        }),
    ]
}

/// Build the mock catalog API router.
///
/// Mirrors the upstream catalog's surface, including answering an
/// unknown product id with `200 null` rather than a 404.
#[must_use]
pub fn mock_catalog() -> Router {
    Router::new()
        .route("/products", get(|| async { Json(Value::from(sample_products())) }))
        .route(
            "/products/categories",
            get(|| async { Json(json!(["electronics", "men's clothing"])) }),
        )
        .route(
            "/products/category/{name}",
            get(|Path(name): Path<String>| async move {
                let filtered: Vec<Value> = sample_products()
                    .into_iter()
                    .filter(|p| p["category"] == json!(name))
                    .collect();
                Json(Value::from(filtered))
            }),
        )
        .route(
            "/products/{id}",
            get(|Path(id): Path<i64>| async move {
                let product = sample_products()
                    .into_iter()
                    .find(|p| p["id"] == json!(id))
                    .unwrap_or(Value::Null);
                Json(product)
            }),
        )
}

/// Build a catalog router where every request fails with a 500.
#[must_use]
pub fn failing_catalog() -> Router {
    Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() })
}

/// Serve a router on an ephemeral local port, returning its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock server error");
    });

    format!("http://{addr}")
}

/// Start a storefront wired to the given catalog base URL.
pub async fn spawn_app(catalog_url: &str) -> TestApp {
    let config = ShopHubConfig {
        host: "127.0.0.1".parse().expect("Failed to parse host"),
        port: 0,
        catalog: CatalogConfig::new(catalog_url).expect("Failed to build catalog config"),
        data_dir: std::env::temp_dir().join(format!("shophub-test-{}", Uuid::new_v4())),
    };

    let state = AppState::new(config);
    let app = shophub_storefront::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind storefront");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Storefront error");
    });

    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client");

    TestApp {
        base_url: format!("http://{addr}"),
        client,
    }
}

/// Start a storefront backed by the standard mock catalog.
pub async fn spawn_app_with_mock_catalog() -> TestApp {
    let catalog_url = serve(mock_catalog()).await;
    spawn_app(&catalog_url).await
}
