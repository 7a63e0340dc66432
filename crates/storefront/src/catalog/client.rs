//! Catalog API client implementation.
//!
//! Wraps `reqwest` for HTTP and caches read responses with `moka`
//! (5-minute TTL). Each operation is a single request/response: no retry
//! or backoff policy, matching the storefront's "show the empty state and
//! let the user re-navigate" failure handling.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use shophub_core::{Product, ProductId};

use super::CatalogError;
use super::cache::CacheValue;
use crate::config::CatalogConfig;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote catalog REST API.
///
/// Provides typed access to products and categories. Responses are cached
/// for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog API client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// Issue a GET request and return the body as text.
    ///
    /// Reads the body before checking the status so failures can be
    /// logged with response context.
    async fn fetch_text(&self, path: &str) -> Result<String, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(200).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        Ok(text)
    }

    /// Issue a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let text = self.fetch_text(path).await?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(200).collect::<String>(),
                    "failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// List products, optionally filtered to a single category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let cache_key = format!("products:{}", category.unwrap_or(""));

        // Check cache
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let path = match category {
            Some(category) => format!("products/category/{}", urlencoding::encode(category)),
            None => "products".to_string(),
        };

        let products: Vec<Product> = self.get_json(&path).await?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a single product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not resolve, or
    /// another `CatalogError` if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = format!("product:{id}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let text = self.fetch_text(&format!("products/{id}")).await?;

        // The catalog answers unknown ids with 200 and an empty or null
        // body rather than 404; normalize both to NotFound.
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(CatalogError::NotFound(format!("product {id}")));
        }

        let product: Product = serde_json::from_str(trimmed)?;

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// List all category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let cache_key = "categories".to_string();

        // Check cache
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<String> = self.get_json("products/categories").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    fn sample_product(id: i64, price: &str, category: &str) -> Value {
        json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": price.parse::<f64>().unwrap(),
            "description": "A fine product",
            "category": category,
            "image": format!("https://example.com/{id}.jpg"),
            "rating": { "rate": 4.2, "count": 37 }
        })
    }

    fn sample_products() -> Vec<Value> {
        vec![
            sample_product(1, "9.99", "electronics"),
            sample_product(2, "19.50", "men's clothing"),
            sample_product(3, "5.00", "electronics"),
        ]
    }

    fn mock_router() -> Router {
        Router::new()
            .route("/products", get(|| async { Json(sample_products()) }))
            .route(
                "/products/categories",
                get(|| async { Json(json!(["electronics", "men's clothing"])) }),
            )
            .route(
                "/products/category/{name}",
                get(|Path(name): Path<String>| async move {
                    let filtered: Vec<Value> = sample_products()
                        .into_iter()
                        .filter(|p| p["category"] == name.as_str())
                        .collect();
                    Json(filtered)
                }),
            )
            .route(
                "/products/{id}",
                get(|Path(id): Path<i64>| async move {
                    sample_products()
                        .into_iter()
                        .find(|p| p["id"] == id)
                        .map_or_else(
                            || StatusCode::NOT_FOUND.into_response(),
                            |p| Json(p).into_response(),
                        )
                }),
            )
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn client_for(router: Router) -> CatalogClient {
        let base = serve(router).await;
        CatalogClient::new(&CatalogConfig::new(&base).unwrap())
    }

    #[tokio::test]
    async fn test_list_products_returns_all() {
        let client = client_for(mock_router()).await;

        let products = client.list_products(None).await.unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].price, "9.99".parse().unwrap());
    }

    #[tokio::test]
    async fn test_list_products_encodes_category_filter() {
        let client = client_for(mock_router()).await;

        let products = client.list_products(Some("men's clothing")).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::new(2));
    }

    #[tokio::test]
    async fn test_list_categories() {
        let client = client_for(mock_router()).await;

        let categories = client.list_categories().await.unwrap();
        assert_eq!(categories, vec!["electronics", "men's clothing"]);
    }

    #[tokio::test]
    async fn test_get_product_found_and_missing() {
        let client = client_for(mock_router()).await;

        let product = client.get_product(ProductId::new(2)).await.unwrap();
        assert_eq!(product.category, "men's clothing");

        let missing = client.get_product(ProductId::new(999)).await;
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_null_body_is_not_found() {
        let router = Router::new().route("/products/{id}", get(|| async { "null" }));
        let client = client_for(router).await;

        let result = client.get_product(ProductId::new(1)).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let router = Router::new().route(
            "/products",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = client_for(router).await;

        let result = client.list_products(None).await;
        match result {
            Err(CatalogError::Status(status)) => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let router = Router::new().route(
            "/products/categories",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!(["electronics"]))
                }
            }),
        );
        let client = client_for(router).await;

        client.list_categories().await.unwrap();
        client.list_categories().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        client.invalidate_all().await;
        client.list_categories().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
