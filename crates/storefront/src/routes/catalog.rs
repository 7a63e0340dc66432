//! Catalog page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use shophub_core::Product;

use super::format_price;
use crate::filters;
use crate::state::AppState;

/// Product card display data for the catalog grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub image: String,
    pub category: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            price: format_price(product.price),
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}

/// Category filter display data.
#[derive(Clone)]
pub struct CategoryView {
    pub name: String,
    /// Percent-encoded name for the filter link.
    pub href: String,
    pub selected: bool,
}

/// Catalog filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct CatalogTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryView>,
    pub selected_category: String,
    pub load_failed: bool,
}

/// Display the catalog page.
///
/// Either fetch can fail independently; a failure renders the page's
/// empty state rather than an error response.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let selected_category = query.category.unwrap_or_default();

    let categories = match state.catalog().list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {e}");
            Vec::new()
        }
    };

    let filter = if selected_category.is_empty() {
        None
    } else {
        Some(selected_category.as_str())
    };

    let (products, load_failed) = match state.catalog().list_products(filter).await {
        Ok(products) => (products.iter().map(ProductCardView::from).collect(), false),
        Err(e) => {
            tracing::warn!("Failed to fetch products: {e}");
            (Vec::new(), true)
        }
    };

    let categories = categories
        .into_iter()
        .map(|name| CategoryView {
            href: urlencoding::encode(&name).into_owned(),
            selected: name == selected_category,
            name,
        })
        .collect();

    CatalogTemplate {
        products,
        categories,
        selected_category,
        load_failed,
    }
}
