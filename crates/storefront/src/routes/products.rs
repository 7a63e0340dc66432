//! Product detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use shophub_core::{Product, ProductId};

use super::cart::get_cart_id;
use super::format_price;
use crate::catalog::CatalogError;
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub description: String,
    pub rating_rate: String,
    pub rating_count: i64,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            price: format_price(product.price),
            image: product.image.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            rating_rate: format!("{:.1}", product.rating.rate),
            rating_count: product.rating.count,
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub product_id: i64,
    pub in_wishlist: bool,
    pub in_cart_quantity: u32,
}

/// "Product not found" page template, also used when the catalog is
/// unreachable.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub message: String,
}

/// Wishlist button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_button.html")]
pub struct WishlistButtonTemplate {
    pub product_id: i64,
    pub in_wishlist: bool,
}

/// Display the product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Response> {
    let id = ProductId::new(id);

    let product = match state.catalog().get_product(id).await {
        Ok(product) => product,
        Err(CatalogError::NotFound(_)) => {
            return Ok((
                StatusCode::NOT_FOUND,
                ProductNotFoundTemplate {
                    message: "Product not found".to_string(),
                },
            )
                .into_response());
        }
        Err(e) => {
            tracing::warn!("Failed to fetch product {id}: {e}");
            return Ok(ProductNotFoundTemplate {
                message: "This product could not be loaded. Try again shortly.".to_string(),
            }
            .into_response());
        }
    };

    let in_wishlist = state.wishlist().contains(id)?;
    let in_cart_quantity = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().line_quantity(cart_id, id),
        None => 0,
    };

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(&product),
        product_id: id.as_i64(),
        in_wishlist,
        in_cart_quantity,
    }
    .into_response())
}

/// Toggle wishlist membership for a product (HTMX).
///
/// Returns the refreshed wishlist button fragment.
#[instrument(skip(state))]
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    let id = ProductId::new(id);

    // The full snapshot goes into the wishlist, so resolve the product
    // first; an id that does not resolve is a 404, not a toggle.
    let product = state.catalog().get_product(id).await?;
    let in_wishlist = state.wishlist().toggle(&product)?;

    Ok((
        AppendHeaders([("HX-Trigger", "wishlist-updated")]),
        WishlistButtonTemplate {
            product_id: id.as_i64(),
            in_wishlist,
        },
    )
        .into_response())
}
