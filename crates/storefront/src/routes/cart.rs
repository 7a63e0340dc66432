//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page
//! reloads. The session stores a cart id mapped to the in-memory
//! `CartStore`; mutating routes answer with an `HX-Trigger: cart-updated`
//! header so the header badge and footer summary refresh themselves.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use shophub_core::{Cart, LineSnapshot, ProductId};

use super::format_price;
use crate::carts::CartId;
use crate::error::Result;
use crate::filters;
use crate::middleware::session::keys;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub line_price: String,
    pub quantity: u32,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(rust_decimal::Decimal::ZERO),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    id: line.id.as_i64(),
                    title: line.title.clone(),
                    price: format_price(line.price),
                    line_price: format_price(line.line_price()),
                    quantity: line.quantity,
                    image: line.image.clone(),
                })
                .collect(),
            subtotal: format_price(cart.total_price()),
            item_count: cart.total_items(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart id from the session.
pub(crate) async fn get_cart_id(session: &Session) -> Option<CartId> {
    session.get::<CartId>(keys::CART_ID).await.ok().flatten()
}

/// Get the cart id from the session, creating one if absent.
async fn get_or_create_cart_id(session: &Session) -> CartId {
    if let Some(cart_id) = get_cart_id(session).await {
        return cart_id;
    }

    let cart_id = CartId::new_v4();
    if let Err(e) = session.insert(keys::CART_ID, cart_id).await {
        tracing::error!("Failed to save cart id to session: {e}");
    }
    cart_id
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Footer summary fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_summary.html")]
pub struct CartSummaryTemplate {
    pub count: u64,
    pub total: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => CartView::from(&state.carts().snapshot(cart_id)),
        None => CartView::empty(),
    };

    CartShowTemplate { cart }
}

/// Add units of a product to the cart (HTMX).
///
/// Resolves the product from the catalog so the cart line holds a
/// snapshot of it. Creates the session cart on first use. Returns the
/// cart count with an HTMX trigger to refresh dependent fragments.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product_id = ProductId::new(form.product_id);
    let quantity = form.quantity.unwrap_or(1).max(1);

    let product = state.catalog().get_product(product_id).await?;

    let cart_id = get_or_create_cart_id(&session).await;
    state
        .carts()
        .add_item(cart_id, LineSnapshot::from(&product), quantity);

    let count = state.carts().snapshot(cart_id).total_items();
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Update a cart line's quantity (HTMX). A quantity of zero or less
/// removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    state
        .carts()
        .set_quantity(cart_id, ProductId::new(form.product_id), form.quantity);

    items_fragment(&state, cart_id)
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    state
        .carts()
        .remove_item(cart_id, ProductId::new(form.product_id));

    items_fragment(&state, cart_id)
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Response {
    let Some(cart_id) = get_cart_id(&session).await else {
        return CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response();
    };

    state.carts().clear(cart_id);

    items_fragment(&state, cart_id)
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let count = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().snapshot(cart_id).total_items(),
        None => 0,
    };

    CartCountTemplate { count }
}

/// Get the footer summary fragment (HTMX).
#[instrument(skip(state, session))]
pub async fn summary(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = match get_cart_id(&session).await {
        Some(cart_id) => state.carts().snapshot(cart_id),
        None => Cart::new(),
    };

    CartSummaryTemplate {
        count: cart.total_items(),
        total: format_price(cart.total_price()),
    }
}

/// Render the refreshed cart items fragment with the update trigger.
fn items_fragment(state: &AppState, cart_id: CartId) -> Response {
    let cart = CartView::from(&state.carts().snapshot(cart_id));
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}
