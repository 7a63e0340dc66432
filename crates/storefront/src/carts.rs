//! Server-side registry of session carts.
//!
//! The browser session holds only a [`CartId`]; the cart contents live
//! here, in process memory, for the lifetime of the process. There is a
//! single mutation path: every write goes through [`CartStore`], which
//! applies the change under the lock, recomputes the derived aggregates,
//! and broadcasts a [`CartActivity`] snapshot to subscribers before
//! returning. Readers always observe a consistent cart.
//!
//! Carts are not persisted across restarts; they are session-scoped
//! working state, not orders.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use rust_decimal::Decimal;
use tokio::sync::watch;

use shophub_core::{Cart, LineSnapshot, ProductId};

/// Identifier of one session's cart.
pub type CartId = uuid::Uuid;

/// Snapshot of a cart's aggregates, broadcast after every mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartActivity {
    /// The cart that changed. `None` only for the initial channel value.
    pub cart_id: Option<CartId>,
    /// Total units across all lines after the mutation.
    pub total_items: u64,
    /// Total price across all lines after the mutation.
    pub total_price: Decimal,
}

/// Registry of all live carts, keyed by [`CartId`].
///
/// Cheap to share: handlers hold it through `AppState` and call the
/// synchronous mutation methods directly.
pub struct CartStore {
    carts: RwLock<HashMap<CartId, Cart>>,
    activity: watch::Sender<CartActivity>,
}

impl CartStore {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        let (activity, _) = watch::channel(CartActivity::default());
        Self {
            carts: RwLock::new(HashMap::new()),
            activity,
        }
    }

    /// Subscribe to cart mutations.
    ///
    /// The receiver yields the latest [`CartActivity`] after each
    /// mutation; intermediate values may be skipped under load, the most
    /// recent state is always observed.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartActivity> {
        self.activity.subscribe()
    }

    /// Add `quantity` units of a product to a cart, creating the cart if
    /// it does not exist yet.
    pub fn add_item(&self, cart_id: CartId, snapshot: LineSnapshot, quantity: u32) {
        self.mutate(cart_id, |cart| cart.add(snapshot, quantity));
    }

    /// Set the quantity of a line; zero or less removes the line.
    pub fn set_quantity(&self, cart_id: CartId, product: ProductId, quantity: i64) {
        self.mutate(cart_id, |cart| cart.set_quantity(product, quantity));
    }

    /// Remove a line. No-op if the product is not in the cart.
    pub fn remove_item(&self, cart_id: CartId, product: ProductId) {
        self.mutate(cart_id, |cart| cart.remove(product));
    }

    /// Empty a cart.
    pub fn clear(&self, cart_id: CartId) {
        self.mutate(cart_id, Cart::clear);
    }

    /// A point-in-time copy of a cart. Unknown ids read as empty carts.
    #[must_use]
    pub fn snapshot(&self, cart_id: CartId) -> Cart {
        let carts = self
            .carts
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        carts.get(&cart_id).cloned().unwrap_or_default()
    }

    /// Quantity of one product in a cart, zero if absent.
    #[must_use]
    pub fn line_quantity(&self, cart_id: CartId, product: ProductId) -> u32 {
        let carts = self
            .carts
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        carts
            .get(&cart_id)
            .map_or(0, |cart| cart.quantity_of(product))
    }

    /// Apply a mutation under the write lock, then broadcast the new
    /// aggregates. Aggregates are recomputed before the lock is released,
    /// so subscribers never see a torn state.
    fn mutate(&self, cart_id: CartId, apply: impl FnOnce(&mut Cart)) {
        let activity = {
            let mut carts = self
                .carts
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let cart = carts.entry(cart_id).or_default();
            apply(cart);
            CartActivity {
                cart_id: Some(cart_id),
                total_items: cart.total_items(),
                total_price: cart.total_price(),
            }
        };

        // send_replace never fails, even with no subscribers.
        self.activity.send_replace(activity);
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
