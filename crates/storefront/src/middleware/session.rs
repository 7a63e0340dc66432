//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session carries
//! only the visitor's cart id; cart contents live in the `CartStore`.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "shophub_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session keys.
pub mod keys {
    /// Key for storing the visitor's cart id.
    pub const CART_ID: &str = "cart_id";
}

/// Create the session layer with an in-memory store.
///
/// Sessions (and with them the carts they point at) live for the process
/// lifetime only; carts are session-scoped, not accounts.
#[must_use]
pub fn create_session_layer() -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
