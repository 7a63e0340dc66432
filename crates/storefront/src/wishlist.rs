//! Wishlist persistence.
//!
//! The wishlist is a set of full product snapshots, unique by product id,
//! persisted as one JSON blob under a fixed key in a key-value store. The
//! store itself is an injected capability ([`KvStore`]) so the file-backed
//! implementation can be swapped for an in-memory one in tests.
//!
//! Reading an absent or unparseable blob yields the empty set on every
//! path, including toggle: a corrupt slot is logged and overwritten on the
//! next write, never surfaced to the user.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use shophub_core::{Product, ProductId};

/// Fixed key the wishlist blob is stored under.
const WISHLIST_KEY: &str = "wishlist";

/// Errors that can occur when reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying store I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded for storage.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A key-value store of opaque JSON blobs.
///
/// Writes are durable by the time `set` returns.
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, `None` if the slot has never been
    /// written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed [`KvStore`]: one JSON file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory [`KvStore`] for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot directly, bypassing the wishlist encoding. Lets tests
    /// set up absent-vs-corrupt scenarios.
    pub fn seed(&self, key: &str, value: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// WishlistStore
// =============================================================================

/// The persisted wishlist over an injected key-value store.
pub struct WishlistStore {
    store: Box<dyn KvStore>,
}

impl WishlistStore {
    /// Create a wishlist over the given store.
    pub fn new(store: impl KvStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// All wishlisted product snapshots, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for I/O failures; an absent or corrupt
    /// slot reads as the empty set.
    pub fn all(&self) -> Result<Vec<Product>, StorageError> {
        let Some(raw) = self.store.get(WISHLIST_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(products) => Ok(products),
            Err(e) => {
                tracing::warn!(error = %e, "wishlist slot is corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Whether a product is in the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub fn contains(&self, id: ProductId) -> Result<bool, StorageError> {
        Ok(self.all()?.iter().any(|p| p.id == id))
    }

    /// Toggle a product's membership and persist the result.
    ///
    /// Returns the new membership: `true` if the product was added,
    /// `false` if it was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or written.
    pub fn toggle(&self, product: &Product) -> Result<bool, StorageError> {
        let mut products = self.all()?;

        let added = if products.iter().any(|p| p.id == product.id) {
            products.retain(|p| p.id != product.id);
            false
        } else {
            products.push(product.clone());
            true
        };

        self.store
            .set(WISHLIST_KEY, &serde_json::to_string(&products)?)?;
        Ok(added)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shophub_core::Rating;

    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: "9.99".parse().unwrap(),
            description: "desc".to_string(),
            category: "electronics".to_string(),
            image: format!("https://example.com/{id}.jpg"),
            rating: Rating {
                rate: 4.0,
                count: 10,
            },
        }
    }

    #[test]
    fn test_absent_slot_reads_empty() {
        let wishlist = WishlistStore::new(MemoryStore::new());
        assert!(wishlist.all().unwrap().is_empty());
        assert!(!wishlist.contains(ProductId::new(1)).unwrap());
    }

    #[test]
    fn test_toggle_on_absent_slot_adds() {
        // The empty-set fallback applies on the toggle path too, not just
        // the initial membership lookup.
        let wishlist = WishlistStore::new(MemoryStore::new());
        assert!(wishlist.toggle(&product(1)).unwrap());
        assert!(wishlist.contains(ProductId::new(1)).unwrap());
    }

    #[test]
    fn test_toggle_twice_restores_persisted_state() {
        let store = MemoryStore::new();
        store.seed(WISHLIST_KEY, "[]");
        let wishlist = WishlistStore::new(store);

        wishlist.toggle(&product(2)).unwrap();
        let mid = wishlist.all().unwrap();
        assert_eq!(mid.len(), 1);

        wishlist.toggle(&product(2)).unwrap();
        assert!(wishlist.all().unwrap().is_empty());
        assert!(!wishlist.contains(ProductId::new(2)).unwrap());
    }

    #[test]
    fn test_corrupt_slot_reads_empty_and_recovers_on_write() {
        let store = MemoryStore::new();
        store.seed(WISHLIST_KEY, "{not json");
        let wishlist = WishlistStore::new(store);

        assert!(wishlist.all().unwrap().is_empty());
        assert!(wishlist.toggle(&product(3)).unwrap());

        let after = wishlist.all().unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, ProductId::new(3));
    }

    #[test]
    fn test_membership_is_unique_by_id() {
        let wishlist = WishlistStore::new(MemoryStore::new());
        let mut variant = product(4);
        wishlist.toggle(&product(4)).unwrap();

        // Toggling a snapshot with the same id removes, even if other
        // fields differ.
        variant.title = "Renamed".to_string();
        assert!(!wishlist.toggle(&variant).unwrap());
        assert!(wishlist.all().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let root = std::env::temp_dir().join(format!("shophub-wishlist-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(&root);

        assert!(store.get("wishlist").unwrap().is_none());
        store.set("wishlist", "[1,2,3]").unwrap();
        assert_eq!(store.get("wishlist").unwrap().unwrap(), "[1,2,3]");

        let _ = std::fs::remove_dir_all(&root);
    }
}
