//! The shopping-cart state model.
//!
//! A [`Cart`] is an ordered collection of [`CartLine`]s, at most one per
//! product, kept in first-added order. Quantity is always at least one
//! while a line exists: an update that would drop a quantity to zero
//! removes the line instead of storing a zero.
//!
//! Totals are derived aggregates, recomputed from the lines on every read,
//! so they can never drift from the line data.

use rust_decimal::Decimal;

use crate::types::{Product, ProductId};

/// The fields of a product captured into a cart line when it is added.
///
/// A snapshot is taken at add time; later catalog changes do not affect
/// lines already in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSnapshot {
    /// Product ID the line is keyed by.
    pub id: ProductId,
    /// Display title at add time.
    pub title: String,
    /// Unit price at add time.
    pub price: Decimal,
    /// Image URL at add time.
    pub image: String,
}

impl From<&Product> for LineSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// One product's aggregated entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product ID (unique within a cart).
    pub id: ProductId,
    /// Display title snapshot.
    pub title: String,
    /// Unit price snapshot.
    pub price: Decimal,
    /// Image URL snapshot.
    pub image: String,
    /// Units of this product in the cart. Always `>= 1`.
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line (`price * quantity`).
    #[must_use]
    pub fn line_price(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// An in-memory shopping cart.
///
/// Lines are kept in the order their products were first added. All
/// mutations are synchronous and infallible; removing or updating an
/// absent product is a no-op, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of a product.
    ///
    /// If a line for this product already exists its quantity is
    /// incremented in place; otherwise a new line is appended. Adding zero
    /// units is a no-op.
    pub fn add(&mut self, snapshot: LineSnapshot, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == snapshot.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            id: snapshot.id,
            title: snapshot.title,
            price: snapshot.price,
            image: snapshot.image,
            quantity,
        });
    }

    /// Remove the line for a product. No-op if absent.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line entirely; a line is
    /// never stored with quantity zero. No-op if the product is absent.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        let Ok(quantity) = u32::try_from(quantity) else {
            // Negative (or absurdly large) quantities collapse to removal.
            self.remove(id);
            return;
        };

        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of a product in the cart, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Total price across all lines (`sum of price * quantity`).
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_price).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(id: i64, price: &str) -> LineSnapshot {
        LineSnapshot {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            image: format!("https://example.com/{id}.jpg"),
        }
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(snapshot(1, "9.99"), 1);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_add_twice_totals() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "9.99"), 1);
        cart.add(snapshot(1, "9.99"), 1);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), "19.98".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_lines_keep_first_added_order() {
        let mut cart = Cart::new();
        cart.add(snapshot(3, "1.00"), 1);
        cart.add(snapshot(1, "2.00"), 1);
        cart.add(snapshot(2, "3.00"), 1);
        // Re-adding an existing product must not move it.
        cart.add(snapshot(1, "2.00"), 4);

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "5.00"), 2);
        cart.set_quantity(ProductId::new(1), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "5.00"), 2);
        cart.set_quantity(ProductId::new(1), -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "5.00"), 1);
        cart.set_quantity(ProductId::new(99), 3);

        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "5.00"), 1);
        cart.remove(ProductId::new(99));

        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_total_price_tracks_any_mutation_sequence() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "9.99"), 3);
        cart.add(snapshot(2, "0.50"), 1);
        cart.set_quantity(ProductId::new(1), 2);
        cart.add(snapshot(3, "100.00"), 1);
        cart.remove(ProductId::new(3));
        cart.set_quantity(ProductId::new(2), 4);

        let expected: Decimal = cart
            .lines()
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();
        assert_eq!(cart.total_price(), expected);
        assert_eq!(cart.total_price(), "21.98".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "5.00"), 2);
        cart.add(snapshot(2, "1.00"), 1);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, "5.00"), 0);

        assert!(cart.is_empty());
    }
}
