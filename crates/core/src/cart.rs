//! The shopping cart.
//!
//! A cart is an ordered list of line items keyed by `(product, size)`. The
//! same product in two different sizes is two distinct lines; adding the same
//! product/size combination again merges into one line by summing quantities.
//!
//! The cart deliberately stores no prices. Subtotals are computed from live
//! product data by the caller (see [`crate::pricing`]), so a price change in
//! the catalog is reflected immediately for anything still sitting in a cart.
//! Prices are only snapshotted at order time ([`crate::checkout`]).
//!
//! Stock limits are not enforced here either; quantity clamping happens at
//! selection time against the size inventory ([`crate::sizes`]).

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// One `(product, size, quantity)` entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Size label for size-based inventory products; `None` for flat-stock products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLine {
    fn matches(&self, product_id: ProductId, size: Option<&str>) -> bool {
        self.product_id == product_id && self.size.as_deref() == size
    }
}

/// A customer's cart.
///
/// Mutations keep insertion order stable so the cart renders predictably.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines, recomputed on every call.
    ///
    /// Saturates at `u32::MAX`; quantities are client-supplied and must not
    /// be able to wrap.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Add `quantity` units of a product (in an optional size) to the cart.
    ///
    /// If a line with the same `(product, size)` key exists its quantity is
    /// incremented, saturating at `u32::MAX`; otherwise a new line is
    /// appended. Adding zero units is an inert no-op rather than creating an
    /// empty line.
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32, size: Option<String>) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, size.as_deref()))
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity,
                size,
            });
        }
    }

    /// Remove the line matching `(product, size)`.
    ///
    /// Removing a line that does not exist is an inert no-op, not an error.
    pub fn remove_item(&mut self, product_id: ProductId, size: Option<&str>) {
        self.lines.retain(|line| !line.matches(product_id, size));
    }

    /// Set the quantity of the line matching `(product, size)` exactly.
    ///
    /// A quantity below 1 is equivalent to [`Self::remove_item`]. Updating a
    /// line that does not exist is a no-op.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32, size: Option<&str>) {
        if quantity < 1 {
            self.remove_item(product_id, size);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product_id, size))
        {
            line.quantity = quantity;
        }
    }

    /// Empty the cart. Called exactly once, after an order is successfully placed.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn add_merges_by_product_and_size() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 1, Some("M".into()));
        cart.add_item(product(1), 2, Some("M".into()));
        cart.add_item(product(1), 1, Some("L".into()));
        cart.add_item(product(1), 1, None);

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[1].size.as_deref(), Some("L"));
        assert_eq!(cart.lines()[2].size, None);
    }

    #[test]
    fn repeated_adds_sum_quantities() {
        let mut cart = Cart::new();
        for quantity in [1, 4, 2, 3] {
            cart.add_item(product(9), quantity, Some("XL".into()));
        }
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 10);
    }

    #[test]
    fn repeated_adds_saturate_instead_of_wrapping() {
        let mut cart = Cart::new();
        cart.add_item(product(1), u32::MAX, Some("M".into()));
        cart.add_item(product(1), 2, Some("M".into()));
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn item_count_saturates_across_lines() {
        let mut cart = Cart::new();
        cart.add_item(product(1), u32::MAX, None);
        cart.add_item(product(2), 5, Some("M".into()));
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn add_zero_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 0, None);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_is_size_scoped() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 1, Some("M".into()));
        cart.add_item(product(1), 1, Some("L".into()));

        cart.remove_item(product(1), Some("M"));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].size.as_deref(), Some("L"));
    }

    #[test]
    fn remove_missing_line_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 2, None);
        cart.remove_item(product(2), None);
        cart.remove_item(product(1), Some("M"));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn update_quantity_replaces_not_adds() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 5, Some("S".into()));
        cart.update_quantity(product(1), 2, Some("S"));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn update_to_zero_equals_remove() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 3, Some("S".into()));

        let mut removed = cart.clone();
        removed.remove_item(product(1), Some("S"));

        cart.update_quantity(product(1), 0, Some("S"));
        assert_eq!(cart, removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn item_count_sums_all_lines() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 2, Some("M".into()));
        cart.add_item(product(2), 3, None);
        assert_eq!(cart.item_count(), 5);

        cart.update_quantity(product(2), 1, None);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 2, None);
        cart.add_item(product(2), 1, Some("M".into()));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn survives_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(product(1), 2, Some("M".into()));
        cart.add_item(product(2), 1, None);

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
