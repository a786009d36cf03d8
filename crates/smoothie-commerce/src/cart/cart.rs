//! Cart and cart line types.

use crate::cart::OrderTotals;
use crate::catalog::CatalogItem;
use crate::config::ShippingPolicy;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The shopping cart.
///
/// Lines keep insertion order and are keyed by item id: adding an item that
/// is already present bumps its quantity instead of adding a second line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    /// Lines in insertion order.
    lines: Vec<CartLine>,
    /// Whether the cart panel is open. Presentation state only.
    is_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a catalog item.
    ///
    /// Existing lines get their quantity incremented; new items are appended
    /// with quantity 1. The line snapshots the item's name, price and color.
    pub fn add_item(&mut self, item: &CatalogItem) -> &CartLine {
        let index = match self.lines.iter().position(|l| l.id == item.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                index
            }
            None => {
                self.lines.push(CartLine::from_item(item));
                self.lines.len() - 1
            }
        };

        let line = &self.lines[index];
        tracing::debug!(item_id = %line.id, quantity = line.quantity, "cart item added");
        line
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns `false` if no
    /// line has that id.
    pub fn update_quantity(&mut self, id: &ItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        match self.lines.iter_mut().find(|l| &l.id == id) {
            Some(line) => {
                line.quantity = quantity;
                tracing::debug!(item_id = %id, quantity, "cart quantity updated");
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns `false` if no line has that id.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        let removed = self.lines.len() < len_before;
        if removed {
            tracing::debug!(item_id = %id, "cart item removed");
        }
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        tracing::debug!("cart cleared");
    }

    /// Σ(price × quantity) over the current lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Subtotal, shipping and grand total under a shipping policy.
    pub fn totals(&self, shipping: &ShippingPolicy) -> OrderTotals {
        OrderTotals::compute(self.subtotal(), shipping)
    }

    /// Total units across all lines (the navigation badge count).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get a line by item id.
    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Whether the cart panel is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the cart panel.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the cart panel.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Toggle the cart panel.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}

/// One aggregated entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Item id; unique within the cart.
    pub id: ItemId,
    /// Item name at add time.
    pub name: String,
    /// Emoji icon at add time.
    pub emoji: String,
    /// Accent color at add time.
    pub color: String,
    /// Unit price at add time.
    pub unit_price: Money,
    /// Quantity, always at least 1.
    pub quantity: i64,
}

impl CartLine {
    /// Snapshot a catalog item into a new line with quantity 1.
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            emoji: item.emoji.clone(),
            color: item.color.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }

    /// unit_price × quantity.
    pub fn total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64) -> CatalogItem {
        CatalogItem::new(id, id.to_uppercase(), "🥤", Money::new(price), "#000000")
    }

    fn expected_subtotal(cart: &Cart) -> Money {
        Money::new(
            cart.lines()
                .iter()
                .map(|l| l.unit_price.amount * l.quantity)
                .sum(),
        )
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(!cart.is_open());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let line = cart.add_item(&item("a", 1000));
        assert_eq!(line.quantity, 1);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        let a = item("a", 1000);
        let b = item("b", 250);

        let sequence = [&a, &b, &a, &a, &b, &a];
        for i in sequence {
            cart.add_item(i);
        }

        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.line(&a.id).unwrap().quantity, 4);
        assert_eq!(cart.line(&b.id).unwrap().quantity, 2);
        // insertion order is preserved
        assert_eq!(cart.lines()[0].id, a.id);
        assert_eq!(cart.lines()[1].id, b.id);
    }

    #[test]
    fn test_line_is_a_snapshot() {
        let mut cart = Cart::new();
        let mut a = item("a", 1000);
        cart.add_item(&a);

        a.price = Money::new(5000);
        cart.add_item(&a);

        let line = cart.line(&a.id).unwrap();
        assert_eq!(line.unit_price, Money::new(1000));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let a = item("a", 1000);
        cart.add_item(&a);

        assert!(cart.update_quantity(&a.id, 5));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal(), Money::new(5000));
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        let a = item("a", 1000);
        cart.add_item(&a);

        assert!(cart.update_quantity(&a.id, 0));
        assert!(cart.is_empty());

        cart.add_item(&a);
        assert!(cart.update_quantity(&a.id, -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&item("a", 1000));

        assert!(!cart.update_quantity(&ItemId::new("zzz"), 4));
        assert!(!cart.remove_item(&ItemId::new("zzz")));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        let a = item("a", 1000);
        cart.add_item(&a);

        assert!(cart.remove_item(&a.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_tracks_every_mutation() {
        let mut cart = Cart::new();
        let a = item("a", 3800);
        let b = item("b", 4200);
        let c = item("c", 1350);

        cart.add_item(&a);
        assert_eq!(cart.subtotal(), expected_subtotal(&cart));
        cart.add_item(&b);
        cart.add_item(&a);
        assert_eq!(cart.subtotal(), expected_subtotal(&cart));
        assert_eq!(cart.subtotal(), Money::new(11_800));
        cart.update_quantity(&b.id, 3);
        cart.add_item(&c);
        assert_eq!(cart.subtotal(), expected_subtotal(&cart));
        cart.remove_item(&a.id);
        assert_eq!(cart.subtotal(), Money::new(4200 * 3 + 1350));
        cart.clear();
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_totals_apply_shipping() {
        let mut cart = Cart::new();
        cart.add_item(&item("a", 4000));

        let totals = cart.totals(&ShippingPolicy::default());
        assert_eq!(totals.subtotal, Money::new(4000));
        assert_eq!(totals.shipping, Money::new(2000));
        assert_eq!(totals.grand_total, Money::new(6000));
    }

    #[test]
    fn test_visibility_is_independent() {
        let mut cart = Cart::new();
        cart.open();
        cart.add_item(&item("a", 1000));
        assert!(cart.is_open());
        cart.toggle();
        assert!(!cart.is_open());
        cart.clear();
        cart.toggle();
        assert!(cart.is_open());
        cart.close();
        assert!(!cart.is_open());
    }
}
