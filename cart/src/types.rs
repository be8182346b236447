//! Domain types for the shopping cart.
//!
//! The serde encoding of [`CartState`] is the durable cart format persisted
//! under the `barwaqo_cart` storage slot: camelCase field names, prices as
//! decimal strings, no version field.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One purchasable line in the cart.
///
/// The descriptive fields are snapshotted at add-time and are not
/// live-linked to later product updates; a price change in the catalog does
/// not reprice lines already in a cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier
    pub id: u64,
    /// Product name at add-time
    pub name: String,
    /// Product image path at add-time
    pub image: String,
    /// Product category at add-time
    pub category: String,
    /// Unit price at add-time
    pub price: Decimal,
    /// Number of units, always at least 1 for a stored line
    pub quantity: u32,
}

impl CartLine {
    /// Price contribution of this line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The full cart state.
///
/// Invariants, maintained by the reducer:
/// - at most one line per distinct `id`, in first-added order
/// - `total_items` equals the sum of all line quantities
/// - `total_price` equals the sum of all line totals
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Cart lines in first-added-first order
    pub items: Vec<CartLine>,
    /// Sum of all line quantities
    pub total_items: u64,
    /// Sum of all line totals
    pub total_price: Decimal,
    /// Last validation error, if the most recent action was rejected.
    ///
    /// Transient UI state - never persisted.
    #[serde(skip)]
    pub last_error: Option<String>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for a product id, if present.
    #[must_use]
    pub fn line(&self, id: u64) -> Option<&CartLine> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Whether a product id is in the cart.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.line(id).is_some()
    }

    /// Recompute `(total_items, total_price)` directly from the lines.
    ///
    /// The reducer maintains the aggregate fields with exactly this
    /// computation; tests use it to assert the two can never diverge.
    #[must_use]
    pub fn recomputed_totals(&self) -> (u64, Decimal) {
        let total_items = self.items.iter().map(|line| u64::from(line.quantity)).sum();
        let total_price = self.items.iter().map(CartLine::line_total).sum();
        (total_items, total_price)
    }
}

/// Every input the cart accepts.
///
/// A closed enum: the reducer handles each variant, so an unhandled action
/// is a compile-time error rather than a silent no-op.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CartAction {
    /// Add a line; merges by id, incrementing quantity (saturating) for
    /// repeated adds
    AddItem(CartLine),
    /// Remove the line with this product id; no-op if absent
    RemoveItem {
        /// Product id to remove
        id: u64,
    },
    /// Replace a line's quantity; zero removes the line, absent id is a no-op
    UpdateQuantity {
        /// Product id to update
        id: u64,
        /// New quantity
        quantity: u32,
    },
    /// Reset to an empty cart (dispatched after successful checkout)
    ClearCart,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    fn mango(quantity: u32) -> CartLine {
        CartLine {
            id: 1,
            name: "Mango".to_string(),
            image: "/fruits/mango.png".to_string(),
            category: "Tropical".to_string(),
            price: Decimal::new(500, 2),
            quantity,
        }
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(mango(3).line_total(), Decimal::new(1500, 2));
    }

    #[test]
    fn persisted_json_round_trip() {
        let state = CartState {
            items: vec![mango(2)],
            total_items: 2,
            total_price: Decimal::new(1000, 2),
            last_error: None,
        };

        let json = serde_json::to_string(&state).unwrap();
        let revived: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(revived, state);
    }

    #[test]
    fn persisted_json_uses_camel_case_keys() {
        let state = CartState {
            items: vec![mango(1)],
            total_items: 1,
            total_price: Decimal::new(500, 2),
            last_error: Some("never persisted".to_string()),
        };

        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("totalItems").is_some());
        assert!(json.get("totalPrice").is_some());
        assert!(json.get("lastError").is_none());
    }

    #[test]
    fn recomputed_totals_on_empty_cart_are_zero() {
        let state = CartState::new();
        assert_eq!(state.recomputed_totals(), (0, Decimal::ZERO));
    }
}
