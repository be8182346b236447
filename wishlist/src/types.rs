//! Domain types for the wishlist.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A saved-for-later product reference.
///
/// Descriptive snapshot taken at save-time; no quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Product identifier
    pub id: u64,
    /// Product name at save-time
    pub name: String,
    /// Unit price at save-time
    pub price: Decimal,
    /// Product image path at save-time
    pub image: String,
    /// Product category at save-time
    pub category: String,
}

/// The full wishlist state.
///
/// Invariants, maintained by the reducer:
/// - items are unique by `id`, in first-saved order
/// - `total_items` equals the item count
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistState {
    /// Saved items in first-saved-first order
    pub items: Vec<WishlistItem>,
    /// Number of saved items
    pub total_items: u64,
}

impl WishlistState {
    /// Create an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no item is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Membership test: whether a product id is saved.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }
}

/// Every input the wishlist accepts.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WishlistAction {
    /// Save an item; a no-op if its id is already present
    AddItem(WishlistItem),
    /// Remove the item with this product id; no-op if absent
    RemoveItem {
        /// Product id to remove
        id: u64,
    },
    /// Reset to an empty wishlist
    ClearWishlist,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn persisted_json_round_trip() {
        let state = WishlistState {
            items: vec![WishlistItem {
                id: 7,
                name: "Papaya".to_string(),
                price: Decimal::new(700, 2),
                image: "/fruits/papaya.png".to_string(),
                category: "Tropical".to_string(),
            }],
            total_items: 1,
        };

        let json = serde_json::to_string(&state).unwrap();
        let revived: WishlistState = serde_json::from_str(&json).unwrap();
        assert_eq!(revived, state);
    }

    #[test]
    fn contains_checks_membership() {
        let mut state = WishlistState::new();
        assert!(!state.contains(7));

        state.items.push(WishlistItem {
            id: 7,
            name: "Papaya".to_string(),
            price: Decimal::new(700, 2),
            image: "/fruits/papaya.png".to_string(),
            category: "Tropical".to_string(),
        });
        state.total_items = 1;

        assert!(state.contains(7));
        assert!(!state.contains(8));
    }
}
