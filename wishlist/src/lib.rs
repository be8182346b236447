//! # Barwaqo Wishlist
//!
//! The wishlist engine: unique-item membership over saved-for-later
//! products. Unlike the cart there is no quantity - adding an id that is
//! already present leaves the state untouched.
//!
//! `total_items` is derived from the item count on every transition, so
//! removing an id that was never saved cannot skew the counter. (The legacy
//! storefront decremented unconditionally here; deriving the count from the
//! items fixes that.)
//!
//! The wishlist is persisted under the `barwaqo_wishlist` storage slot when
//! run inside a `PersistedStore`.

mod reducer;
mod types;

pub use reducer::WishlistReducer;
pub use types::{WishlistAction, WishlistItem, WishlistState};
