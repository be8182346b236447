//! # Barwaqo Cart
//!
//! The shopping cart engine: line items with quantity and price
//! aggregation, evolved through a closed action set.
//!
//! A cart holds at most one line per product id - repeated adds merge into
//! the existing line by incrementing its quantity. The aggregate fields
//! `total_items` and `total_price` are recomputed from the lines on every
//! transition, so they can never drift from the items they summarize.
//!
//! The cart is persisted under the `barwaqo_cart` storage slot when
//! run inside a `PersistedStore`; its serde encoding is the storefront's
//! durable cart format.
//!
//! ## Example
//!
//! ```
//! use barwaqo_cart::{CartAction, CartEnvironment, CartLine, CartReducer, CartState};
//! use barwaqo_core::{environment::TracingNotifier, reducer::Reducer};
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let reducer = CartReducer::new();
//! let env = CartEnvironment::new(Arc::new(TracingNotifier));
//! let mut state = CartState::default();
//!
//! reducer.reduce(
//!     &mut state,
//!     CartAction::AddItem(CartLine {
//!         id: 1,
//!         name: "Mango".to_string(),
//!         image: "/fruits/mango.png".to_string(),
//!         category: "Tropical".to_string(),
//!         price: Decimal::new(500, 2),
//!         quantity: 2,
//!     }),
//!     &env,
//! );
//!
//! assert_eq!(state.total_items, 2);
//! assert_eq!(state.total_price, Decimal::new(1000, 2));
//! ```

mod reducer;
mod types;

pub use reducer::{CartEnvironment, CartReducer};
pub use types::{CartAction, CartLine, CartState};
