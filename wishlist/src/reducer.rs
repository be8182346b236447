//! Reducer logic for the wishlist.

use crate::types::{WishlistAction, WishlistState};
use barwaqo_core::SmallVec;
use barwaqo_core::effect::Effect;

/// Reducer for the wishlist.
///
/// A pure state machine - no environment, no effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct WishlistReducer;

impl WishlistReducer {
    /// Creates a new `WishlistReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    // total_items is always derived from the item count, never adjusted
    // incrementally.
    fn sync_count(state: &mut WishlistState) {
        state.total_items = state.items.len() as u64;
    }
}

impl barwaqo_core::reducer::Reducer for WishlistReducer {
    type State = WishlistState;
    type Action = WishlistAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            WishlistAction::AddItem(item) => {
                if !state.contains(item.id) {
                    state.items.push(item);
                    Self::sync_count(state);
                }
            },
            WishlistAction::RemoveItem { id } => {
                state.items.retain(|item| item.id != id);
                Self::sync_count(state);
            },
            WishlistAction::ClearWishlist => *state = WishlistState::default(),
        }

        SmallVec::new()
    }
}
