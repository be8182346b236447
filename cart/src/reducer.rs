//! Reducer logic for the shopping cart.
//!
//! Aggregates are recomputed from the lines after every transition instead
//! of being carried as deltas; a stale or replayed dispatch can therefore
//! change *which* lines exist but never desynchronize the totals from them.

use crate::types::{CartAction, CartLine, CartState};
use barwaqo_core::SmallVec;
use barwaqo_core::effect::Effect;
use barwaqo_core::environment::{NotificationKind, Notifier};
use std::sync::Arc;

/// Environment dependencies for the cart reducer.
#[derive(Clone)]
pub struct CartEnvironment {
    /// Channel for user-facing confirmations ("added to cart")
    pub notifier: Arc<dyn Notifier>,
}

impl CartEnvironment {
    /// Creates a new `CartEnvironment`.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

/// Reducer for the shopping cart.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Restore the aggregate invariant after any change to the lines.
    fn recompute(state: &mut CartState) {
        let (total_items, total_price) = state.recomputed_totals();
        state.total_items = total_items;
        state.total_price = total_price;
    }

    fn add_item(state: &mut CartState, line: CartLine, env: &CartEnvironment) {
        if line.quantity == 0 {
            let error = format!("cannot add {} with zero quantity", line.name);
            env.notifier.notify(NotificationKind::Error, &error);
            state.last_error = Some(error);
            return;
        }

        let name = line.name.clone();
        match state.items.iter_mut().find(|existing| existing.id == line.id) {
            // Saturate rather than overflow on absurd repeated adds.
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => state.items.push(line),
        }

        Self::recompute(state);
        state.last_error = None;
        env.notifier
            .notify(NotificationKind::Success, &format!("{name} added to cart"));
    }

    fn remove_item(state: &mut CartState, id: u64) {
        state.items.retain(|line| line.id != id);
        Self::recompute(state);
        state.last_error = None;
    }

    fn update_quantity(state: &mut CartState, id: u64, quantity: u32) {
        if quantity == 0 {
            Self::remove_item(state, id);
            return;
        }

        if let Some(line) = state.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }

        Self::recompute(state);
        state.last_error = None;
    }
}

impl barwaqo_core::reducer::Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddItem(line) => Self::add_item(state, line, env),
            CartAction::RemoveItem { id } => Self::remove_item(state, id),
            CartAction::UpdateQuantity { id, quantity } => {
                Self::update_quantity(state, id, quantity);
            },
            CartAction::ClearCart => *state = CartState::default(),
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barwaqo_core::reducer::Reducer;
    use barwaqo_testing::{ReducerTest, RecordingNotifier, assertions};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn fruit(id: u64, name: &str, cents: i64, quantity: u32) -> CartLine {
        CartLine {
            id,
            name: name.to_string(),
            image: format!("/fruits/{}.png", name.to_lowercase()),
            category: "Tropical".to_string(),
            price: Decimal::new(cents, 2),
            quantity,
        }
    }

    fn test_env() -> (CartEnvironment, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let as_notifier: Arc<dyn Notifier> = notifier.clone();
        (CartEnvironment::new(as_notifier), notifier)
    }

    #[test]
    fn add_item_appends_new_line() {
        let (env, notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_action(CartAction::AddItem(fruit(1, "Mango", 500, 2)))
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.total_items, 2);
                assert_eq!(state.total_price, Decimal::new(1000, 2));
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(notifier.messages(), vec!["Mango added to cart".to_string()]);
    }

    #[test]
    fn repeated_add_merges_quantity_into_one_line() {
        // Add {id 1, price 5.00, qty 2} then qty 3: one line, quantity 5,
        // total 25.00, 5 items.
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::AddItem(fruit(1, "Mango", 500, 3)),
            ])
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.line(1).map(|l| l.quantity), Some(5));
                assert_eq!(state.total_items, 5);
                assert_eq!(state.total_price, Decimal::new(2500, 2));
            })
            .run();
    }

    #[test]
    fn merge_saturates_instead_of_overflowing() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, u32::MAX - 1)),
                CartAction::AddItem(fruit(1, "Mango", 500, 5)),
            ])
            .then_state(|state| {
                assert_eq!(state.line(1).map(|l| l.quantity), Some(u32::MAX));
                let (items, price) = state.recomputed_totals();
                assert_eq!(state.total_items, items);
                assert_eq!(state.total_price, price);
            })
            .run();
    }

    #[test]
    fn add_preserves_insertion_order() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(3, "Papaya", 700, 1)),
                CartAction::AddItem(fruit(1, "Mango", 500, 1)),
                CartAction::AddItem(fruit(3, "Papaya", 700, 1)),
            ])
            .then_state(|state| {
                let ids: Vec<u64> = state.items.iter().map(|line| line.id).collect();
                assert_eq!(ids, vec![3, 1]);
            })
            .run();
    }

    #[test]
    fn zero_quantity_add_is_rejected_without_corrupting_totals() {
        let (env, notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::AddItem(fruit(2, "Lime", 120, 0)),
            ])
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.total_items, 2);
                assert!(state.last_error.as_deref().is_some_and(|e| e.contains("Lime")));
            })
            .run();

        assert_eq!(notifier.error_count(), 1);
    }

    #[test]
    fn remove_item_returns_cart_to_empty() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::RemoveItem { id: 1 },
            ])
            .then_state(|state| {
                assert!(state.is_empty());
                assert_eq!(state.total_items, 0);
                assert_eq!(state.total_price, Decimal::ZERO);
            })
            .run();
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::RemoveItem { id: 42 },
            ])
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.total_items, 2);
            })
            .run();
    }

    #[test]
    fn update_quantity_recomputes_aggregates() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::AddItem(fruit(2, "Lime", 120, 4)),
                CartAction::UpdateQuantity { id: 1, quantity: 7 },
            ])
            .then_state(|state| {
                assert_eq!(state.line(1).map(|l| l.quantity), Some(7));
                let (items, price) = state.recomputed_totals();
                assert_eq!(state.total_items, items);
                assert_eq!(state.total_price, price);
                assert_eq!(items, 11);
            })
            .run();
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::UpdateQuantity { id: 1, quantity: 0 },
            ])
            .then_state(|state| {
                assert!(state.is_empty());
                assert_eq!(state.total_items, 0);
            })
            .run();
    }

    #[test]
    fn update_quantity_on_absent_id_is_noop() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::UpdateQuantity { id: 9, quantity: 3 },
            ])
            .then_state(|state| {
                assert_eq!(state.total_items, 2);
            })
            .run();
    }

    #[test]
    fn clear_cart_resets_everything() {
        let (env, _notifier) = test_env();

        ReducerTest::new(CartReducer::new())
            .with_env(env)
            .given_state(CartState::new())
            .when_actions(vec![
                CartAction::AddItem(fruit(1, "Mango", 500, 2)),
                CartAction::AddItem(fruit(2, "Lime", 120, 4)),
                CartAction::ClearCart,
            ])
            .then_state(|state| {
                assert!(state.is_empty());
                assert_eq!(state.total_items, 0);
                assert_eq!(state.total_price, Decimal::ZERO);
            })
            .run();
    }

    fn apply_all(actions: Vec<CartAction>) -> CartState {
        let (env, _notifier) = test_env();
        let reducer = CartReducer::new();
        let mut state = CartState::new();
        for action in actions {
            reducer.reduce(&mut state, action, &env);
        }
        state
    }

    proptest! {
        /// Adding distinct ids: total_items is the sum of quantities and the
        /// line count equals the number of distinct ids.
        #[test]
        fn distinct_adds_sum_quantities(
            quantities in proptest::collection::vec(1u32..=u32::MAX, 1..12)
        ) {
            let actions = quantities
                .iter()
                .enumerate()
                .map(|(i, &q)| CartAction::AddItem(fruit(i as u64 + 1, "Fruit", 250, q)))
                .collect();

            let state = apply_all(actions);

            let expected: u64 = quantities.iter().map(|&q| u64::from(q)).sum();
            prop_assert_eq!(state.total_items, expected);
            prop_assert_eq!(state.len(), quantities.len());
        }

        /// Aggregates always match a from-scratch recomputation, whatever
        /// sequence of actions got the cart here.
        #[test]
        fn aggregates_never_drift(
            ops in proptest::collection::vec(
                (0u8..4, 1u64..6, 0u32..=u32::MAX, 100i64..1000),
                0..40,
            )
        ) {
            let actions = ops
                .into_iter()
                .map(|(kind, id, quantity, cents)| match kind {
                    0 => CartAction::AddItem(fruit(id, "Fruit", cents, quantity)),
                    1 => CartAction::RemoveItem { id },
                    2 => CartAction::UpdateQuantity { id, quantity },
                    _ => CartAction::ClearCart,
                })
                .collect();

            let state = apply_all(actions);

            let (items, price) = state.recomputed_totals();
            prop_assert_eq!(state.total_items, items);
            prop_assert_eq!(state.total_price, price);
        }
    }
}
