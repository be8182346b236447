//! End-to-end persistence: cart and wishlist stores surviving a restart.

#![allow(clippy::unwrap_used)]

use barwaqo_cart::{CartAction, CartEnvironment, CartLine, CartReducer, CartState};
use barwaqo_runtime::PersistedStore;
use barwaqo_storage::{CART_KEY, MemoryStorage, Storage, WISHLIST_KEY};
use barwaqo_testing::RecordingNotifier;
use barwaqo_wishlist::{WishlistAction, WishlistItem, WishlistReducer};
use rust_decimal::Decimal;
use std::sync::Arc;

fn mango_line(quantity: u32) -> CartLine {
    CartLine {
        id: 1,
        name: "Mango".to_string(),
        image: "/images/mango.png".to_string(),
        category: "Tropical".to_string(),
        price: Decimal::new(500, 2),
        quantity,
    }
}

fn cart_env() -> CartEnvironment {
    CartEnvironment::new(Arc::new(RecordingNotifier::new()))
}

#[tokio::test]
async fn cart_survives_a_restart() {
    let storage = Arc::new(MemoryStorage::new());

    {
        let store = PersistedStore::new(
            storage.clone(),
            CART_KEY,
            CartReducer::new(),
            cart_env(),
        );
        store.send(CartAction::AddItem(mango_line(2))).await.unwrap();
        store.send(CartAction::AddItem(mango_line(3))).await.unwrap();
    }

    // A fresh store against the same slot sees the merged line.
    let revived = PersistedStore::new(
        storage.clone(),
        CART_KEY,
        CartReducer::new(),
        cart_env(),
    );
    let state: CartState = revived.snapshot().await;

    assert_eq!(state.len(), 1);
    assert_eq!(state.line(1).map(|l| l.quantity), Some(5));
    assert_eq!(state.total_items, 5);
    assert_eq!(state.total_price, Decimal::new(2500, 2));
}

#[tokio::test]
async fn cleared_cart_stays_cleared_after_restart() {
    let storage = Arc::new(MemoryStorage::new());

    {
        let store = PersistedStore::new(
            storage.clone(),
            CART_KEY,
            CartReducer::new(),
            cart_env(),
        );
        store.send(CartAction::AddItem(mango_line(2))).await.unwrap();
        store.send(CartAction::ClearCart).await.unwrap();
    }

    let revived = PersistedStore::new(
        storage.clone(),
        CART_KEY,
        CartReducer::new(),
        cart_env(),
    );
    assert!(revived.state(CartState::is_empty).await);
}

#[tokio::test]
async fn wishlist_survives_a_restart() {
    let storage = Arc::new(MemoryStorage::new());

    {
        let store = PersistedStore::new(
            storage.clone(),
            WISHLIST_KEY,
            WishlistReducer::new(),
            (),
        );
        store
            .send(WishlistAction::AddItem(WishlistItem {
                id: 7,
                name: "Papaya".to_string(),
                price: Decimal::new(350, 2),
                image: "/images/papaya.png".to_string(),
                category: "Tropical".to_string(),
            }))
            .await
            .unwrap();
    }

    let revived = PersistedStore::new(
        storage.clone(),
        WISHLIST_KEY,
        WishlistReducer::new(),
        (),
    );
    assert!(revived.state(|s| s.contains(7)).await);
    assert_eq!(revived.state(|s| s.total_items).await, 1);
}

#[tokio::test]
async fn cart_and_wishlist_use_separate_slots() {
    let storage = Arc::new(MemoryStorage::new());

    let cart = PersistedStore::new(
        storage.clone(),
        CART_KEY,
        CartReducer::new(),
        cart_env(),
    );
    let wishlist = PersistedStore::new(
        storage.clone(),
        WISHLIST_KEY,
        WishlistReducer::new(),
        (),
    );

    cart.send(CartAction::AddItem(mango_line(1))).await.unwrap();
    wishlist
        .send(WishlistAction::ClearWishlist)
        .await
        .unwrap();

    // Clearing the wishlist never touches the cart slot.
    let revived_cart = PersistedStore::new(
        storage.clone(),
        CART_KEY,
        CartReducer::new(),
        cart_env(),
    );
    assert_eq!(revived_cart.state(|s| s.total_items).await, 1);
}

#[tokio::test]
async fn malformed_slot_hydrates_empty() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .store(CART_KEY, &serde_json::json!({"items": "not-an-array"}))
        .unwrap();

    let store = PersistedStore::new(
        storage.clone(),
        CART_KEY,
        CartReducer::new(),
        cart_env(),
    );

    // Corrupt data falls back to an empty cart instead of failing startup.
    assert!(store.state(CartState::is_empty).await);

    // And the store keeps working from the clean slate.
    store.send(CartAction::AddItem(mango_line(1))).await.unwrap();
    assert_eq!(store.state(|s| s.total_items).await, 1);
}
