//! Storefront walkthrough: persisted cart and wishlist stores, checkout
//! payload assembly, and (when configured) a live backend round-trip.
//!
//! Run twice to see persistence: the second run hydrates the cart the
//! first run left behind.
//!
//! ```sh
//! cargo run --bin storefront
//! BACKEND_URL=https://project.supabase.co BACKEND_API_KEY=... cargo run --bin storefront
//! ```

use anyhow::Context;
use barwaqo_cart::{CartAction, CartEnvironment, CartLine, CartReducer};
use barwaqo_core::environment::{SystemClock, TracingNotifier};
use barwaqo_remote::{CheckoutConfig, CheckoutForm, PaymentMethod, RemoteClient, RemoteConfig};
use barwaqo_runtime::PersistedStore;
use barwaqo_storage::{CART_KEY, FileStorage, Storage, WISHLIST_KEY};
use barwaqo_wishlist::{WishlistAction, WishlistItem, WishlistReducer};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage: Arc<dyn Storage> =
        Arc::new(FileStorage::new("barwaqo-data").context("creating data directory")?);

    let cart = PersistedStore::new(
        Arc::clone(&storage),
        CART_KEY,
        CartReducer::new(),
        CartEnvironment::new(Arc::new(TracingNotifier)),
    );
    let wishlist = PersistedStore::new(
        Arc::clone(&storage),
        WISHLIST_KEY,
        WishlistReducer::new(),
        (),
    );

    let hydrated = cart.snapshot().await;
    if !hydrated.is_empty() {
        tracing::info!(
            items = hydrated.total_items,
            total = %hydrated.total_price,
            "cart hydrated from previous run"
        );
    }

    // A shopper adds two mangoes, then one more.
    cart.send(CartAction::AddItem(mango(2))).await?;
    cart.send(CartAction::AddItem(mango(1))).await?;
    cart.send(CartAction::AddItem(CartLine {
        id: 2,
        name: "Papaya".to_string(),
        image: "/images/papaya.png".to_string(),
        category: "Tropical".to_string(),
        price: Decimal::new(350, 2),
        quantity: 1,
    }))
    .await?;

    wishlist
        .send(WishlistAction::AddItem(WishlistItem {
            id: 3,
            name: "Dragon Fruit".to_string(),
            price: Decimal::new(799, 2),
            image: "/images/dragonfruit.png".to_string(),
            category: "Exotic".to_string(),
        }))
        .await?;

    let state = cart.snapshot().await;
    tracing::info!(
        lines = state.len(),
        items = state.total_items,
        total = %state.total_price,
        "cart after shopping"
    );

    let form = CheckoutForm {
        name: "Amina Yusuf".to_string(),
        email: "amina@example.com".to_string(),
        phone: "615551234".to_string(),
        address: "12 Harbor Road".to_string(),
        city: "Hargeisa".to_string(),
        region: "Maroodi Jeex".to_string(),
        payment_method: PaymentMethod::Cash,
        payment_details: None,
    };
    let order = barwaqo_remote::build_order(
        &form,
        &state,
        &CheckoutConfig::default(),
        &SystemClock,
    )?;
    tracing::info!(order_id = %order.id, total = %order.total_amount, "order assembled");

    // With backend credentials in the environment, actually place it.
    if let (Ok(base_url), Ok(api_key)) = (
        std::env::var("BACKEND_URL"),
        std::env::var("BACKEND_API_KEY"),
    ) {
        let client = RemoteClient::new(RemoteConfig::new(base_url, api_key))?;

        let featured = client.fetch_featured_products(4).await?;
        for product in &featured {
            tracing::info!(name = %product.name, rating = %product.rating, "featured");
        }

        let placed = client.create_order(&order).await?;
        tracing::info!(order_id = %placed.id, "order placed");

        cart.send(CartAction::ClearCart).await?;
        tracing::info!("cart cleared after checkout");
    } else {
        tracing::info!("BACKEND_URL / BACKEND_API_KEY not set; skipping remote calls");
    }

    cart.shutdown();
    wishlist.shutdown();
    Ok(())
}

fn mango(quantity: u32) -> CartLine {
    CartLine {
        id: 1,
        name: "Mango".to_string(),
        image: "/images/mango.png".to_string(),
        category: "Tropical".to_string(),
        price: Decimal::new(500, 2),
        quantity,
    }
}
