//! # Barwaqo Remote
//!
//! Remote data access for the Barwaqo storefront: stateless async wrappers
//! around the hosted relational backend's REST surface, used by the order
//! and product pages, plus the checkout payload builder.
//!
//! The backend is an external collaborator: authentication, row-level
//! authorization, and the tables themselves live there. This crate only
//! issues parameterized queries and mutations and maps responses onto typed
//! records. No call caches; retry is limited to idempotent reads.
//!
//! ## Call policy
//!
//! - every request carries a per-request timeout from [`RemoteConfig`]
//! - reads (listings, lookups, searches) retry transient failures under a
//!   [`barwaqo_runtime::RetryPolicy`]
//! - writes (order creation, status updates) are single-attempt so a
//!   failure can never double-submit
//!
//! ## Example
//!
//! ```no_run
//! use barwaqo_remote::{RemoteClient, RemoteConfig};
//!
//! # async fn example() -> Result<(), barwaqo_remote::RemoteError> {
//! let client = RemoteClient::new(RemoteConfig::new(
//!     "https://example.supabase.co".to_string(),
//!     std::env::var("BACKEND_API_KEY").unwrap_or_default(),
//! ))?;
//!
//! let featured = client.fetch_featured_products(4).await?;
//! # Ok(())
//! # }
//! ```

pub mod checkout;
mod client;
mod error;
pub mod orders;
pub mod products;
mod types;

pub use checkout::{CheckoutConfig, CheckoutError, CheckoutForm, FieldError, build_order};
pub use client::{RemoteClient, RemoteConfig};
pub use error::{RemoteError, Result};
pub use types::{
    NewOrder, NewProduct, OrderRecord, OrderStatus, PaymentDetails, PaymentMethod, PaymentStatus,
    Product, ProductPatch,
};
