//! # Barwaqo Runtime
//!
//! Runtime implementation for the Barwaqo storefront state engine.
//!
//! This crate provides the [`Store`] runtime that coordinates reducer
//! execution, the [`PersistedStore`] wrapper that mirrors state to durable
//! storage after every dispatch, and the retry policy used by the remote
//! data layer for idempotent reads.
//!
//! ## Dispatch model
//!
//! The storefront is event-driven: a UI event dispatches an action, the
//! reducer computes the next state, the new state is broadcast to all
//! subscribers and mirrored to durable storage, then the UI re-renders.
//! Dispatches run to completion - `send` does not return until the reducer
//! and every effect it produced (including fed-back actions) have finished.
//! Two concurrent `send` calls serialize on the state lock.
//!
//! ## Example
//!
//! ```ignore
//! use barwaqo_runtime::PersistedStore;
//! use barwaqo_storage::{FileStorage, CART_KEY};
//!
//! let storage = Arc::new(FileStorage::new(data_dir)?);
//! let store = PersistedStore::new(storage, CART_KEY, CartReducer::new(), env);
//!
//! store.send(CartAction::AddItem(line)).await?;
//! let total = store.state(|s| s.total_items).await;
//! ```

pub mod retry;
pub mod store;

pub use retry::RetryPolicy;
pub use store::{PersistedStore, Store};

/// Error types for the store runtime.
pub mod error {
    use barwaqo_storage::StorageError;
    use thiserror::Error;

    /// Errors that can occur during store operations.
    #[derive(Debug, Error)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions.
        #[error("store is shutting down")]
        ShutdownInProgress,

        /// The post-dispatch state could not be written to durable storage.
        ///
        /// The in-memory state still reflects the completed dispatch; only
        /// the durable mirror is stale.
        #[error("failed to persist state: {0}")]
        Persist(#[from] StorageError),
    }
}

pub use error::StoreError;

/// Configuration for a [`Store`].
///
/// # Example
///
/// ```
/// use barwaqo_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_broadcast_capacity(64);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StoreConfig {
    /// Capacity of the state broadcast channel.
    ///
    /// Slow subscribers that lag more than this many snapshots behind miss
    /// intermediate states and resume at the newest one.
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a config with default settings (broadcast capacity 16).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            broadcast_capacity: 16,
        }
    }

    /// Set the state broadcast channel capacity.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
