//! Store runtime: dispatch loop, state broadcast, and the persistence mirror.

use crate::{StoreConfig, StoreError};
use barwaqo_core::effect::Effect;
use barwaqo_core::reducer::Reducer;
use barwaqo_storage::Storage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{RwLock, broadcast};

type DispatchFuture<'a> = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

/// The Store - runtime coordinator for a reducer.
///
/// The Store manages:
/// 1. State (behind an `RwLock`, serialized access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(CartState::default(), CartReducer::new(), env);
///
/// store.send(CartAction::AddItem(line)).await?;
/// let count = store.state(|s| s.total_items).await;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    /// State broadcast channel for reactive consumers.
    ///
    /// Every completed reduction sends a full snapshot of the new state, so
    /// subscribed UI re-renders from the same value the dispatcher sees.
    state_broadcast: broadcast::Sender<S>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new store with a custom configuration.
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        let (state_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            state_broadcast,
        }
    }

    /// Send an action to the store.
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Broadcasts the new state snapshot to subscribers
    /// 4. Executes returned effects to completion, feeding produced actions
    ///    back through the reducer
    ///
    /// The dispatch runs to completion before `send` returns; there is no
    /// background work left over. Concurrent `send` calls serialize at the
    /// state lock.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store has been shut
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(StoreError::ShutdownInProgress);
        }

        self.dispatch(action).await
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver yields a full copy of the state after every completed
    /// reduction. A receiver that lags behind the channel capacity skips to
    /// the newest snapshot.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<S> {
        self.state_broadcast.subscribe()
    }

    /// Read a projection of the current state.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Clone the current state.
    pub async fn snapshot(&self) -> S {
        self.state.read().await.clone()
    }

    /// Stop accepting new actions.
    ///
    /// Dispatches already in flight run to completion; subsequent `send`
    /// calls return [`StoreError::ShutdownInProgress`].
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        tracing::info!("store shut down");
    }

    /// Whether the store has been shut down.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Run one reduction and every effect it produced.
    ///
    /// Boxed because effect feedback recurses into dispatch.
    fn dispatch(&self, action: A) -> DispatchFuture<'_> {
        Box::pin(async move {
            let (snapshot, effects) = {
                let mut state = self.state.write().await;
                let effects = self.reducer.reduce(&mut state, action, &self.environment);
                (state.clone(), effects)
            };

            // A send error only means no subscriber is currently listening.
            let _ = self.state_broadcast.send(snapshot);

            for effect in effects {
                self.run_effect(effect).await?;
            }

            Ok(())
        })
    }

    fn run_effect(&self, effect: Effect<A>) -> DispatchFuture<'_> {
        Box::pin(async move {
            match effect {
                Effect::None => Ok(()),
                Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect(effect).await?;
                    }
                    Ok(())
                },
                Effect::Parallel(effects) => {
                    let running = effects.into_iter().map(|effect| self.run_effect(effect));
                    futures::future::try_join_all(running).await?;
                    Ok(())
                },
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    self.dispatch(*action).await
                },
                Effect::Future(future) => match future.await {
                    Some(next) => self.dispatch(next).await,
                    None => Ok(()),
                },
            }
        })
    }
}

/// A [`Store`] whose state is mirrored to a durable storage slot.
///
/// Construction hydrates the initial state from the slot (falling back to
/// `S::default()` when the slot is missing or malformed); every completed
/// dispatch writes the new state back. State therefore survives a process
/// restart, matching what a returning shopper expects of their cart.
///
/// A storage write failure is surfaced as [`StoreError::Persist`]; the
/// in-memory state keeps the completed transition either way.
pub struct PersistedStore<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    inner: Store<S, A, E, R>,
    storage: Arc<dyn Storage>,
    key: &'static str,
}

impl<S, A, E, R> PersistedStore<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    S: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
    A: Send + 'static,
    E: Send + Sync + 'static,
{
    /// Create a store mirrored to the storage slot `key`, hydrating the
    /// initial state from whatever the slot currently holds.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, key: &'static str, reducer: R, environment: E) -> Self {
        Self::with_config(storage, key, reducer, environment, StoreConfig::default())
    }

    /// Create a persisted store with a custom configuration.
    #[must_use]
    pub fn with_config(
        storage: Arc<dyn Storage>,
        key: &'static str,
        reducer: R,
        environment: E,
        config: StoreConfig,
    ) -> Self {
        let initial: S = barwaqo_storage::hydrate(storage.as_ref(), key);
        let inner = Store::with_config(initial, reducer, environment, config);

        Self {
            inner,
            storage,
            key,
        }
    }

    /// Send an action, then mirror the post-dispatch state to storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store has been shut
    /// down, or [`StoreError::Persist`] if the durable write fails after the
    /// dispatch completed.
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        self.inner.send(action).await?;

        let snapshot = self.inner.snapshot().await;
        barwaqo_storage::persist(self.storage.as_ref(), self.key, &snapshot)?;
        Ok(())
    }

    /// Subscribe to state snapshots. See [`Store::subscribe`].
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<S> {
        self.inner.subscribe()
    }

    /// Read a projection of the current state.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        self.inner.state(f).await
    }

    /// Clone the current state.
    pub async fn snapshot(&self) -> S {
        self.inner.snapshot().await
    }

    /// Stop accepting new actions. See [`Store::shutdown`].
    pub fn shutdown(&self) {
        self.inner.shutdown();
    }

    /// The storage slot this store mirrors to.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }
}
