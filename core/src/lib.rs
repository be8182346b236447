//! # Barwaqo Core
//!
//! Core traits and types for the Barwaqo storefront state engine.
//!
//! The storefront keeps every piece of client-side state (shopping cart,
//! wishlist) in a reducer-driven store: state evolves only through an
//! enumerated action set, and every transition is mirrored to durable
//! storage so it survives a restart.
//!
//! ## Core Concepts
//!
//! - **State**: owned, `Clone`-able domain state for one feature
//! - **Action**: a closed enum of every input the feature accepts
//! - **Reducer**: pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: side effect descriptions (not execution)
//! - **Environment**: injected dependencies via traits
//!
//! Making the action set a closed tagged union means an unhandled action is
//! a compile-time error, never a silent no-op.
//!
//! ## Example
//!
//! ```
//! use barwaqo_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = Counter;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Counter,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 SmallVec::new()
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types so feature crates need a single import line.
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

pub mod reducer {
    //! The core trait for business logic.
    //!
    //! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
    //! They contain all business logic and are deterministic and testable.

    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// Reducers must be **total**: every action variant is handled. Using a
    /// closed enum for `Action` makes the compiler enforce this.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

pub mod effect {
    //! Side effect descriptions.
    //!
    //! Effects describe side effects to be performed by the store runtime.
    //! They are values (not execution) and are composable.

    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the store
    /// runtime. The storefront runs dispatches to completion, so every
    /// effect (and any action it feeds back) finishes before the next
    /// dispatch begins.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently; the dispatch still waits for all of them
        Parallel(Vec<Effect<Action>>),

        /// Run effects one after another
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, deferred refreshes)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back into
        /// the reducer.
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run concurrently
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Build a `Future` effect from an async block
        pub fn future<F>(future: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(future))
        }
    }
}

pub mod environment {
    //! Dependency injection traits.
    //!
    //! All external dependencies are abstracted behind traits and injected
    //! via the Environment parameter so reducers stay deterministic under
    //! test.

    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Severity of a user-facing notification
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum NotificationKind {
        /// Operation succeeded (e.g., "added to cart")
        Success,
        /// Informational message
        Info,
        /// Operation failed in a way the user should see
        Error,
    }

    impl std::fmt::Display for NotificationKind {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Success => write!(f, "success"),
                Self::Info => write!(f, "info"),
                Self::Error => write!(f, "error"),
            }
        }
    }

    /// Notifier trait - the seam where a UI toast layer would attach
    ///
    /// The cart reducer fires a confirmation through this trait when an item
    /// is added. Tests inject a recording implementation; the demo binary
    /// logs through `tracing`.
    pub trait Notifier: Send + Sync {
        /// Surface a message to the user
        fn notify(&self, kind: NotificationKind, message: &str);
    }

    /// Notifier that forwards messages to the `tracing` subscriber
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TracingNotifier;

    impl Notifier for TracingNotifier {
        fn notify(&self, kind: NotificationKind, message: &str) {
            match kind {
                NotificationKind::Error => tracing::warn!(%kind, message, "notification"),
                NotificationKind::Success | NotificationKind::Info => {
                    tracing::info!(%kind, message, "notification");
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, NotificationKind, SystemClock};

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn effect_debug_does_not_panic() {
        let effect: Effect<u32> = Effect::Parallel(vec![Effect::None]);
        let rendered = format!("{effect:?}");
        assert!(rendered.contains("Parallel"));
    }

    #[test]
    fn effect_future_constructor() {
        let effect: Effect<u32> = Effect::future(async { Some(1) });
        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn notification_kind_display() {
        assert_eq!(NotificationKind::Success.to_string(), "success");
        assert_eq!(NotificationKind::Error.to_string(), "error");
    }
}
