//! # Barwaqo Testing
//!
//! Testing utilities for the storefront crates:
//!
//! - [`ReducerTest`]: fluent Given-When-Then harness for reducers
//! - [`assertions`]: common effect assertions
//! - [`test_clock`] / [`FixedClock`]: deterministic time
//! - [`RecordingNotifier`]: captures user-facing notifications
//! - [`MemoryStorage`] (re-export): in-memory durable storage for store
//!   tests


pub use reducer_test::{ReducerTest, assertions};

pub use barwaqo_storage::MemoryStorage;

use barwaqo_core::environment::{Clock, NotificationKind, Notifier};
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// A clock frozen at a fixed instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a clock frozen at `time`.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// A clock frozen at 2024-06-01T12:00:00Z, for deterministic tests.
#[must_use]
pub fn test_clock() -> FixedClock {
    FixedClock::new(DateTime::from_timestamp(1_717_243_200, 0).unwrap_or_default())
}

/// A [`Notifier`] that records every notification instead of surfacing it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<(NotificationKind, String)>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded messages, in order.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn messages(&self) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Number of recorded notifications.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    /// Number of recorded error notifications.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn error_count(&self) -> usize {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|(kind, _)| *kind == NotificationKind::Error)
            .count()
    }
}

#[allow(clippy::unwrap_used)] // lock poisoning only follows a panic elsewhere
impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
    }
}
