//! Process-wide lifecycle fan-out over live mocks.
//!
//! The registry holds weak references only: it never extends a mock's
//! lifetime, and entries whose mock has been dropped are pruned as sweeps
//! encounter them. Typical use is one registry per test harness, with
//! `reset_all` (or `restore_all`) in unconditional teardown code.
//!
//! # Example
//!
//! ```rust
//! use mockkit::{MockFn, MockRegistry};
//!
//! let registry = MockRegistry::new();
//!
//! let fetch: MockFn<u32, String> = MockFn::new();
//! let store: MockFn<String, bool> = MockFn::new();
//! registry.register(&fetch);
//! registry.register(&store);
//!
//! fetch.returns("cached".to_string());
//! fetch.call(1);
//! store.call("value".to_string());
//!
//! registry.reset_all();
//!
//! assert_eq!(fetch.call_count(), 0);
//! assert_eq!(store.call_count(), 0);
//! assert_eq!(fetch.call(1), String::new()); // configuration is gone too
//! ```

use std::fmt::Debug;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use super::mock_fn::{MockFn, MockInner};

/// Type-erased lifecycle operations, so one registry can span mocks of
/// different instantiations.
pub(crate) trait MockLifecycle: Send + Sync {
    fn clear(&self);
    fn reset(&self);
    fn restore(&self);
}

impl<A, R, C> MockLifecycle for MockInner<A, R, C>
where
    A: Send + 'static,
    R: Send + 'static,
    C: Send + 'static,
{
    fn clear(&self) {
        self.clear_ledger();
    }

    fn reset(&self) {
        self.reset_state();
    }

    fn restore(&self) {
        self.restore_original();
    }
}

/// A non-owning registry of live mocks for bulk lifecycle operations.
pub struct MockRegistry {
    entries: Mutex<Vec<Weak<dyn MockLifecycle>>>,
}

impl MockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Adds a weak entry for `mock`. Registration does not keep the mock
    /// alive.
    pub fn register<A, R, C>(&self, mock: &MockFn<A, R, C>)
    where
        A: Send + 'static,
        R: Send + 'static,
        C: Send + 'static,
    {
        let inner: Arc<dyn MockLifecycle> = mock.inner.clone();
        let entry: Weak<dyn MockLifecycle> = Arc::downgrade(&inner);
        self.entries.lock().push(entry);
    }

    /// Clears the ledger of every registered live mock.
    pub fn clear_all(&self) {
        let live = self.sweep(|mock| mock.clear());
        debug!(live, "registry clear_all");
    }

    /// Resets every registered live mock (ledger and behavior).
    pub fn reset_all(&self) {
        let live = self.sweep(|mock| mock.reset());
        debug!(live, "registry reset_all");
    }

    /// Restores every registered live mock, reinstating spied originals.
    pub fn restore_all(&self) {
        let live = self.sweep(|mock| mock.restore());
        debug!(live, "registry restore_all");
    }

    /// Number of registered mocks still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }

    /// Applies `operation` to each live entry, dropping dead ones. Returns
    /// how many live mocks were visited.
    fn sweep(&self, operation: impl Fn(&dyn MockLifecycle)) -> usize {
        let mut entries = self.entries.lock();
        let mut live = 0;
        entries.retain(|entry| match entry.upgrade() {
            Some(mock) => {
                operation(mock.as_ref());
                live += 1;
                true
            }
            None => false,
        });
        live
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for MockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRegistry")
            .field("live_count", &self.live_count())
            .finish()
    }
}
