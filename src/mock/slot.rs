//! Call slots and spy creation.
//!
//! A [`CallSlot`] is the owner/property pair a spy shadows: a swappable
//! callable cell that owner code invokes through. [`spy_on`] swaps a
//! forwarder into the slot and remembers the displaced original, so the
//! mock can later put it back with `restore`.
//!
//! # Example
//!
//! ```rust
//! use mockkit::{spy_on, CallSlot};
//!
//! let slot: CallSlot<i32, i32> = CallSlot::new(|invocation| invocation.args * 2);
//! let spy = spy_on(&slot);
//!
//! // Unconfigured, the spy delegates to the original while recording.
//! assert_eq!(slot.invoke(21), 42);
//! assert_eq!(spy.calls(), vec![21]);
//!
//! // Configured behavior takes precedence over the original.
//! spy.returns(0);
//! assert_eq!(slot.invoke(5), 0);
//!
//! // Restoring resets the spy, reinstates the original, and stops
//! // recording.
//! spy.restore();
//! assert_eq!(slot.invoke(5), 10);
//! assert_eq!(spy.call_count(), 0);
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::behavior::ImplFn;
use super::mock_fn::{Invocation, MockFn};

/// A swappable callable cell: the stand-in for an owner/property pair.
///
/// Owner code routes its invocations through the slot; whoever holds the
/// slot can have a spy installed over it and later restored.
pub struct CallSlot<A, R, C = ()> {
    inner: Arc<SlotInner<A, R, C>>,
}

struct SlotInner<A, R, C> {
    target: Mutex<ImplFn<A, R, C>>,
}

impl<A, R, C> CallSlot<A, R, C>
where
    A: Clone + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    /// Creates a slot occupied by `original`.
    pub fn new<F>(original: F) -> Self
    where
        F: Fn(&Invocation<A, C>) -> R + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(SlotInner {
                target: Mutex::new(Arc::new(original)),
            }),
        }
    }

    /// Invokes whatever currently occupies the slot, with no receiver.
    pub fn invoke(&self, args: A) -> R {
        let target = self.current();
        target(&Invocation::plain(args))
    }

    /// Invokes whatever currently occupies the slot, against an explicit
    /// receiver.
    pub fn invoke_on(&self, receiver: C, args: A) -> R {
        let target = self.current();
        target(&Invocation::bound(receiver, args))
    }

    /// Clones out the currently installed callable. The slot lock is not
    /// held during the call itself.
    pub(crate) fn current(&self) -> ImplFn<A, R, C> {
        Arc::clone(&*self.inner.target.lock())
    }

    /// Swaps `callable` into the slot.
    pub(crate) fn install(&self, callable: ImplFn<A, R, C>) {
        *self.inner.target.lock() = callable;
    }
}

impl<A, R, C> Clone for CallSlot<A, R, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R, C> Debug for CallSlot<A, R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallSlot").finish_non_exhaustive()
    }
}

/// The association between a spy and the original callable it displaced.
pub(crate) struct SpyBinding<A, R, C> {
    slot: CallSlot<A, R, C>,
    original: ImplFn<A, R, C>,
}

impl<A, R, C> SpyBinding<A, R, C> {
    /// The bound original, for resolution-step delegation.
    pub(crate) fn original(&self) -> ImplFn<A, R, C> {
        Arc::clone(&self.original)
    }

    /// Writes the original back into the slot, detaching the spy.
    pub(crate) fn reinstate(self) {
        *self.slot.inner.target.lock() = self.original;
    }
}

/// Creates a mock bound to `slot`, shadowing whatever occupied it.
///
/// Until a one-shot or persistent behavior is configured, every invocation
/// through the slot executes the original callable and is recorded in the
/// mock's ledger like any other invocation. The forwarder installed into
/// the slot holds only a weak reference to the mock: dropping the mock
/// without `restore` leaves the slot falling back to the original, and the
/// slot never keeps the mock alive.
pub fn spy_on<A, R, C>(slot: &CallSlot<A, R, C>) -> MockFn<A, R, C>
where
    A: Clone + Send + 'static,
    R: Clone + Default + Send + 'static,
    C: Clone + Send + 'static,
{
    let mock = MockFn::new();
    let original = slot.current();

    let weak = Arc::downgrade(&mock.inner);
    let fallback = Arc::clone(&original);
    let forwarder: ImplFn<A, R, C> = Arc::new(move |invocation| match weak.upgrade() {
        Some(inner) => MockFn::from_inner(inner).intercept(invocation.clone()),
        None => fallback(invocation),
    });

    slot.install(forwarder);
    mock.inner.bind_spy(SpyBinding {
        slot: slot.clone(),
        original,
    });
    debug!(id = mock.id().as_u64(), "spy installed over call slot");
    mock
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Outcome;

    fn doubling_slot() -> CallSlot<i32, i32> {
        CallSlot::new(|invocation| invocation.args * 2)
    }

    #[test]
    fn test_slot_invokes_original() {
        let slot = doubling_slot();
        assert_eq!(slot.invoke(4), 8);
    }

    #[test]
    fn test_spy_records_while_delegating() {
        let slot = doubling_slot();
        let spy = spy_on(&slot);

        assert_eq!(slot.invoke(3), 6);
        assert_eq!(slot.invoke(5), 10);

        assert_eq!(spy.calls(), vec![3, 5]);
        assert_eq!(
            spy.results(),
            vec![Outcome::Return(6), Outcome::Return(10)]
        );
    }

    #[test]
    fn test_configured_behavior_overrides_original() {
        let slot = doubling_slot();
        let spy = spy_on(&slot);

        spy.returns_once(100);
        spy.returns(7);

        assert_eq!(slot.invoke(1), 100);
        assert_eq!(slot.invoke(1), 7);
        assert_eq!(spy.call_count(), 2);
    }

    #[test]
    fn test_restore_reinstates_original_and_stops_recording() {
        let slot = doubling_slot();
        let spy = spy_on(&slot);

        slot.invoke(1);
        spy.returns(0);
        spy.restore();

        // The original body runs again and the ledger stays empty.
        assert_eq!(slot.invoke(6), 12);
        assert_eq!(spy.call_count(), 0);
    }

    #[test]
    fn test_reset_keeps_spy_binding() {
        let slot = doubling_slot();
        let spy = spy_on(&slot);

        spy.returns(0);
        spy.reset();

        // Reset dropped the configuration but not the binding: invocations
        // still delegate and still record.
        assert_eq!(slot.invoke(2), 4);
        assert_eq!(spy.call_count(), 1);
    }

    #[test]
    fn test_dropped_spy_falls_back_to_original() {
        let slot = doubling_slot();
        let spy = spy_on(&slot);
        spy.returns(0);
        drop(spy);

        assert_eq!(slot.invoke(3), 6);
    }

    #[test]
    fn test_spy_receiver_calls_are_recorded() {
        let slot: CallSlot<i32, i32, &'static str> =
            CallSlot::new(|invocation| invocation.args + 1);
        let spy = spy_on(&slot);

        assert_eq!(slot.invoke_on("owner", 1), 2);
        assert_eq!(spy.contexts(), vec![Some("owner")]);
    }

    #[test]
    fn test_panicking_original_is_recorded_as_throw() {
        let slot: CallSlot<(), ()> = CallSlot::new(|_| panic!("original failure"));
        let spy = spy_on(&slot);

        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| slot.invoke(())));
        assert!(caught.is_err());
        assert!(spy.results()[0].is_throw());
    }
}
