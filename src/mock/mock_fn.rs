//! The mock function proper: interceptor, configuration surface, and
//! lifecycle controller.
//!
//! # Example
//!
//! ```rust
//! use mockkit::MockFn;
//!
//! let mock: MockFn<i32, i32> = MockFn::new();
//! mock.returns_once(1).returns_once(2);
//!
//! assert_eq!(mock.call(7), 1);
//! assert_eq!(mock.call(8), 2);
//! assert_eq!(mock.call(9), 0); // absent-value sentinel
//!
//! assert_eq!(mock.calls(), vec![7, 8, 9]);
//! assert_eq!(mock.last_call(), Some(9));
//! ```

use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::behavior::{BehaviorQueue, PendingBehavior, Resolution};
use super::ledger::{CallHandle, Ledger, Outcome, ThrowPayload};
use super::settled::AsyncOutcome;
use super::slot::SpyBinding;

/// The display label a mock reports until one is set.
pub const DEFAULT_MOCK_NAME: &str = "mock";

static NEXT_MOCK_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a mock, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockId(u64);

impl MockId {
    fn next() -> Self {
        Self(NEXT_MOCK_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// How an invocation reached the mock.
///
/// Captured explicitly at the call boundary; recording logic is a pure
/// function of this tag, never inferred after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// An ordinary call with no receiver.
    Plain,
    /// A call made against an explicit receiver.
    Bound,
    /// A construction; the produced value is also recorded as an instance.
    Construct,
}

/// Everything an implementation body sees about one invocation.
#[derive(Debug, Clone)]
pub struct Invocation<A, C = ()> {
    /// The captured argument tuple.
    pub args: A,
    /// The effective receiver, if one was bound.
    pub receiver: Option<C>,
    /// The shape of the invocation.
    pub shape: CallShape,
}

impl<A, C> Invocation<A, C> {
    /// An invocation with no receiver, as made by [`MockFn::call`].
    #[must_use]
    pub fn plain(args: A) -> Self {
        Self {
            args,
            receiver: None,
            shape: CallShape::Plain,
        }
    }

    /// An invocation against an explicit receiver, as made by
    /// [`MockFn::call_on`].
    #[must_use]
    pub fn bound(receiver: C, args: A) -> Self {
        Self {
            args,
            receiver: Some(receiver),
            shape: CallShape::Bound,
        }
    }

    /// A construct-shaped invocation, as made by [`MockFn::construct`].
    #[must_use]
    pub fn construct(args: A) -> Self {
        Self {
            args,
            receiver: None,
            shape: CallShape::Construct,
        }
    }
}

pub(crate) struct MockInner<A, R, C> {
    id: MockId,
    name: Mutex<Option<String>>,
    ledger: Mutex<Ledger<A, R, C>>,
    behaviors: Mutex<BehaviorQueue<A, R, C>>,
    binding: Mutex<Option<SpyBinding<A, R, C>>>,
}

impl<A, R, C> MockInner<A, R, C> {
    fn new() -> Self {
        Self {
            id: MockId::next(),
            name: Mutex::new(None),
            ledger: Mutex::new(Ledger::new()),
            behaviors: Mutex::new(BehaviorQueue::new()),
            binding: Mutex::new(None),
        }
    }

    pub(crate) fn id(&self) -> MockId {
        self.id
    }

    pub(crate) fn bind_spy(&self, binding: SpyBinding<A, R, C>) {
        *self.binding.lock() = Some(binding);
    }

    /// `clear`: truncates the ledger, leaves behavior configuration alone.
    pub(crate) fn clear_ledger(&self) {
        self.ledger.lock().truncate();
        trace!(id = self.id.as_u64(), "mock ledger cleared");
    }

    /// `reset`: `clear` plus emptying the behavior queue and persistent
    /// slot. The mock behaves as freshly created afterwards.
    pub(crate) fn reset_state(&self) {
        self.ledger.lock().truncate();
        self.behaviors.lock().clear();
        trace!(id = self.id.as_u64(), "mock reset");
    }

    /// `restore`: `reset` plus writing the spied original back into its
    /// slot. A no-op (not an error) when no spy binding is present, so
    /// teardown code can be unconditional.
    pub(crate) fn restore_original(&self) {
        self.reset_state();
        let binding = self.binding.lock().take();
        match binding {
            Some(binding) => {
                binding.reinstate();
                debug!(id = self.id.as_u64(), "spy restored, original reinstated");
            }
            None => trace!(id = self.id.as_u64(), "restore without spy binding, no-op"),
        }
    }
}

/// A mock/spy function: a callable proxy that records every invocation in a
/// ledger and substitutes configured behavior for an original.
///
/// `A` is the argument tuple type, `R` the return type, `C` the receiver
/// type (defaults to `()` for mocks never called against a receiver). All
/// three must be `Clone`; invocation additionally requires `R: Default`,
/// the absent-value sentinel.
///
/// Clones share state: recording through one handle is visible through all
/// of them.
pub struct MockFn<A, R, C = ()> {
    pub(crate) inner: Arc<MockInner<A, R, C>>,
}

impl<A, R, C> Clone for MockFn<A, R, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R, C> Default for MockFn<A, R, C>
where
    A: 'static,
    R: 'static,
    C: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R, C> MockFn<A, R, C>
where
    A: 'static,
    R: 'static,
    C: 'static,
{
    /// Creates a mock with an empty ledger and no configured behavior.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockInner::new()),
        }
    }

    pub(crate) fn from_inner(inner: Arc<MockInner<A, R, C>>) -> Self {
        Self { inner }
    }

    /// Returns the mock's process-unique id.
    #[must_use]
    pub fn id(&self) -> MockId {
        self.inner.id
    }

    /// Returns the display name, or [`DEFAULT_MOCK_NAME`] until one is set.
    #[must_use]
    pub fn name(&self) -> String {
        self.inner
            .name
            .lock()
            .clone()
            .unwrap_or_else(|| DEFAULT_MOCK_NAME.to_string())
    }

    /// Sets the display name used in diagnostics.
    pub fn set_name(&self, label: impl Into<String>) -> &Self {
        *self.inner.name.lock() = Some(label.into());
        self
    }

    /// Empties the ledger. Configured behavior is untouched: a subsequent
    /// call still consumes any queued one-shot or persistent behavior.
    pub fn clear(&self) {
        self.inner.clear_ledger();
    }

    /// Empties the ledger *and* all configured behavior. A subsequent call
    /// falls through to delegation-or-default, as on a fresh mock.
    pub fn reset(&self) {
        self.inner.reset_state();
    }

    /// [`reset`](Self::reset), then reinstates the spied original callable
    /// if this mock was created by [`spy_on`](crate::mock::spy_on).
    /// Invocations through the slot afterwards bypass this mock entirely.
    /// Without a spy binding this is a defined no-op.
    pub fn restore(&self) {
        self.inner.restore_original();
    }

    /// Number of one-shot behaviors still queued.
    #[must_use]
    pub fn pending_once_behaviors(&self) -> usize {
        self.inner.behaviors.lock().one_shot_len()
    }

    /// Whether a persistent behavior is currently configured.
    #[must_use]
    pub fn has_persistent_behavior(&self) -> bool {
        self.inner.behaviors.lock().has_persistent()
    }
}

impl<A, R, C> MockFn<A, R, C>
where
    A: Clone + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    /// Creates a mock seeded with a persistent implementation. Sugar for
    /// [`new`](Self::new) followed by [`invokes`](Self::invokes).
    #[must_use]
    pub fn with_implementation<F>(body: F) -> Self
    where
        F: Fn(&Invocation<A, C>) -> R + Send + Sync + 'static,
    {
        let mock = Self::new();
        mock.invokes(body);
        mock
    }

    /// Sets the persistent implementation, replacing any persistent
    /// behavior of any kind.
    pub fn invokes<F>(&self, body: F) -> &Self
    where
        F: Fn(&Invocation<A, C>) -> R + Send + Sync + 'static,
    {
        self.set_persistent(PendingBehavior::Implementation(Arc::new(body)))
    }

    /// Queues a one-shot implementation, consumed by exactly one future
    /// invocation in registration order.
    pub fn invokes_once<F>(&self, body: F) -> &Self
    where
        F: Fn(&Invocation<A, C>) -> R + Send + Sync + 'static,
    {
        self.push_once(PendingBehavior::Implementation(Arc::new(body)))
    }

    /// Sets a persistent canned return value; no body executes when it
    /// applies.
    pub fn returns(&self, value: R) -> &Self {
        self.set_persistent(PendingBehavior::ReturnValue(value))
    }

    /// Queues a one-shot canned return value.
    pub fn returns_once(&self, value: R) -> &Self {
        self.push_once(PendingBehavior::ReturnValue(value))
    }

    fn set_persistent(&self, behavior: PendingBehavior<A, R, C>) -> &Self {
        trace!(
            id = self.inner.id.as_u64(),
            kind = behavior.kind(),
            "persistent behavior replaced"
        );
        self.inner.behaviors.lock().set_persistent(behavior);
        self
    }

    fn push_once(&self, behavior: PendingBehavior<A, R, C>) -> &Self {
        trace!(
            id = self.inner.id.as_u64(),
            kind = behavior.kind(),
            "one-shot behavior queued"
        );
        self.inner.behaviors.lock().push_once(behavior);
        self
    }

    /// All recorded argument tuples, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<A> {
        self.inner.ledger.lock().calls().to_vec()
    }

    /// All recorded outcomes, index-aligned with [`calls`](Self::calls).
    #[must_use]
    pub fn results(&self) -> Vec<Outcome<R>> {
        self.inner.ledger.lock().results().to_vec()
    }

    /// The receiver each invocation was made against, index-aligned with
    /// [`calls`](Self::calls). `None` where no receiver was bound.
    #[must_use]
    pub fn contexts(&self) -> Vec<Option<C>> {
        self.inner.ledger.lock().contexts().to_vec()
    }

    /// Instances produced by construct-shaped invocations, in call order.
    /// Not index-aligned with the other sequences.
    #[must_use]
    pub fn instances(&self) -> Vec<R> {
        self.inner.ledger.lock().instances().to_vec()
    }

    /// The most recent argument tuple, or `None` if the ledger is empty.
    #[must_use]
    pub fn last_call(&self) -> Option<A> {
        self.inner.ledger.lock().last_call().cloned()
    }

    /// The argument tuple of the nth invocation (0-indexed).
    #[must_use]
    pub fn nth_call(&self, n: usize) -> Option<A> {
        self.inner.ledger.lock().calls().get(n).cloned()
    }

    /// Number of recorded invocations.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.ledger.lock().len()
    }

    /// Whether the mock was invoked at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Whether the mock was invoked exactly `n` times.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.call_count() == n
    }
}

impl<A, R, C> MockFn<A, R, C>
where
    A: Clone + PartialEq + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    /// Whether any recorded invocation used exactly these arguments.
    #[must_use]
    pub fn was_called_with(&self, expected: &A) -> bool {
        self.inner
            .ledger
            .lock()
            .calls()
            .iter()
            .any(|args| args == expected)
    }
}

impl<A, R, C> MockFn<A, R, C>
where
    A: Clone + 'static,
    R: Clone + Default + 'static,
    C: Clone + 'static,
{
    /// Invokes the mock with no receiver.
    ///
    /// # Panics
    ///
    /// Re-raises whatever a resolved implementation body raised, after
    /// recording it in the ledger.
    pub fn call(&self, args: A) -> R {
        self.intercept(Invocation::plain(args))
    }

    /// Invokes the mock against an explicit receiver, recorded in
    /// [`contexts`](Self::contexts).
    ///
    /// # Panics
    ///
    /// As for [`call`](Self::call).
    pub fn call_on(&self, receiver: C, args: A) -> R {
        self.intercept(Invocation::bound(receiver, args))
    }

    /// Invokes the mock in construct shape. The produced value is both
    /// returned and appended to [`instances`](Self::instances); resolution
    /// falling through to the sentinel allocates a fresh `R::default()`.
    ///
    /// # Panics
    ///
    /// As for [`call`](Self::call). A raised construction records no
    /// instance.
    pub fn construct(&self, args: A) -> R {
        self.intercept(Invocation::construct(args))
    }

    /// The single recording path every invocation shape funnels into.
    ///
    /// Reserves a ledger slot before behavior resolution, executes, then
    /// finalizes the slot in place. No internal lock is held while a body
    /// runs, so a body may re-enter the same mock; it will observe its own
    /// slot as `Incomplete`.
    pub(crate) fn intercept(&self, invocation: Invocation<A, C>) -> R {
        let handle = self
            .inner
            .ledger
            .lock()
            .reserve(invocation.args.clone(), invocation.receiver.clone());

        let delegate = self
            .inner
            .binding
            .lock()
            .as_ref()
            .map(SpyBinding::original);
        let resolution = self.inner.behaviors.lock().resolve(delegate);

        let value = match resolution {
            Resolution::Run(body) => {
                match panic::catch_unwind(AssertUnwindSafe(|| body(&invocation))) {
                    Ok(value) => value,
                    Err(payload) => {
                        // The ledger must be authoritative before the caller
                        // observes the failure.
                        self.finalize(handle, Outcome::Throw(ThrowPayload::from_panic(&*payload)));
                        panic::resume_unwind(payload);
                    }
                }
            }
            Resolution::Value(value) => value,
            Resolution::Fallthrough => R::default(),
        };

        let mut ledger = self.inner.ledger.lock();
        ledger.finalize(handle, Outcome::Return(value.clone()));
        if invocation.shape == CallShape::Construct {
            ledger.record_instance(value.clone());
        }
        drop(ledger);

        value
    }

    fn finalize(&self, handle: CallHandle, outcome: Outcome<R>) {
        self.inner.ledger.lock().finalize(handle, outcome);
    }
}

impl<A, R, C> MockFn<A, R, C>
where
    A: Clone + 'static,
    R: Clone + Default + 'static,
    C: Clone + Into<R> + 'static,
{
    /// Sets a persistent implementation that returns the invocation's own
    /// receiver, or the sentinel when none is bound.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mockkit::MockFn;
    ///
    /// let mock: MockFn<(), String, String> = MockFn::new();
    /// mock.returns_receiver();
    ///
    /// assert_eq!(mock.call_on("receiver".to_string(), ()), "receiver");
    /// assert_eq!(mock.call(()), String::new());
    /// ```
    pub fn returns_receiver(&self) -> &Self {
        self.invokes(|invocation| {
            invocation
                .receiver
                .clone()
                .map_or_else(R::default, Into::into)
        })
    }
}

impl<A, R, C> MockFn<A, R, C>
where
    A: Clone + 'static,
    R: Clone + AsyncOutcome + 'static,
    C: Clone + 'static,
{
    /// Sets a persistent behavior producing a wrapper already fulfilled
    /// with `value`. No caller-supplied code is invoked; the ledger records
    /// `Return(wrapper)` at the call boundary.
    pub fn resolves(&self, value: R::Fulfilled) -> &Self {
        self.set_persistent(PendingBehavior::Resolved(R::fulfilled(value)))
    }

    /// Queues a one-shot behavior producing a wrapper already fulfilled
    /// with `value`.
    pub fn resolves_once(&self, value: R::Fulfilled) -> &Self {
        self.push_once(PendingBehavior::Resolved(R::fulfilled(value)))
    }

    /// Sets a persistent behavior producing a wrapper already failed with
    /// `error`. The failure is observed by awaiting the wrapper; it is
    /// never recorded as a synchronous `Throw`.
    pub fn rejects(&self, error: R::Failed) -> &Self {
        self.set_persistent(PendingBehavior::Rejected(R::failed(error)))
    }

    /// Queues a one-shot behavior producing a wrapper already failed with
    /// `error`.
    pub fn rejects_once(&self, error: R::Failed) -> &Self {
        self.push_once(PendingBehavior::Rejected(R::failed(error)))
    }
}

impl<A, R, C> Debug for MockFn<A, R, C>
where
    A: Debug + Clone + 'static,
    R: Debug + Clone + 'static,
    C: Debug + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockFn")
            .field("name", &self.name())
            .field("call_count", &self.call_count())
            .field("calls", &self.inner.ledger.lock().calls())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Settled;

    #[test]
    fn test_fresh_mock_returns_sentinel() {
        let mock: MockFn<i32, i32> = MockFn::new();

        assert_eq!(mock.call(5), 0);
        assert_eq!(mock.results(), vec![Outcome::Return(0)]);
    }

    #[test]
    fn test_ledger_sequences_stay_aligned() {
        let mock: MockFn<i32, i32> = MockFn::new();

        for n in 0..4 {
            mock.call(n);
        }

        assert_eq!(mock.calls().len(), 4);
        assert_eq!(mock.results().len(), 4);
        assert_eq!(mock.contexts().len(), 4);
        assert_eq!(mock.last_call(), Some(3));
    }

    #[test]
    fn test_one_shot_values_then_sentinel() {
        let mock: MockFn<(), &'static str> = MockFn::new();
        mock.returns_once("first").returns_once("second");

        assert_eq!(mock.call(()), "first");
        assert_eq!(mock.call(()), "second");
        assert_eq!(mock.call(()), "");
    }

    #[test]
    fn test_one_shot_implementations_then_persistent() {
        let mock: MockFn<(), String> = MockFn::new();
        mock.invokes(|_| "default".to_string());
        mock.invokes_once(|_| "a".to_string());
        mock.invokes_once(|_| "b".to_string());

        let outputs: Vec<String> = (0..4).map(|_| mock.call(())).collect();
        assert_eq!(outputs, ["a", "b", "default", "default"]);
    }

    #[test]
    fn test_mixed_one_shot_kinds_drain_in_registration_order() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.returns_once(1);
        mock.invokes_once(|_| 2);
        mock.returns_once(3);

        assert_eq!(mock.call(()), 1);
        assert_eq!(mock.call(()), 2);
        assert_eq!(mock.call(()), 3);
    }

    #[test]
    fn test_persistent_value_replaces_persistent_implementation() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.invokes(|_| 7);
        mock.returns(8);

        assert_eq!(mock.call(()), 8);
    }

    #[test]
    fn test_contexts_record_distinct_receivers() {
        let mock: MockFn<i32, i32, &'static str> = MockFn::new();

        mock.call_on("first", 0);
        mock.call_on("second", 0);
        mock.call_on("third", 0);

        assert_eq!(
            mock.contexts(),
            vec![Some("first"), Some("second"), Some("third")]
        );
    }

    #[test]
    fn test_plain_call_records_no_receiver() {
        let mock: MockFn<i32, i32, &'static str> = MockFn::new();
        mock.call(1);
        assert_eq!(mock.contexts(), vec![None]);
    }

    #[test]
    fn test_construct_records_instance_equal_to_result() {
        let mock: MockFn<(), Vec<i32>> = MockFn::new();
        mock.invokes(|_| vec![1, 2, 3]);

        let instance = mock.construct(());

        assert_eq!(instance, vec![1, 2, 3]);
        assert_eq!(mock.instances(), vec![vec![1, 2, 3]]);
        assert_eq!(mock.calls().len(), 1);
    }

    #[test]
    fn test_construct_fallthrough_allocates_default_instance() {
        let mock: MockFn<(), Vec<i32>> = MockFn::new();

        let instance = mock.construct(());

        assert!(instance.is_empty());
        assert_eq!(mock.instances(), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_plain_calls_do_not_grow_instances() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.call(());
        mock.construct(());
        mock.call(());

        assert_eq!(mock.calls().len(), 3);
        assert_eq!(mock.instances().len(), 1);
    }

    #[test]
    fn test_panic_is_recorded_then_reraised() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.invokes(|_| panic!("implementation failure"));

        let caught = panic::catch_unwind(AssertUnwindSafe(|| mock.call(())));
        assert!(caught.is_err());

        // The ledger reflects the failure even though it also propagated.
        assert_eq!(mock.call_count(), 1);
        assert_eq!(
            mock.results(),
            vec![Outcome::Throw(ThrowPayload::new("implementation failure"))]
        );
    }

    #[test]
    fn test_panicking_construct_records_no_instance() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.invokes_once(|_| panic!("constructor failure"));

        let caught = panic::catch_unwind(AssertUnwindSafe(|| mock.construct(())));
        assert!(caught.is_err());
        assert!(mock.instances().is_empty());
        assert!(mock.results()[0].is_throw());
    }

    #[test]
    fn test_reentrant_body_observes_own_slot_incomplete() {
        let mock: MockFn<u32, u32> = MockFn::new();
        let observer = mock.clone();
        mock.invokes(move |invocation| {
            if invocation.args == 0 {
                // First slot is reserved but not finalized while we run.
                assert!(observer.results()[0].is_incomplete());
                let nested = observer.call(1);
                // The nested call has completed by now.
                assert_eq!(observer.results()[1], Outcome::Return(1));
                nested
            } else {
                invocation.args
            }
        });

        assert_eq!(mock.call(0), 1);
        assert_eq!(mock.call_count(), 2);
        assert!(mock.results().iter().all(Outcome::is_return));
    }

    #[test]
    fn test_clear_keeps_configured_behavior() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.returns(42);
        mock.returns_once(1);
        mock.call(());

        mock.clear();

        assert_eq!(mock.call_count(), 0);
        assert!(mock.last_call().is_none());
        // The persistent value survived the clear (the one-shot was already
        // consumed by the call above).
        assert_eq!(mock.call(()), 42);
    }

    #[test]
    fn test_reset_drops_configured_behavior() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.returns(42);
        mock.returns_once(1);

        mock.reset();

        assert_eq!(mock.pending_once_behaviors(), 0);
        assert!(!mock.has_persistent_behavior());
        assert_eq!(mock.call(()), 0);
    }

    #[test]
    fn test_restore_without_binding_is_noop() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.returns(42);
        mock.call(());

        mock.restore();

        assert_eq!(mock.call_count(), 0);
        assert_eq!(mock.call(()), 0);
    }

    #[test]
    fn test_name_defaults_until_set() {
        let mock: MockFn<(), ()> = MockFn::new();
        assert_eq!(mock.name(), DEFAULT_MOCK_NAME);

        mock.set_name("fetch_user");
        assert_eq!(mock.name(), "fetch_user");

        // Lifecycle operations leave the name alone.
        mock.reset();
        assert_eq!(mock.name(), "fetch_user");
    }

    #[test]
    fn test_ids_are_unique() {
        let first: MockFn<(), ()> = MockFn::new();
        let second: MockFn<(), ()> = MockFn::new();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_clones_share_state() {
        let mock: MockFn<i32, i32> = MockFn::new();
        let clone = mock.clone();

        mock.returns_once(5);
        assert_eq!(clone.call(1), 5);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.id(), clone.id());
    }

    #[test]
    fn test_with_implementation_seeds_persistent() {
        let mock: MockFn<i32, i32> = MockFn::with_implementation(|invocation| invocation.args * 2);
        assert_eq!(mock.call(21), 42);
        assert!(mock.has_persistent_behavior());
    }

    #[test]
    fn test_was_called_helpers() {
        let mock: MockFn<i32, i32> = MockFn::new();
        assert!(!mock.was_called());

        mock.call(10);
        mock.call(20);

        assert!(mock.was_called());
        assert!(mock.was_called_times(2));
        assert!(mock.was_called_with(&10));
        assert!(!mock.was_called_with(&30));
        assert_eq!(mock.nth_call(1), Some(20));
        assert_eq!(mock.nth_call(2), None);
    }

    #[test]
    fn test_resolves_and_rejects_record_return_synchronously() {
        let mock: MockFn<(), Settled<&'static str, &'static str>> = MockFn::new();
        mock.resolves_once("first call");
        mock.rejects_once("error value");

        let first = mock.call(());
        let second = mock.call(());

        assert!(first.is_fulfilled());
        assert!(second.is_failed());
        // Both invocations are Return(wrapper) in the ledger, never Throw.
        assert!(mock.results().iter().all(Outcome::is_return));
    }

    #[test]
    fn test_implementation_sees_shape_and_receiver() {
        let mock: MockFn<i32, String, &'static str> = MockFn::new();
        mock.invokes(|invocation| {
            format!(
                "{:?}/{}/{}",
                invocation.shape,
                invocation.receiver.unwrap_or("none"),
                invocation.args
            )
        });

        assert_eq!(mock.call(1), "Plain/none/1");
        assert_eq!(mock.call_on("ctx", 2), "Bound/ctx/2");
        assert_eq!(mock.construct(3), "Construct/none/3");
    }
}
