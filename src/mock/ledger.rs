//! The per-mock invocation ledger.
//!
//! Every invocation of a mock reserves a ledger slot *before* any behavior
//! executes and finalizes it in place afterwards. Code running inside an
//! implementation body can therefore inspect the ledger mid-invocation and
//! observe its own slot as [`Outcome::Incomplete`] — a defined, valid state.

use std::any::Any;
use std::fmt;

/// A short, comparable summary of a panic payload raised by a mock
/// implementation.
///
/// The original boxed payload is always re-raised to the caller intact; the
/// ledger keeps this summary because `Box<dyn Any>` is neither cloneable nor
/// comparable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrowPayload {
    message: String,
}

impl ThrowPayload {
    /// Creates a payload with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the captured message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Summarizes a caught panic payload. String payloads keep their
    /// message; anything else gets a fixed placeholder.
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&'static str>() {
            Self::new(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::new(message.clone())
        } else {
            Self::new("<opaque panic payload>")
        }
    }
}

impl fmt::Display for ThrowPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panic: {}", self.message)
    }
}

/// The recorded effect of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<R> {
    /// The invocation completed and produced a value.
    Return(R),
    /// The invocation raised; the same payload was re-raised to the caller.
    Throw(ThrowPayload),
    /// The invocation has a reserved slot but has not finished yet.
    Incomplete,
}

impl<R> Outcome<R> {
    /// Returns `true` for a completed invocation.
    #[must_use]
    pub fn is_return(&self) -> bool {
        matches!(self, Self::Return(_))
    }

    /// Returns `true` for an invocation that raised.
    #[must_use]
    pub fn is_throw(&self) -> bool {
        matches!(self, Self::Throw(_))
    }

    /// Returns `true` for a reserved-but-unfinished invocation.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }

    /// Returns the produced value, if the invocation completed.
    #[must_use]
    pub fn returned(&self) -> Option<&R> {
        match self {
            Self::Return(value) => Some(value),
            _ => None,
        }
    }
}

/// Identifies a reserved ledger slot. Each handle is finalized exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CallHandle {
    index: usize,
}

/// The four record sequences of one mock.
///
/// `calls`, `results`, and `contexts` are index-aligned; `instances` grows
/// only for construct-shaped invocations. All four are append-only except
/// for full truncation.
pub(crate) struct Ledger<A, R, C> {
    calls: Vec<A>,
    results: Vec<Outcome<R>>,
    contexts: Vec<Option<C>>,
    instances: Vec<R>,
}

impl<A, R, C> Ledger<A, R, C> {
    pub(crate) fn new() -> Self {
        Self {
            calls: Vec::new(),
            results: Vec::new(),
            contexts: Vec::new(),
            instances: Vec::new(),
        }
    }

    /// Reserves a slot for an invocation that is about to execute.
    ///
    /// Appends to `calls`, `contexts`, and `results` (as `Incomplete`) in
    /// lockstep, keeping the three sequences the same length.
    pub(crate) fn reserve(&mut self, args: A, receiver: Option<C>) -> CallHandle {
        let index = self.calls.len();
        self.calls.push(args);
        self.contexts.push(receiver);
        self.results.push(Outcome::Incomplete);
        CallHandle { index }
    }

    /// Overwrites the reserved slot in place. Paired with exactly one
    /// `reserve`; slots are never appended after the fact.
    pub(crate) fn finalize(&mut self, handle: CallHandle, outcome: Outcome<R>) {
        self.results[handle.index] = outcome;
    }

    /// Records the instance produced by a construct-shaped invocation.
    pub(crate) fn record_instance(&mut self, instance: R) {
        self.instances.push(instance);
    }

    /// Empties all four sequences.
    pub(crate) fn truncate(&mut self) {
        self.calls.clear();
        self.results.clear();
        self.contexts.clear();
        self.instances.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.calls.len()
    }

    pub(crate) fn calls(&self) -> &[A] {
        &self.calls
    }

    pub(crate) fn results(&self) -> &[Outcome<R>] {
        &self.results
    }

    pub(crate) fn contexts(&self) -> &[Option<C>] {
        &self.contexts
    }

    pub(crate) fn instances(&self) -> &[R] {
        &self.instances
    }

    pub(crate) fn last_call(&self) -> Option<&A> {
        self.calls.last()
    }
}
