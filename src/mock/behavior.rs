//! Configured behavior storage and precedence resolution.
//!
//! All four configuration kinds share one tagged FIFO, so ordering across
//! mixed one-shot kinds is pure registration order. The persistent slot is a
//! single `Option`: setting any persistent kind replaces whatever was there
//! (last writer wins across kinds).

use std::collections::VecDeque;
use std::sync::Arc;

use super::mock_fn::Invocation;

/// A shared implementation body. Invoked with the captured invocation
/// (arguments, receiver, shape).
pub(crate) type ImplFn<A, R, C> = Arc<dyn Fn(&Invocation<A, C>) -> R + Send + Sync>;

/// One configured behavior, waiting in the one-shot queue or occupying the
/// persistent slot.
///
/// `Resolved` and `Rejected` hold the already-settled wrapper built at
/// configuration time; at resolution they are value-producing, exactly like
/// `ReturnValue`.
pub(crate) enum PendingBehavior<A, R, C> {
    Implementation(ImplFn<A, R, C>),
    ReturnValue(R),
    Resolved(R),
    Rejected(R),
}

impl<A, R, C> PendingBehavior<A, R, C> {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Implementation(_) => "implementation",
            Self::ReturnValue(_) => "return-value",
            Self::Resolved(_) => "resolved-value",
            Self::Rejected(_) => "rejected-value",
        }
    }
}

/// What the interceptor should do for one invocation.
pub(crate) enum Resolution<A, R, C> {
    /// Execute a callable body (a configured implementation or a spied
    /// original).
    Run(ImplFn<A, R, C>),
    /// Synthesize a return value; no body executes.
    Value(R),
    /// Nothing configured and no original to delegate to; the interceptor
    /// returns the absent-value sentinel.
    Fallthrough,
}

/// One-shot queue plus persistent slot for a single mock.
pub(crate) struct BehaviorQueue<A, R, C> {
    one_shot: VecDeque<PendingBehavior<A, R, C>>,
    persistent: Option<PendingBehavior<A, R, C>>,
}

impl<A, R, C> BehaviorQueue<A, R, C> {
    pub(crate) fn new() -> Self {
        Self {
            one_shot: VecDeque::new(),
            persistent: None,
        }
    }

    /// Appends a one-shot behavior. Consumed by exactly one future
    /// invocation, strictly FIFO.
    pub(crate) fn push_once(&mut self, behavior: PendingBehavior<A, R, C>) {
        self.one_shot.push_back(behavior);
    }

    /// Replaces the persistent slot wholesale.
    pub(crate) fn set_persistent(&mut self, behavior: PendingBehavior<A, R, C>) {
        self.persistent = Some(behavior);
    }

    /// Empties both the queue and the persistent slot (`reset`).
    pub(crate) fn clear(&mut self) {
        self.one_shot.clear();
        self.persistent = None;
    }

    pub(crate) fn one_shot_len(&self) -> usize {
        self.one_shot.len()
    }

    pub(crate) fn has_persistent(&self) -> bool {
        self.persistent.is_some()
    }
}

impl<A, R, C> BehaviorQueue<A, R, C>
where
    R: Clone,
{
    /// Resolves the behavior for one invocation, with fixed precedence:
    ///
    /// 1. head of the one-shot queue (dequeued permanently);
    /// 2. persistent implementation;
    /// 3. persistent value-producing kind;
    /// 4. the spied original, when one is bound (`delegate`);
    /// 5. fallthrough to the absent-value sentinel.
    pub(crate) fn resolve(&mut self, delegate: Option<ImplFn<A, R, C>>) -> Resolution<A, R, C> {
        if let Some(next) = self.one_shot.pop_front() {
            return Self::activate(next);
        }
        match &self.persistent {
            Some(PendingBehavior::Implementation(body)) => Resolution::Run(Arc::clone(body)),
            Some(
                PendingBehavior::ReturnValue(value)
                | PendingBehavior::Resolved(value)
                | PendingBehavior::Rejected(value),
            ) => Resolution::Value(value.clone()),
            None => match delegate {
                Some(original) => Resolution::Run(original),
                None => Resolution::Fallthrough,
            },
        }
    }

    fn activate(behavior: PendingBehavior<A, R, C>) -> Resolution<A, R, C> {
        match behavior {
            PendingBehavior::Implementation(body) => Resolution::Run(body),
            PendingBehavior::ReturnValue(value)
            | PendingBehavior::Resolved(value)
            | PendingBehavior::Rejected(value) => Resolution::Value(value),
        }
    }
}
