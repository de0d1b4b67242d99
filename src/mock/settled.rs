//! Already-settled asynchronous outcomes.
//!
//! `resolves`/`rejects` configuration never runs caller code: the settled
//! wrapper is built at configuration time and handed out as an ordinary
//! return value, so the ledger records `Return(wrapper)` at the synchronous
//! call boundary. Whether the wrapper fulfills or fails is observed later by
//! whoever awaits it.
//!
//! # Example
//!
//! ```rust
//! use mockkit::{assert_ready, MockFn, Settled};
//!
//! let mock: MockFn<(), Settled<i32, String>> = MockFn::new();
//! mock.resolves_once(7);
//!
//! let settled = mock.call(());
//! assert!(settled.is_fulfilled());
//! assert_eq!(assert_ready!(settled), Ok(7));
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An asynchronous result wrapper that is settled from the moment it is
/// created.
///
/// The wrapper is `Clone`, so the copy recorded in a mock's ledger can be
/// awaited just like the copy handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<T, E> {
    state: Option<Result<T, E>>,
}

impl<T, E> Settled<T, E> {
    /// Creates a wrapper that fulfills with `value`.
    #[must_use]
    pub fn fulfilled(value: T) -> Self {
        Self {
            state: Some(Ok(value)),
        }
    }

    /// Creates a wrapper that fails with `error`.
    #[must_use]
    pub fn failed(error: E) -> Self {
        Self {
            state: Some(Err(error)),
        }
    }

    /// Returns `true` if the wrapper will fulfill.
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self.state, Some(Ok(_)))
    }

    /// Returns `true` if the wrapper will fail.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.state, Some(Err(_)))
    }

    /// Reads the settled outcome without consuming it.
    ///
    /// Returns `None` once the wrapper has been awaited.
    #[must_use]
    pub fn peek(&self) -> Option<&Result<T, E>> {
        self.state.as_ref()
    }
}

/// An unconfigured async mock falls through to a wrapper already fulfilled
/// with the default value.
impl<T: Default, E> Default for Settled<T, E> {
    fn default() -> Self {
        Self::fulfilled(T::default())
    }
}

impl<T, E> Unpin for Settled<T, E> {}

impl<T, E> Future for Settled<T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.state.take() {
            Some(outcome) => Poll::Ready(outcome),
            None => panic!("polled after completion"),
        }
    }
}

/// The adapter seam between "resolved/rejected value" configuration and the
/// mock's return type.
///
/// `resolves{,_once}` and `rejects{,_once}` are available on any mock whose
/// return type implements this trait; they build the wrapper up front
/// without invoking any caller-supplied code.
pub trait AsyncOutcome: Sized {
    /// The value a fulfilled wrapper carries.
    type Fulfilled;
    /// The error a failed wrapper carries.
    type Failed;

    /// Builds an already-fulfilled wrapper.
    fn fulfilled(value: Self::Fulfilled) -> Self;

    /// Builds an already-failed wrapper.
    fn failed(error: Self::Failed) -> Self;
}

impl<T, E> AsyncOutcome for Settled<T, E> {
    type Fulfilled = T;
    type Failed = E;

    fn fulfilled(value: T) -> Self {
        Self::fulfilled(value)
    }

    fn failed(error: E) -> Self {
        Self::failed(error)
    }
}
