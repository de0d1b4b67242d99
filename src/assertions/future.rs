//! Single-poll observation of futures.
//!
//! Settled wrappers produced by async mock configuration are ready on their
//! first poll; these helpers let tests observe that without an executor:
//!
//! - [`poll_once`] - Poll a future once and return the result
//! - [`assert_ready!`] - Assert a future is immediately ready
//! - [`assert_pending!`] - Assert a future is not ready
//!
//! # Example
//!
//! ```rust
//! use mockkit::{assert_ready, MockFn, Settled};
//!
//! let mock: MockFn<(), Settled<i32, String>> = MockFn::new();
//! mock.resolves(42);
//!
//! assert_eq!(assert_ready!(mock.call(())), Ok(42));
//! ```

use std::future::Future;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

/// Poll a future once and return the result.
///
/// This is useful for testing futures without an executor.
///
/// # Example
///
/// ```rust
/// use mockkit::assertions::poll_once;
/// use std::task::Poll;
///
/// let ready = async { 42 };
/// let result = poll_once(ready);
/// assert_eq!(result, Poll::Ready(42));
/// ```
pub fn poll_once<F: Future>(future: F) -> Poll<F::Output> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    let mut pinned = Box::pin(future);
    pinned.as_mut().poll(&mut cx)
}

/// Assert that a future is immediately ready, returning its output.
///
/// # Panics
///
/// Panics if the future returns `Poll::Pending`.
///
/// # Example
///
/// ```rust
/// use mockkit::assert_ready;
///
/// let ready = async { 42 };
/// let value = assert_ready!(ready);
/// assert_eq!(value, 42);
/// ```
#[macro_export]
macro_rules! assert_ready {
    ($future:expr) => {{
        match $crate::assertions::poll_once($future) {
            ::std::task::Poll::Ready(value) => value,
            ::std::task::Poll::Pending => {
                panic!("assertion failed: expected future to be Ready, but it was Pending");
            }
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        match $crate::assertions::poll_once($future) {
            ::std::task::Poll::Ready(value) => value,
            ::std::task::Poll::Pending => {
                panic!("assertion failed: expected future to be Ready, but it was Pending: {}", format_args!($($arg)+));
            }
        }
    }};
}

/// Assert that a future is pending (not ready).
///
/// # Panics
///
/// Panics if the future returns `Poll::Ready`.
///
/// # Example
///
/// ```rust
/// use mockkit::assert_pending;
///
/// let pending = std::future::pending::<i32>();
/// assert_pending!(pending);
/// ```
#[macro_export]
macro_rules! assert_pending {
    ($future:expr) => {{
        match $crate::assertions::poll_once($future) {
            ::std::task::Poll::Pending => {}
            ::std::task::Poll::Ready(value) => {
                panic!(
                    "assertion failed: expected future to be Pending, but it was Ready({:?})",
                    value
                );
            }
        }
    }};
    ($future:expr, $($arg:tt)+) => {{
        match $crate::assertions::poll_once($future) {
            ::std::task::Poll::Pending => {}
            ::std::task::Poll::Ready(value) => {
                panic!(
                    "assertion failed: expected future to be Pending, but it was Ready({:?}): {}",
                    value,
                    format_args!($($arg)+)
                );
            }
        }
    }};
}

// Create a no-op waker for polling futures
fn noop_waker() -> Waker {
    const VTABLE: RawWakerVTable = RawWakerVTable::new(
        |_| RawWaker::new(std::ptr::null(), &VTABLE),
        |_| {},
        |_| {},
        |_| {},
    );

    unsafe { Waker::from_raw(RawWaker::new(std::ptr::null(), &VTABLE)) }
}
