// Allow must_use_candidate for matcher factory functions since returning the matcher
// without using it is the common pattern for test setup
#![allow(clippy::must_use_candidate)]

//! Matchers over the mock ledger.
//!
//! This module provides a matcher system for mock verification:
//!
//! - [`Matcher`] trait for custom matchers
//! - Ledger matchers: [`called`], [`called_times`], [`called_with`],
//!   [`last_called_with`], [`nth_called_with`], [`returned`], [`threw`]
//! - [`assert_that!`] for panicking checks, [`verify`] for fallible ones
//!
//! All matchers are read-only consumers of the ledger: they inspect
//! recorded calls and outcomes, never the behavior queue.
//!
//! # Example
//!
//! ```rust
//! use mockkit::{assert_that, MockFn};
//! use mockkit::assertions::matcher::{called_times, called_with};
//!
//! let mock: MockFn<i32, i32> = MockFn::new();
//! mock.call(3);
//! mock.call(7);
//!
//! assert_that!(mock, called_times(2));
//! assert_that!(mock, called_with(7));
//! ```

use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::mock::MockFn;

/// A matcher for verifying values in tests.
///
/// # Implementing Custom Matchers
///
/// ```rust
/// use mockkit::assertions::matcher::Matcher;
/// use mockkit::MockFn;
///
/// struct CalledAtMost(usize);
///
/// impl<A: Clone + 'static, R: Clone + 'static, C: Clone + 'static>
///     Matcher<MockFn<A, R, C>> for CalledAtMost
/// {
///     fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
///         mock.call_count() <= self.0
///     }
///
///     fn describe(&self) -> String {
///         format!("was called at most {} times", self.0)
///     }
///
///     fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
///         format!("was called {} times", mock.call_count())
///     }
/// }
///
/// let mock: MockFn<i32, i32> = MockFn::new();
/// mock.call(1);
/// assert!(CalledAtMost(1).matches(&mock));
/// ```
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &T) -> String;
}

/// Check a value against a matcher, returning the mismatch as an error.
///
/// The non-panicking counterpart of [`assert_that!`].
///
/// # Errors
///
/// Returns [`Error::AssertionFailed`] with the matcher's mismatch
/// description when the value does not match.
///
/// # Example
///
/// ```rust
/// use mockkit::assertions::matcher::{called, verify};
/// use mockkit::MockFn;
///
/// let mock: MockFn<i32, i32> = MockFn::new();
/// assert!(verify(&mock, &called()).is_err());
///
/// mock.call(1);
/// assert!(verify(&mock, &called()).is_ok());
/// ```
pub fn verify<T, M: Matcher<T>>(value: &T, matcher: &M) -> Result<()> {
    if matcher.matches(value) {
        Ok(())
    } else {
        Err(Error::AssertionFailed(format!(
            "{} (expected: {})",
            matcher.describe_mismatch(value),
            matcher.describe()
        )))
    }
}

/// Assert that a value matches a matcher.
///
/// # Panics
///
/// Panics with a descriptive message if the value doesn't match.
///
/// # Example
///
/// ```rust
/// use mockkit::{assert_that, MockFn};
/// use mockkit::assertions::matcher::called;
///
/// let mock: MockFn<i32, i32> = MockFn::new();
/// mock.call(1);
/// assert_that!(mock, called());
/// ```
#[macro_export]
macro_rules! assert_that {
    ($value:expr, $matcher:expr) => {{
        fn __assert_that<T, M>(value: &T, matcher: &M)
        where
            T: ::core::fmt::Debug,
            M: $crate::assertions::matcher::Matcher<T>,
        {
            if !matcher.matches(value) {
                panic!(
                    "assertion failed: {}\n  expected: {}\n  got: {:?}",
                    matcher.describe_mismatch(value),
                    matcher.describe(),
                    value
                );
            }
        }
        __assert_that(&$value, &$matcher);
    }};
    ($value:expr, $matcher:expr, $($arg:tt)+) => {{
        fn __assert_that<T, M>(value: &T, matcher: &M, args: ::core::fmt::Arguments<'_>)
        where
            T: ::core::fmt::Debug,
            M: $crate::assertions::matcher::Matcher<T>,
        {
            if !matcher.matches(value) {
                panic!(
                    "assertion failed: {}\n  expected: {}\n  got: {:?}\n  message: {}",
                    matcher.describe_mismatch(value),
                    matcher.describe(),
                    value,
                    args
                );
            }
        }
        __assert_that(&$value, &$matcher, format_args!($($arg)+));
    }};
}

// =============================================================================
// Ledger matchers
// =============================================================================

/// Create a matcher that passes if the mock was invoked at least once.
pub fn called() -> Called {
    Called
}

/// Matcher for [`called`].
#[derive(Debug, Clone, Copy)]
pub struct Called;

impl<A, R, C> Matcher<MockFn<A, R, C>> for Called
where
    A: Clone + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
        mock.was_called()
    }

    fn describe(&self) -> String {
        "was called at least once".to_string()
    }

    fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
        format!("mock `{}` was never called", mock.name())
    }
}

/// Create a matcher that passes if the mock was invoked exactly `n` times.
pub fn called_times(n: usize) -> CalledTimes {
    CalledTimes { expected: n }
}

/// Matcher for [`called_times`].
#[derive(Debug, Clone, Copy)]
pub struct CalledTimes {
    expected: usize,
}

impl<A, R, C> Matcher<MockFn<A, R, C>> for CalledTimes
where
    A: Clone + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
        mock.call_count() == self.expected
    }

    fn describe(&self) -> String {
        format!("was called exactly {} times", self.expected)
    }

    fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
        format!(
            "mock `{}` was called {} times",
            mock.name(),
            mock.call_count()
        )
    }
}

/// Create a matcher that passes if any invocation used exactly these
/// arguments.
pub fn called_with<A>(args: A) -> CalledWith<A> {
    CalledWith { args }
}

/// Matcher for [`called_with`].
#[derive(Debug, Clone)]
pub struct CalledWith<A> {
    args: A,
}

impl<A, R, C> Matcher<MockFn<A, R, C>> for CalledWith<A>
where
    A: Clone + Debug + PartialEq + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
        mock.was_called_with(&self.args)
    }

    fn describe(&self) -> String {
        format!("was called with {:?}", self.args)
    }

    fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
        format!(
            "mock `{}` recorded calls {:?}",
            mock.name(),
            mock.calls()
        )
    }
}

/// Create a matcher that passes if the most recent invocation used exactly
/// these arguments.
pub fn last_called_with<A>(args: A) -> LastCalledWith<A> {
    LastCalledWith { args }
}

/// Matcher for [`last_called_with`].
#[derive(Debug, Clone)]
pub struct LastCalledWith<A> {
    args: A,
}

impl<A, R, C> Matcher<MockFn<A, R, C>> for LastCalledWith<A>
where
    A: Clone + Debug + PartialEq + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
        mock.last_call().as_ref() == Some(&self.args)
    }

    fn describe(&self) -> String {
        format!("was last called with {:?}", self.args)
    }

    fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
        format!(
            "mock `{}` was last called with {:?}",
            mock.name(),
            mock.last_call()
        )
    }
}

/// Create a matcher that passes if the nth invocation (0-indexed) used
/// exactly these arguments.
pub fn nth_called_with<A>(n: usize, args: A) -> NthCalledWith<A> {
    NthCalledWith { n, args }
}

/// Matcher for [`nth_called_with`].
#[derive(Debug, Clone)]
pub struct NthCalledWith<A> {
    n: usize,
    args: A,
}

impl<A, R, C> Matcher<MockFn<A, R, C>> for NthCalledWith<A>
where
    A: Clone + Debug + PartialEq + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
        mock.nth_call(self.n).as_ref() == Some(&self.args)
    }

    fn describe(&self) -> String {
        format!("call #{} used {:?}", self.n, self.args)
    }

    fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
        format!(
            "mock `{}` call #{} was {:?}",
            mock.name(),
            self.n,
            mock.nth_call(self.n)
        )
    }
}

/// Create a matcher that passes if any invocation completed with this
/// value.
pub fn returned<R>(value: R) -> Returned<R> {
    Returned { value }
}

/// Matcher for [`returned`].
#[derive(Debug, Clone)]
pub struct Returned<R> {
    value: R,
}

impl<A, R, C> Matcher<MockFn<A, R, C>> for Returned<R>
where
    A: Clone + 'static,
    R: Clone + Debug + PartialEq + 'static,
    C: Clone + 'static,
{
    fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
        mock.results()
            .iter()
            .any(|outcome| outcome.returned() == Some(&self.value))
    }

    fn describe(&self) -> String {
        format!("returned {:?}", self.value)
    }

    fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
        format!(
            "mock `{}` recorded outcomes {:?}",
            mock.name(),
            mock.results()
        )
    }
}

/// Create a matcher that passes if any invocation raised.
pub fn threw() -> Threw {
    Threw
}

/// Matcher for [`threw`].
#[derive(Debug, Clone, Copy)]
pub struct Threw;

impl<A, R, C> Matcher<MockFn<A, R, C>> for Threw
where
    A: Clone + 'static,
    R: Clone + 'static,
    C: Clone + 'static,
{
    fn matches(&self, mock: &MockFn<A, R, C>) -> bool {
        mock.results().iter().any(crate::mock::Outcome::is_throw)
    }

    fn describe(&self) -> String {
        "raised at least once".to_string()
    }

    fn describe_mismatch(&self, mock: &MockFn<A, R, C>) -> String {
        format!("mock `{}` never raised", mock.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_called_and_called_times() {
        let mock: MockFn<i32, i32> = MockFn::new();
        assert!(!called().matches(&mock));

        mock.call(1);
        mock.call(2);

        assert!(called().matches(&mock));
        assert!(called_times(2).matches(&mock));
        assert!(!called_times(3).matches(&mock));
    }

    #[test]
    fn test_called_with_matchers() {
        let mock: MockFn<&'static str, i32> = MockFn::new();
        mock.call("first");
        mock.call("second");

        assert!(called_with("first").matches(&mock));
        assert!(!called_with("third").matches(&mock));
        assert!(last_called_with("second").matches(&mock));
        assert!(nth_called_with(0, "first").matches(&mock));
        assert!(!nth_called_with(2, "first").matches(&mock));
    }

    #[test]
    fn test_returned_matcher() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.returns_once(5);
        mock.call(());
        mock.call(());

        assert!(returned(5).matches(&mock));
        assert!(returned(0).matches(&mock));
        assert!(!returned(9).matches(&mock));
    }

    #[test]
    fn test_threw_matcher() {
        let mock: MockFn<(), i32> = MockFn::new();
        mock.call(());
        assert!(!threw().matches(&mock));

        mock.invokes_once(|_| panic!("boom"));
        let _ = catch_unwind(AssertUnwindSafe(|| mock.call(())));
        assert!(threw().matches(&mock));
    }

    #[test]
    fn test_verify_reports_mismatch() {
        let mock: MockFn<i32, i32> = MockFn::new();
        mock.set_name("fetch");

        let err = verify(&mock, &called()).unwrap_err();
        assert!(err.to_string().contains("fetch"));

        mock.call(1);
        assert!(verify(&mock, &called()).is_ok());
    }

    #[test]
    fn test_assert_that_passes() {
        let mock: MockFn<i32, i32> = MockFn::new();
        mock.call(1);
        assert_that!(mock, called());
        assert_that!(mock, called_times(1), "exactly one warm-up call");
    }

    #[test]
    #[should_panic(expected = "was never called")]
    fn test_assert_that_panics_with_description() {
        let mock: MockFn<i32, i32> = MockFn::new();
        assert_that!(mock, called());
    }
}
