//! Assertions over mocks and settled futures.
//!
//! This module is a read-only consumer of the mock ledger:
//!
//! - [`matcher`] - [`Matcher`](matcher::Matcher) trait, ledger matchers,
//!   [`assert_that!`] and the fallible [`verify`](matcher::verify)
//! - [`poll_once`] - Poll a future once and return the result
//! - [`assert_ready!`] - Assert a future is immediately ready
//! - [`assert_pending!`] - Assert a future is not ready
//!
//! # Ledger matchers
//!
//! ```rust
//! use mockkit::{assert_that, MockFn};
//! use mockkit::assertions::matcher::{called_times, last_called_with};
//!
//! let mock: MockFn<i32, i32> = MockFn::new();
//! mock.call(1);
//! mock.call(2);
//!
//! assert_that!(mock, called_times(2));
//! assert_that!(mock, last_called_with(2));
//! ```
//!
//! # Settled futures
//!
//! ```rust
//! use mockkit::{assert_ready, MockFn, Settled};
//!
//! let mock: MockFn<(), Settled<i32, String>> = MockFn::new();
//! mock.resolves(1);
//!
//! assert_eq!(assert_ready!(mock.call(())), Ok(1));
//! ```

mod future;
pub mod matcher;

pub use future::poll_once;
