//! # mockkit
//!
//! > Mock and spy functions for Rust tests
//!
//! **mockkit** provides callable test doubles that record every invocation
//! in a ledger and substitute configured behavior for an original: one-shot
//! overrides, persistent overrides, spy delegation, and already-settled
//! async outcomes.
//!
//! ## Quick Start
//!
//! ```rust
//! use mockkit::prelude::*;
//!
//! let mock: MockFn<i32, i32> = MockFn::new();
//! mock.returns_once(10);
//! mock.invokes(|invocation| invocation.args * 2);
//!
//! assert_eq!(mock.call(3), 10); // one-shot first
//! assert_eq!(mock.call(3), 6);  // then the persistent implementation
//!
//! assert_eq!(mock.calls(), vec![3, 3]);
//! assert!(mock.was_called_times(2));
//! ```
//!
//! ## Features
//!
//! - 🪞 **Mock functions** - canned values, implementations, FIFO one-shots
//! - 🕵️ **Spies** - shadow an existing callable, record, then restore it
//! - 📒 **Invocation ledger** - arguments, outcomes, receivers, instances
//! - ⏳ **Settled futures** - resolved/rejected async outcomes, no executor
//! - 🧹 **Lifecycle registry** - clear/reset/restore every mock at once

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod error;
pub mod mock;

/// Prelude for convenient imports
///
/// ```rust
/// use mockkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::matcher::{
        called, called_times, called_with, last_called_with, nth_called_with, returned, threw,
        Matcher,
    };
    pub use crate::assertions::poll_once;
    pub use crate::error::{Error, Result};
    pub use crate::mock::{
        spy_on, AsyncOutcome, CallShape, CallSlot, Invocation, MockFn, MockId, MockRegistry,
        Outcome, Settled, ThrowPayload,
    };
}

// Re-exports
pub use error::{Error, Result};
pub use mock::{
    spy_on, AsyncOutcome, CallShape, CallSlot, Invocation, MockFn, MockId, MockRegistry, Outcome,
    Settled, ThrowPayload, DEFAULT_MOCK_NAME,
};
