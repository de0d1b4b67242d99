//! The mock/spy function runtime.
//!
//! This module provides the core test doubles:
//!
//! - [`MockFn`] - a callable proxy recording every invocation in a ledger
//! - [`CallSlot`] / [`spy_on`] - spying on an existing callable, with restore
//! - [`Settled`] - already-settled asynchronous outcomes for async mocks
//! - [`MockRegistry`] - bulk clear/reset/restore across live mocks
//!
//! # Mock functions
//!
//! ```rust
//! use mockkit::MockFn;
//!
//! let mock: MockFn<i32, i32> = MockFn::new();
//! mock.returns_once(10).returns(1);
//!
//! assert_eq!(mock.call(5), 10);
//! assert_eq!(mock.call(6), 1);
//! assert_eq!(mock.calls(), vec![5, 6]);
//! ```
//!
//! # Spies
//!
//! ```rust
//! use mockkit::{spy_on, CallSlot};
//!
//! let slot: CallSlot<i32, i32> = CallSlot::new(|invocation| invocation.args + 1);
//! let spy = spy_on(&slot);
//!
//! assert_eq!(slot.invoke(1), 2);
//! assert!(spy.was_called());
//! spy.restore();
//! ```

mod behavior;
mod ledger;
mod mock_fn;
mod registry;
mod settled;
mod slot;

pub use ledger::{Outcome, ThrowPayload};
pub use mock_fn::{CallShape, Invocation, MockFn, MockId, DEFAULT_MOCK_NAME};
pub use registry::MockRegistry;
pub use settled::{AsyncOutcome, Settled};
pub use slot::{spy_on, CallSlot};
