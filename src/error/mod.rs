//! Error definitions
//!
//! This module provides error types for mockkit.

use thiserror::Error;

/// Main error type for mockkit
///
/// `Clone` so error values can sit in behavior slots (e.g. as rejection
/// values) and still be handed out per invocation.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Verification failed
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Mock error
    #[error("Mock error: {0}")]
    Mock(String),
}

impl Error {
    /// Create an assertion failure.
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Create a mock error.
    #[must_use]
    pub fn mock(message: impl Into<String>) -> Self {
        Self::Mock(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
