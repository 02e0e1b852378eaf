// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the sift filtering operators.
//!
//! A predicate rejecting an element is reported through [`SiftError`] and
//! surfaces on the derived stream unchanged: the operators add no wrapping,
//! translation or swallowing of errors.
//!
//! # Examples
//!
//! ```
//! use sift_core::{Result, SiftError};
//!
//! fn evaluate() -> Result<bool> {
//!     Err(SiftError::predicate_error("backend unavailable"))
//! }
//! ```

/// Root error type for all sift operations.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    /// Stream processing encountered an error.
    ///
    /// General error for stream-level failures that don't originate in a
    /// predicate evaluation.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// A predicate evaluation failed.
    ///
    /// Emitted on the derived stream when the asynchronous predicate rejects
    /// for some element; the stream terminates with this error.
    #[error("Predicate error: {context}")]
    PredicateError {
        /// Description of why the predicate rejected
        context: String,
    },

    /// Custom error from user code.
    ///
    /// Wraps errors produced by user-provided predicates so they can be
    /// propagated through the stream without translation.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SiftError {
    /// Create a stream processing error with context.
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a predicate error with context.
    pub fn predicate_error(context: impl Into<String>) -> Self {
        Self::PredicateError {
            context: context.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error originated in a predicate evaluation.
    #[must_use]
    pub const fn is_predicate_error(&self) -> bool {
        matches!(self, Self::PredicateError { .. })
    }
}

/// Specialized Result type for sift operations.
///
/// # Examples
///
/// ```
/// use sift_core::Result;
///
/// fn check() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, SiftError>;

/// Extension trait for converting errors into [`SiftError`].
///
/// Automatically implemented for all `std::error::Error + Send + Sync + 'static`
/// types, so predicates can surface their own error types directly.
pub trait IntoSiftError {
    /// Convert this error into a `SiftError`.
    fn into_sift_error(self) -> SiftError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoSiftError for E {
    fn into_sift_error(self) -> SiftError {
        SiftError::user_error(self)
    }
}
