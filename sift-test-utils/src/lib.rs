// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the sift filtering operators.
//!
//! This crate provides helper functions and instrumentation for testing
//! asynchronous predicate evaluation. It is designed for use in development
//! and testing only, not for production code.
//!
//! # Key pieces
//!
//! - [`delay`]: resolves a value after a given number of milliseconds; the
//!   standard way to build latency-simulating test predicates.
//! - [`test_channel`] / [`test_channel_with_errors`]: unbounded-channel
//!   sources yielding `StreamItem<T>`.
//! - [`ConcurrencyGauge`]: RAII-guarded active/peak counter for verifying
//!   concurrency bounds and cancellation release.
//! - [`ErrorInjectingStream`]: injects a `StreamItem::Error` at a chosen
//!   position to exercise error propagation.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod delay;
pub mod error_injection;
pub mod gauge;
pub mod helpers;

use sift_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use futures::{Stream, StreamExt};

// Re-export commonly used test utilities
pub use delay::delay;
pub use error_injection::ErrorInjectingStream;
pub use gauge::ConcurrencyGauge;
pub use helpers::{assert_no_element_emitted, collect_values, unwrap_value};

/// Creates a test channel that automatically wraps values in `StreamItem::Value`.
///
/// This helper simplifies test setup by handling the `StreamItem` wrapping
/// automatically, allowing tests to send plain values while the stream
/// receives `StreamItem<T>`.
///
/// # Example
///
/// ```rust
/// use sift_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, mut stream) = test_channel();
///
/// tx.send(42).unwrap();
///
/// let item = stream.next().await.unwrap(); // StreamItem<i32>
/// assert_eq!(item.unwrap(), 42);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` directly.
///
/// Allows tests to explicitly send both values and errors through the stream,
/// enabling error handling tests.
///
/// # Example
///
/// ```rust
/// use sift_test_utils::test_channel_with_errors;
/// use sift_core::{SiftError, StreamItem};
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, mut stream) = test_channel_with_errors();
///
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(SiftError::stream_error("test error"))).unwrap();
///
/// assert!(stream.next().await.unwrap().is_value());
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
