// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for error injection in streams.
//!
//! This module provides a stream wrapper that injects `StreamItem::Error`
//! values into streams for testing error propagation behavior in the
//! filtering operators.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use sift_core::{SiftError, StreamItem};

/// A stream wrapper that injects an error at a specified position.
///
/// Wraps a stream of plain values in `StreamItem::Value`, emitting a
/// `StreamItem::Error` at the given (0-indexed) position instead of pulling
/// from the source.
///
/// # Examples
///
/// ```rust
/// use sift_test_utils::ErrorInjectingStream;
/// use sift_core::StreamItem;
/// use futures::{stream, StreamExt};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut error_stream = ErrorInjectingStream::new(stream::iter(vec![1, 2]), 1);
///
/// assert!(matches!(error_stream.next().await.unwrap(), StreamItem::Value(1)));
/// assert!(matches!(error_stream.next().await.unwrap(), StreamItem::Error(_)));
/// assert!(matches!(error_stream.next().await.unwrap(), StreamItem::Value(2)));
/// # }
/// ```
pub struct ErrorInjectingStream<S> {
    inner: S,
    inject_error_at: Option<usize>,
    count: usize,
}

impl<S> ErrorInjectingStream<S> {
    /// Creates a new error-injecting stream wrapper.
    ///
    /// # Arguments
    ///
    /// * `inner` - The base stream to wrap
    /// * `inject_error_at` - The position (0-indexed) at which to inject an error
    pub const fn new(inner: S, inject_error_at: usize) -> Self {
        Self {
            inner,
            inject_error_at: Some(inject_error_at),
            count: 0,
        }
    }
}

impl<S, T> Stream for ErrorInjectingStream<S>
where
    S: Stream<Item = T> + Unpin,
    T: Unpin,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.inject_error_at == Some(this.count) {
            this.inject_error_at = None;
            this.count += 1;
            return Poll::Ready(Some(StreamItem::Error(SiftError::stream_error(format!(
                "injected error at position {}",
                this.count - 1
            )))));
        }

        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(value)) => {
                this.count += 1;
                Poll::Ready(Some(StreamItem::Value(value)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
