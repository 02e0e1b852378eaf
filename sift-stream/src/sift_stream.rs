// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use core::num::NonZeroUsize;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::{Stream, StreamExt};
use pin_project::pin_project;
use sift_core::{Result, StreamItem};

use crate::filter_async::{FilterAsyncExt, FilterMode};
use crate::filter_concurrent::FilterConcurrentExt;
use crate::filter_sequential::FilterSequentialExt;

/// A concrete wrapper type that provides the filtering operators as inherent
/// methods.
///
/// `SiftStream` wraps any stream of `StreamItem<T>` and allows chaining the
/// operators without importing the extension traits. Each method consumes the
/// wrapper, so every application owns its evaluation state; applying operators
/// to independent sources shares nothing.
#[pin_project]
pub struct SiftStream<S> {
    #[pin]
    inner: S,
}

impl<S> SiftStream<S> {
    /// Wrap a stream in a `SiftStream` wrapper.
    pub const fn new(stream: S) -> Self {
        Self { inner: stream }
    }

    /// Unwrap to get the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Creates a `SiftStream` from any existing stream.
    ///
    /// Alias for [`SiftStream::new`], sometimes more discoverable.
    pub fn from_stream(stream: S) -> Self {
        SiftStream::new(stream)
    }
}

// Separate impl for the constructor that changes the type parameter
impl SiftStream<()> {
    /// Creates a `SiftStream` from a tokio unbounded receiver.
    ///
    /// Received values are wrapped in `StreamItem::Value`; the stream ends
    /// when every sender is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sift_stream::SiftStream;
    /// use tokio::sync::mpsc;
    ///
    /// let (tx, rx) = mpsc::unbounded_channel::<i32>();
    /// let stream = SiftStream::from_unbounded_receiver(rx);
    /// ```
    pub fn from_unbounded_receiver<T: Send + 'static>(
        receiver: tokio::sync::mpsc::UnboundedReceiver<T>,
    ) -> SiftStream<impl Stream<Item = StreamItem<T>> + Send> {
        SiftStream::new(
            tokio_stream::wrappers::UnboundedReceiverStream::new(receiver).map(StreamItem::Value),
        )
    }
}

impl<S> Stream for SiftStream<S>
where
    S: Stream,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S, T> SiftStream<S>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
    /// Sequential asynchronous filtering; see
    /// [`FilterSequentialExt::filter_sequential`].
    pub fn filter_sequential<F, Fut>(
        self,
        predicate: F,
    ) -> SiftStream<impl Stream<Item = StreamItem<T>> + Send>
    where
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        SiftStream::new(self.into_inner().filter_sequential(predicate))
    }

    /// Concurrent asynchronous filtering; see
    /// [`FilterConcurrentExt::filter_concurrent`].
    pub fn filter_concurrent<F, Fut>(
        self,
        bound: Option<NonZeroUsize>,
        predicate: F,
    ) -> SiftStream<impl Stream<Item = StreamItem<T>> + Send>
    where
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        SiftStream::new(self.into_inner().filter_concurrent(bound, predicate))
    }

    /// Mode-dispatched asynchronous filtering; see
    /// [`FilterAsyncExt::filter_async`].
    pub fn filter_async<F, Fut>(
        self,
        mode: FilterMode,
        predicate: F,
    ) -> SiftStream<Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>>
    where
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        SiftStream::new(self.into_inner().filter_async(mode, predicate))
    }
}
