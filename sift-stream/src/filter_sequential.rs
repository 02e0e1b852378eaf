// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential asynchronous filtering: one predicate evaluation in flight at a
//! time, arrival order strictly preserved.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::Stream;
use pin_project::pin_project;
use sift_core::{Result, StreamItem};

use crate::verdict::{unwrap_verdicts, PredicateVerdict};

/// Extension trait providing the `filter_sequential` operator for streams.
///
/// This trait allows any stream of `StreamItem<T>` to filter items through an
/// asynchronous predicate while preserving arrival order.
pub trait FilterSequentialExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + Send + 'static,
{
    /// Filters items through an asynchronous predicate, one element at a time.
    ///
    /// The predicate for element *i* starts only after the verdict for element
    /// *i-1* has been produced, so emitted elements always appear in arrival
    /// order regardless of per-element latency. While an evaluation is in
    /// flight the source is not polled; a source that outpaces the predicate
    /// queues behind this single slot with no explicit buffer.
    ///
    /// # Behavior
    ///
    /// - Predicate receives the element (by clone) and its zero-based arrival index
    /// - Elements whose predicate resolves `false` are dropped
    /// - Arrival order is preserved for every emitted element
    /// - An empty source yields an empty stream with zero predicate invocations
    ///
    /// # Arguments
    ///
    /// * `predicate` - An async function from `(T, usize)` to `Result<bool>`;
    ///   `Ok(true)` keeps the element
    ///
    /// # Returns
    ///
    /// A stream of `StreamItem<T>` containing only elements that passed the filter
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sift_stream::FilterSequentialExt;
    /// use sift_test_utils::test_channel;
    /// use futures::StreamExt;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let (tx, stream) = test_channel();
    /// let mut evens =
    ///     Box::pin(stream.filter_sequential(|n: i32, _index| async move { Ok(n % 2 == 0) }));
    ///
    /// tx.send(1).unwrap();
    /// tx.send(2).unwrap();
    /// tx.send(3).unwrap();
    /// tx.send(4).unwrap();
    /// drop(tx);
    ///
    /// assert_eq!(evens.next().await.unwrap().unwrap(), 2);
    /// assert_eq!(evens.next().await.unwrap().unwrap(), 4);
    /// assert!(evens.next().await.is_none());
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// If a predicate evaluation fails, the stream emits that error once and
    /// terminates; no further elements are evaluated. Errors arriving from the
    /// source are passed through unchanged without a predicate invocation.
    ///
    /// # See Also
    ///
    /// - [`FilterConcurrentExt::filter_concurrent`](crate::FilterConcurrentExt::filter_concurrent) - Overlapping evaluations, completion order
    /// - [`FilterAsyncExt::filter_async`](crate::FilterAsyncExt::filter_async) - Mode-selecting dispatcher
    fn filter_sequential<F, Fut>(self, predicate: F) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static;
}

impl<S, T> FilterSequentialExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone + Send + 'static,
{
    fn filter_sequential<F, Fut>(self, predicate: F) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        unwrap_verdicts(EvaluateSequential {
            stream: self,
            predicate,
            in_flight: None,
            pending: None,
            index: 0,
            failed: false,
        })
    }
}

/// Evaluation stage of the sequential strategy.
///
/// Holds at most one predicate future. The upstream is never polled while an
/// evaluation is in flight, which is the only backpressure mechanism needed.
#[pin_project]
struct EvaluateSequential<S, F, Fut, T> {
    #[pin]
    stream: S,
    predicate: F,
    #[pin]
    in_flight: Option<Fut>,
    pending: Option<T>,
    index: usize,
    failed: bool,
}

impl<S, F, Fut, T> Stream for EvaluateSequential<S, F, Fut, T>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T, usize) -> Fut,
    Fut: Future<Output = Result<bool>>,
    T: Clone,
{
    type Item = StreamItem<PredicateVerdict<T>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            let mut this = self.as_mut().project();

            if *this.failed {
                return Poll::Ready(None);
            }

            // Finish the outstanding evaluation before touching the source.
            if let Some(future) = this.in_flight.as_mut().as_pin_mut() {
                match future.poll(cx) {
                    Poll::Ready(Ok(passed)) => {
                        this.in_flight.set(None);
                        let Some(value) = this.pending.take() else {
                            unreachable!("evaluation completed without a pending element")
                        };
                        return Poll::Ready(Some(StreamItem::Value(PredicateVerdict::new(
                            value, passed,
                        ))));
                    }
                    Poll::Ready(Err(e)) => {
                        this.in_flight.set(None);
                        this.pending.take();
                        *this.failed = true;
                        return Poll::Ready(Some(StreamItem::Error(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            match this.stream.poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    let future = (this.predicate)(value.clone(), *this.index);
                    *this.index += 1;
                    *this.pending = Some(value);
                    this.in_flight.set(Some(future));
                    // Loop around to poll the fresh evaluation.
                }
                Poll::Ready(Some(StreamItem::Error(e))) => {
                    return Poll::Ready(Some(StreamItem::Error(e)));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
