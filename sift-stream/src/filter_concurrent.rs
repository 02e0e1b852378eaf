// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent asynchronous filtering: up to a configurable number of predicate
//! evaluations in flight, verdicts emitted in completion order.

use core::future::Future;
use core::num::NonZeroUsize;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use sift_core::{Result, StreamItem};

use crate::verdict::{unwrap_verdicts, PredicateVerdict};

type VerdictFuture<T> = Pin<Box<dyn Future<Output = Result<PredicateVerdict<T>>> + Send>>;

/// Extension trait providing the `filter_concurrent` operator for streams.
///
/// This trait allows any stream of `StreamItem<T>` to filter items through an
/// asynchronous predicate with overlapping evaluations.
pub trait FilterConcurrentExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + Send + 'static,
{
    /// Filters items through an asynchronous predicate with overlapping evaluations.
    ///
    /// Each arriving element starts its evaluation immediately, subject to the
    /// concurrency bound: once `bound` evaluations are outstanding, the source
    /// is not polled again until a verdict frees a slot. Verdicts surface in
    /// the order their evaluations complete.
    ///
    /// # Behavior
    ///
    /// - `bound = None` (the default mode) starts every evaluation on arrival
    /// - At most `bound` evaluations are outstanding at any instant
    /// - Emission order is completion order; it is **not** the arrival order,
    ///   and is unspecified even for `bound = 1` — callers needing arrival
    ///   order must use [`FilterSequentialExt::filter_sequential`](crate::FilterSequentialExt::filter_sequential)
    /// - After the source ends, remaining in-flight evaluations drain before
    ///   the stream completes
    ///
    /// # Arguments
    ///
    /// * `bound` - Maximum number of outstanding evaluations, `None` for unbounded
    /// * `predicate` - An async function from `(T, usize)` to `Result<bool>`;
    ///   `Ok(true)` keeps the element
    ///
    /// # Errors
    ///
    /// If any evaluation fails, the stream emits that error once and
    /// terminates; every outstanding evaluation is discarded and nothing
    /// surfaces after the error. Errors arriving from the source are passed
    /// through unchanged and do not consume an evaluation slot.
    fn filter_concurrent<F, Fut>(
        self,
        bound: Option<NonZeroUsize>,
        predicate: F,
    ) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static;
}

impl<S, T> FilterConcurrentExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone + Send + 'static,
{
    fn filter_concurrent<F, Fut>(
        self,
        bound: Option<NonZeroUsize>,
        predicate: F,
    ) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        unwrap_verdicts(EvaluateConcurrent {
            stream: self,
            predicate,
            in_flight: FuturesUnordered::new(),
            bound,
            index: 0,
            upstream_done: false,
            failed: false,
        })
    }
}

/// Evaluation stage of the concurrent strategy.
///
/// The in-flight set is the single piece of shared bookkeeping: its length is
/// the outstanding-evaluation counter that gates admission of new elements.
#[pin_project]
struct EvaluateConcurrent<S, F, T> {
    #[pin]
    stream: S,
    predicate: F,
    in_flight: FuturesUnordered<VerdictFuture<T>>,
    bound: Option<NonZeroUsize>,
    index: usize,
    upstream_done: bool,
    failed: bool,
}

impl<S, F, Fut, T> Stream for EvaluateConcurrent<S, F, T>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T, usize) -> Fut,
    Fut: Future<Output = Result<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    type Item = StreamItem<PredicateVerdict<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.failed {
            return Poll::Ready(None);
        }

        // 1. Admit source elements while an evaluation slot is free.
        if !*this.upstream_done {
            loop {
                if let Some(bound) = this.bound {
                    if this.in_flight.len() >= bound.get() {
                        break;
                    }
                }
                match this.stream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        let future = (this.predicate)(value.clone(), *this.index);
                        *this.index += 1;
                        this.in_flight.push(Box::pin(async move {
                            future.await.map(|passed| PredicateVerdict::new(value, passed))
                        }));
                    }
                    Poll::Ready(Some(StreamItem::Error(e))) => {
                        // Source failures pass through without consuming a slot.
                        return Poll::Ready(Some(StreamItem::Error(e)));
                    }
                    Poll::Ready(None) => {
                        *this.upstream_done = true;
                        break;
                    }
                    Poll::Pending => break,
                }
            }
        }

        // 2. Surface verdicts in completion order.
        match this.in_flight.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(verdict))) => Poll::Ready(Some(StreamItem::Value(verdict))),
            Poll::Ready(Some(Err(e))) => {
                *this.failed = true;
                if !this.in_flight.is_empty() {
                    crate::warn!(
                        "filter_concurrent: discarding {} outstanding evaluations after a predicate failure",
                        this.in_flight.len()
                    );
                    this.in_flight.clear();
                }
                Poll::Ready(Some(StreamItem::Error(e)))
            }
            Poll::Ready(None) => {
                if *this.upstream_done {
                    Poll::Ready(None)
                } else {
                    Poll::Pending
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
