// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Mode-selecting entry point over the two filtering strategies.

use core::future::Future;
use core::num::NonZeroUsize;
use core::pin::Pin;

use futures::Stream;
use sift_core::{Result, StreamItem};

use crate::filter_concurrent::FilterConcurrentExt;
use crate::filter_sequential::FilterSequentialExt;

/// Scheduling discipline for asynchronous predicate evaluation.
///
/// Immutable for the lifetime of one operator application; every application
/// gets its own in-flight bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// One evaluation at a time, arrival order preserved.
    Sequential,
    /// Overlapping evaluations, completion order, optionally bounded.
    Concurrent {
        /// Maximum number of outstanding evaluations; `None` is unbounded.
        bound: Option<NonZeroUsize>,
    },
}

impl FilterMode {
    /// Sequential evaluation, arrival order preserved.
    pub const fn sequential() -> Self {
        Self::Sequential
    }

    /// Unbounded concurrent evaluation.
    pub const fn concurrent() -> Self {
        Self::Concurrent { bound: None }
    }

    /// Concurrent evaluation with at most `bound` evaluations outstanding.
    pub const fn bounded(bound: NonZeroUsize) -> Self {
        Self::Concurrent { bound: Some(bound) }
    }

    /// Whether this mode guarantees that output order matches arrival order.
    ///
    /// Note that `Concurrent` with a bound of 1 still answers `false`: it
    /// serializes *execution* but the emission order remains a
    /// completion-order contract.
    pub const fn preserves_order(&self) -> bool {
        matches!(self, Self::Sequential)
    }
}

/// Extension trait providing the mode-dispatching `filter_async` operator.
pub trait FilterAsyncExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + Send + 'static,
{
    /// Filters items through an asynchronous predicate under the given mode.
    ///
    /// Dispatches to [`filter_sequential`](FilterSequentialExt::filter_sequential)
    /// or [`filter_concurrent`](FilterConcurrentExt::filter_concurrent) and
    /// boxes the result so both arms unify in a single return type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sift_stream::{FilterAsyncExt, FilterMode};
    /// use sift_test_utils::test_channel;
    /// use futures::StreamExt;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let (tx, stream) = test_channel();
    /// let mut odds = stream.filter_async(FilterMode::sequential(), |n: u32, _| async move {
    ///     Ok(n % 2 == 1)
    /// });
    ///
    /// tx.send(1).unwrap();
    /// tx.send(2).unwrap();
    /// drop(tx);
    ///
    /// assert_eq!(odds.next().await.unwrap().unwrap(), 1);
    /// assert!(odds.next().await.is_none());
    /// # }
    /// ```
    fn filter_async<F, Fut>(
        self,
        mode: FilterMode,
        predicate: F,
    ) -> Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>
    where
        Self: Send + 'static,
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static;
}

impl<S, T> FilterAsyncExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone + Send + 'static,
{
    fn filter_async<F, Fut>(
        self,
        mode: FilterMode,
        predicate: F,
    ) -> Pin<Box<dyn Stream<Item = StreamItem<T>> + Send>>
    where
        Self: Send + 'static,
        F: FnMut(T, usize) -> Fut + Send + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        match mode {
            FilterMode::Sequential => Box::pin(self.filter_sequential(predicate)),
            FilterMode::Concurrent { bound } => Box::pin(self.filter_concurrent(bound, predicate)),
        }
    }
}
