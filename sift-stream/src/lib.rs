// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Asynchronous predicate filtering for streams.
//!
//! This crate provides a stream operator family that filters elements through
//! an **asynchronous** predicate: a function from `(element, index)` to a
//! future boolean. Two scheduling disciplines are available:
//!
//! - **[`filter_sequential`](FilterSequentialExt::filter_sequential)** — one
//!   predicate evaluation in flight at a time; emitted elements preserve
//!   arrival order. The single evaluation slot doubles as the backpressure
//!   mechanism when the source outpaces the predicate.
//! - **[`filter_concurrent`](FilterConcurrentExt::filter_concurrent)** — up to
//!   a configurable number of evaluations in flight (unbounded by default);
//!   verdicts surface in completion order, which is unspecified relative to
//!   arrival order.
//!
//! [`filter_async`](FilterAsyncExt::filter_async) dispatches between the two
//! via [`FilterMode`], and [`SiftStream`] offers all three as inherent methods.
//!
//! # Architecture
//!
//! Both strategies share a pipeline shape: an evaluation stage pairs each
//! element with the boolean its predicate resolved to
//! ([`PredicateVerdict`](verdict::PredicateVerdict)), and the synchronous
//! [`unwrap_verdicts`](verdict::unwrap_verdicts) stage drops failing elements
//! and strips the verdict from the survivors.
//!
//! ```text
//! source ──> { EvaluateSequential | EvaluateConcurrent } ──> unwrap_verdicts ──> consumer
//! ```
//!
//! # Error semantics
//!
//! Streams carry [`StreamItem`](sift_core::StreamItem)s. A failing predicate
//! terminates the derived stream with its error; under the concurrent strategy
//! every outstanding evaluation is discarded and nothing surfaces after the
//! terminal error. Errors already present on the source pass through
//! unchanged. The operators never wrap, translate or swallow an error.
//!
//! # Cancellation
//!
//! Dropping the derived stream drops the source and every in-flight predicate
//! future; no new evaluations start afterwards. The operators impose no
//! timeout of their own — wrap the predicate if bounded latency is required.
//!
//! # Example
//!
//! ```rust
//! use sift_stream::SiftStream;
//! use tokio::sync::mpsc;
//! use futures::StreamExt;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, rx) = mpsc::unbounded_channel();
//! let mut evens = Box::pin(
//!     SiftStream::from_unbounded_receiver(rx)
//!         .filter_sequential(|n: i64, _index| async move { Ok(n % 2 == 0) }),
//! );
//!
//! for n in 1..=4 {
//!     tx.send(n).unwrap();
//! }
//! drop(tx);
//!
//! assert_eq!(evens.next().await.unwrap().unwrap(), 2);
//! assert_eq!(evens.next().await.unwrap().unwrap(), 4);
//! assert!(evens.next().await.is_none());
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod filter_async;
pub mod filter_concurrent;
pub mod filter_sequential;
pub mod sift_stream;
pub mod verdict;

// Re-export commonly used types
pub use filter_async::{FilterAsyncExt, FilterMode};
pub use filter_concurrent::FilterConcurrentExt;
pub use filter_sequential::FilterSequentialExt;
pub use sift_core::{Result, SiftError, StreamItem};
pub use sift_stream::SiftStream;
pub use verdict::PredicateVerdict;
