// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The shared verdict-unwrapping stage of the filtering pipeline.
//!
//! Both evaluation strategies pair each element with the boolean its predicate
//! resolved to; this stage drops the elements whose verdict is `false` and
//! strips the verdict from the survivors. It is fully synchronous: any failure
//! has already terminated the stream upstream.

use futures::future::ready;
use futures::{Stream, StreamExt};
use sift_core::StreamItem;

/// A transient pairing of an element with its predicate verdict.
///
/// Created when a predicate's asynchronous result resolves and consumed
/// immediately by [`unwrap_verdicts`]; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateVerdict<T> {
    /// The element that was evaluated
    pub value: T,
    /// Whether the predicate resolved `true` for this element
    pub passed: bool,
}

impl<T> PredicateVerdict<T> {
    /// Pair an element with its verdict.
    pub const fn new(value: T, passed: bool) -> Self {
        Self { value, passed }
    }
}

/// Re-emits the elements of passing verdicts, dropping the rest.
///
/// Errors are passed through unchanged. This stage never suspends: each
/// decision is made with `future::ready`.
pub fn unwrap_verdicts<S, T>(stream: S) -> impl Stream<Item = StreamItem<T>>
where
    S: Stream<Item = StreamItem<PredicateVerdict<T>>>,
{
    stream.filter_map(|item| {
        ready(match item {
            StreamItem::Value(PredicateVerdict {
                value,
                passed: true,
            }) => Some(StreamItem::Value(value)),
            StreamItem::Value(_) => None,
            StreamItem::Error(e) => Some(StreamItem::Error(e)),
        })
    })
}
