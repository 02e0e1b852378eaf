// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use futures::stream::StreamExt;
use futures::Stream;
use sift_core::StreamItem;
use tokio::time::sleep;

/// Asserts that the stream emits nothing within `timeout_ms` milliseconds.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected element emitted, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Unwraps an `Option<StreamItem<T>>` into its value.
///
/// # Panics
///
/// Panics if the stream ended or the item is an error.
pub fn unwrap_value<T>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(v)) => v,
        Some(StreamItem::Error(e)) => panic!("expected value, got error: {e:?}"),
        None => panic!("expected value, stream ended"),
    }
}

/// Drains the stream to completion, collecting every `StreamItem::Value`.
///
/// # Panics
///
/// Panics if the stream emits an error.
pub async fn collect_values<S, T>(stream: S) -> Vec<T>
where
    S: Stream<Item = StreamItem<T>>,
{
    stream
        .map(|item| match item {
            StreamItem::Value(v) => v,
            StreamItem::Error(e) => panic!("unexpected error in stream: {e:?}"),
        })
        .collect()
        .await
}
