// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tests for the mode-dispatching `filter_async` entry point.

use std::num::NonZeroUsize;

use futures::{stream, StreamExt};
use sift_stream::{FilterAsyncExt, FilterMode};
use sift_test_utils::{
    assert_no_element_emitted, collect_values, delay, test_channel, ConcurrencyGauge,
};

#[tokio::test(start_paused = true)]
async fn test_filter_async_sequential_preserves_arrival_order() -> anyhow::Result<()> {
    // Arrange - later elements resolve faster, which would reorder a
    // completion-order strategy
    let (tx, stream) = test_channel();
    let filtered = stream.filter_async(FilterMode::sequential(), |n: u64, _| async move {
        Ok(delay(10 - n, n % 2 == 0).await)
    });

    // Act
    for n in 1..=9 {
        tx.send(n)?;
    }
    drop(tx);

    // Assert
    assert_eq!(collect_values(filtered).await, vec![2, 4, 6, 8]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_filter_async_concurrent_emits_in_completion_order() -> anyhow::Result<()> {
    // Arrange - delays arranged so completion order is the reverse of arrival
    let (tx, stream) = test_channel();
    let filtered = stream.filter_async(FilterMode::concurrent(), |n: u64, _| async move {
        Ok(delay((10 - n) * 10, n % 2 == 0).await)
    });

    // Act
    for n in 1..=9 {
        tx.send(n)?;
    }
    drop(tx);

    // Assert
    assert_eq!(collect_values(filtered).await, vec![8, 6, 4, 2]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_filter_async_bounded_respects_bound() -> anyhow::Result<()> {
    // Arrange
    let gauge = ConcurrencyGauge::new();
    let tracked = gauge.clone();

    let (tx, stream) = test_channel();
    let mode = FilterMode::bounded(NonZeroUsize::new(2).unwrap());
    let filtered = stream.filter_async(mode, move |n: u32, _| {
        let gauge = tracked.clone();
        async move {
            let _guard = gauge.enter();
            Ok(delay(10, n > 0).await)
        }
    });

    // Act
    for n in 1..=8 {
        tx.send(n)?;
    }
    drop(tx);
    let values = collect_values(filtered).await;

    // Assert
    assert_eq!(values.len(), 8);
    assert_eq!(gauge.peak(), 2);
    Ok(())
}

#[tokio::test]
async fn test_filter_mode_order_contract() {
    assert!(FilterMode::sequential().preserves_order());
    assert!(!FilterMode::concurrent().preserves_order());
    // Bound 1 serializes execution but keeps the completion-order contract
    assert!(!FilterMode::bounded(NonZeroUsize::new(1).unwrap()).preserves_order());
}

#[tokio::test]
async fn test_filter_mode_constructors() {
    assert_eq!(FilterMode::sequential(), FilterMode::Sequential);
    assert_eq!(FilterMode::concurrent(), FilterMode::Concurrent { bound: None });
    assert_eq!(
        FilterMode::bounded(NonZeroUsize::new(4).unwrap()),
        FilterMode::Concurrent {
            bound: NonZeroUsize::new(4)
        }
    );
}

#[tokio::test]
async fn test_filter_async_independent_applications() -> anyhow::Result<()> {
    // Arrange - two simultaneous pipelines built from the same mode; each
    // application carries its own bookkeeping
    let mode = FilterMode::sequential();
    let evens = stream::iter(1..=6)
        .map(sift_core::StreamItem::Value)
        .filter_async(mode, |n: i32, _| async move { Ok(n % 2 == 0) });
    let odds = stream::iter(1..=6)
        .map(sift_core::StreamItem::Value)
        .filter_async(mode, |n: i32, _| async move { Ok(n % 2 == 1) });

    // Act
    let (evens, odds) = tokio::join!(collect_values(evens), collect_values(odds));

    // Assert
    assert_eq!(evens, vec![2, 4, 6]);
    assert_eq!(odds, vec![1, 3, 5]);
    Ok(())
}

#[tokio::test]
async fn test_filter_async_dropped_pipeline_releases_work() -> anyhow::Result<()> {
    // Arrange - evaluations that never resolve on their own
    let gauge = ConcurrencyGauge::new();
    let tracked = gauge.clone();

    let (tx, stream) = test_channel();
    let mut filtered = stream.filter_async(FilterMode::concurrent(), move |n: u32, _| {
        let gauge = tracked.clone();
        async move {
            let _guard = gauge.enter();
            Ok(delay(60_000, n > 0).await)
        }
    });

    // Act
    for n in 1..=4 {
        tx.send(n)?;
    }
    assert_no_element_emitted(&mut filtered, 20).await;
    assert_eq!(gauge.active(), 4);
    drop(filtered);

    // Assert - dropping the pipeline drops every in-flight evaluation
    assert_eq!(gauge.active(), 0);
    Ok(())
}
