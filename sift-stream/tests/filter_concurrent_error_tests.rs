// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error propagation tests for the `filter_concurrent` operator.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};
use std::sync::Arc;

use futures::{stream, StreamExt};
use sift_core::{SiftError, StreamItem};
use sift_stream::FilterConcurrentExt;
use sift_test_utils::{delay, test_channel, unwrap_value, ConcurrencyGauge, ErrorInjectingStream};

#[tokio::test(start_paused = true)]
async fn test_filter_concurrent_failure_terminates() -> anyhow::Result<()> {
    // Arrange - element 3 fails fast while everything else is still evaluating
    let (tx, stream) = test_channel();
    let mut filtered = Box::pin(stream.filter_concurrent(None, |n: i32, _| async move {
        if n == 3 {
            delay(1, ()).await;
            Err(SiftError::predicate_error("cannot evaluate 3"))
        } else {
            Ok(delay(50, n % 2 == 0).await)
        }
    }));

    // Act
    for n in 1..=5 {
        tx.send(n)?;
    }
    drop(tx);

    // Assert - the error is the first and last emission
    let item = filtered.next().await.unwrap();
    assert!(matches!(item, StreamItem::Error(SiftError::PredicateError { .. })));
    assert!(filtered.next().await.is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_filter_concurrent_failure_discards_outstanding() -> anyhow::Result<()> {
    // Arrange
    let gauge = ConcurrencyGauge::new();
    let tracked = gauge.clone();

    let (tx, stream) = test_channel();
    let mut filtered = Box::pin(stream.filter_concurrent(None, move |n: i32, _| {
        let gauge = tracked.clone();
        async move {
            let _guard = gauge.enter();
            if n == 1 {
                delay(1, ()).await;
                Err(SiftError::predicate_error("boom"))
            } else {
                // These would all pass, but must never surface
                Ok(delay(50, true).await)
            }
        }
    }));

    // Act
    for n in 1..=5 {
        tx.send(n)?;
    }
    drop(tx);

    // Assert - error emitted, outstanding evaluations dropped, nothing after
    let item = filtered.next().await.unwrap();
    assert!(item.is_error());
    assert_eq!(gauge.active(), 0);
    assert!(filtered.next().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_filter_concurrent_no_new_evaluations_after_failure() -> anyhow::Result<()> {
    // Arrange - bound 1 holds later elements back while the first one fails
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);

    let (tx, stream) = test_channel();
    let mut filtered = Box::pin(stream.filter_concurrent(NonZeroUsize::new(1), move |_: i32, _| {
        counted.fetch_add(1, SeqCst);
        async move { Err(SiftError::predicate_error("always fails")) }
    }));

    // Act
    for n in 1..=5 {
        tx.send(n)?;
    }
    drop(tx);

    // Assert
    assert!(filtered.next().await.unwrap().is_error());
    assert!(filtered.next().await.is_none());
    assert_eq!(calls.load(SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_filter_concurrent_source_error_passthrough() -> anyhow::Result<()> {
    // Arrange - upstream injects an error between elements 1 and 2
    let source = ErrorInjectingStream::new(stream::iter(vec![1, 2, 3, 4]), 1);
    let mut filtered =
        Box::pin(source.filter_concurrent(NonZeroUsize::new(1), |n: i32, _| async move {
            Ok(n % 2 == 0)
        }));

    // Act & Assert - the injected error passes through unchanged and the
    // elements that did arrive are still evaluated
    let item = filtered.next().await.unwrap();
    assert!(matches!(item, StreamItem::Error(_)));

    assert_eq!(unwrap_value(filtered.next().await), 2);
    assert_eq!(unwrap_value(filtered.next().await), 4);
    assert!(filtered.next().await.is_none());
    Ok(())
}
