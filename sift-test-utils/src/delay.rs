// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delayed-value helper for latency-simulating test predicates.

use std::time::Duration;

use tokio::time::sleep;

/// Resolves `value` after `ms` milliseconds.
///
/// The canonical collaborator for building test predicates that simulate
/// external latency; not part of the production surface.
///
/// # Example
///
/// ```rust
/// use sift_test_utils::delay;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let value = delay(5, 42).await;
/// assert_eq!(value, 42);
/// # }
/// ```
pub async fn delay<T>(ms: u64, value: T) -> T {
    sleep(Duration::from_millis(ms)).await;
    value
}
