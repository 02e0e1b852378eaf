// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Instrumentation for counting outstanding predicate evaluations.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering::SeqCst};
use std::sync::Arc;

/// Tracks how many instrumented evaluations are outstanding and the peak
/// reached over the gauge's lifetime.
///
/// Wrap a predicate's future with [`ConcurrencyGauge::track`]; the counter is
/// incremented on entry and decremented when the future completes **or is
/// dropped**, so cancelled evaluations release their slot observably.
///
/// # Example
///
/// ```rust
/// use sift_test_utils::{delay, ConcurrencyGauge};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let gauge = ConcurrencyGauge::new();
/// gauge.track(delay(1, ())).await;
/// assert_eq!(gauge.active(), 0);
/// assert_eq!(gauge.peak(), 1);
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ConcurrencyGauge {
    inner: Arc<GaugeInner>,
}

#[derive(Default)]
struct GaugeInner {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    /// Creates a gauge with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `future` with the active counter held for its entire lifetime.
    pub async fn track<F: Future>(&self, future: F) -> F::Output {
        let _guard = self.enter();
        future.await
    }

    /// Increments the active counter, returning a guard that decrements it on
    /// drop.
    pub fn enter(&self) -> GaugeGuard {
        let active = self.inner.active.fetch_add(1, SeqCst) + 1;
        self.inner.peak.fetch_max(active, SeqCst);
        GaugeGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of instrumented evaluations currently outstanding.
    pub fn active(&self) -> usize {
        self.inner.active.load(SeqCst)
    }

    /// Highest number of simultaneously outstanding evaluations observed.
    pub fn peak(&self) -> usize {
        self.inner.peak.load(SeqCst)
    }
}

/// RAII guard produced by [`ConcurrencyGauge::enter`].
pub struct GaugeGuard {
    inner: Arc<GaugeInner>,
}

impl Drop for GaugeGuard {
    fn drop(&mut self) {
        self.inner.active.fetch_sub(1, SeqCst);
    }
}
