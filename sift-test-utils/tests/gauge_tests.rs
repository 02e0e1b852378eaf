use sift_test_utils::{delay, ConcurrencyGauge};

#[tokio::test]
async fn test_gauge_starts_at_zero() {
    let gauge = ConcurrencyGauge::new();
    assert_eq!(gauge.active(), 0);
    assert_eq!(gauge.peak(), 0);
}

#[tokio::test]
async fn test_gauge_counts_nested_guards() {
    let gauge = ConcurrencyGauge::new();

    let outer = gauge.enter();
    assert_eq!(gauge.active(), 1);

    let inner = gauge.enter();
    assert_eq!(gauge.active(), 2);
    assert_eq!(gauge.peak(), 2);

    drop(inner);
    assert_eq!(gauge.active(), 1);

    drop(outer);
    assert_eq!(gauge.active(), 0);

    // Peak is monotone, it survives the guards
    assert_eq!(gauge.peak(), 2);
}

#[tokio::test]
async fn test_gauge_track_releases_on_completion() {
    let gauge = ConcurrencyGauge::new();

    let value = gauge.track(delay(1, 42)).await;

    assert_eq!(value, 42);
    assert_eq!(gauge.active(), 0);
    assert_eq!(gauge.peak(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_gauge_releases_on_cancellation() {
    let gauge = ConcurrencyGauge::new();
    let tracked = gauge.clone();

    // A tracked future that never completes on its own
    let handle = tokio::spawn(async move { tracked.track(delay(60_000, ())).await });
    tokio::task::yield_now().await;
    assert_eq!(gauge.active(), 1);

    // Act - abort while the evaluation is in flight
    handle.abort();
    let _ = handle.await;

    // Assert - the dropped future released its slot
    assert_eq!(gauge.active(), 0);
    assert_eq!(gauge.peak(), 1);
}

#[tokio::test]
async fn test_gauge_clones_share_counters() {
    let gauge = ConcurrencyGauge::new();
    let clone = gauge.clone();

    let _guard = clone.enter();
    assert_eq!(gauge.active(), 1);
    assert_eq!(gauge.peak(), 1);
}
