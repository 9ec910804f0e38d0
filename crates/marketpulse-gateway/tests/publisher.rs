//! Publisher lifecycle against the manual and interval clocks.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use marketpulse_core::metrics::{MetricsSnapshot, MetricsStore, RandomSource, StdRandom};
use marketpulse_gateway::realtime::{IntervalClock, ManualClock, Publisher, PublisherState};

struct MaxDraw;

impl RandomSource for MaxDraw {
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64 {
        *range.end()
    }
}

const PERIOD: Duration = Duration::from_millis(2000);

fn manual_publisher() -> (Publisher, ManualClock) {
    let store = Arc::new(MetricsStore::with_defaults(Box::new(MaxDraw)));
    let clock = ManualClock::new();
    let publisher = Publisher::with_clock(store, Arc::new(clock.clone()));
    (publisher, clock)
}

/// Wait until the store has applied `n` ticks in total.
async fn wait_for_ticks(publisher: &Publisher, n: u64) {
    let mut rx = publisher.subscribe();
    while publisher.store().ticks() < n {
        rx.changed().await.unwrap();
    }
}

#[tokio::test]
async fn ticks_publish_snapshots() {
    let (publisher, clock) = manual_publisher();
    let mut rx = publisher.subscribe();
    assert_eq!(*rx.borrow(), MetricsSnapshot::SEED);

    publisher.start(PERIOD).unwrap();
    assert_eq!(publisher.state(), PublisherState::Running);

    clock.advance(1);
    rx.changed().await.unwrap();
    let snap = *rx.borrow_and_update();
    assert_eq!(
        (snap.realtime_queries, snap.realtime_revenue, snap.realtime_users),
        (49, 1299, 13)
    );
    assert_eq!(publisher.current(), snap);

    publisher.stop().await;
}

#[tokio::test]
async fn double_start_is_rejected() {
    let (publisher, _clock) = manual_publisher();
    publisher.start(PERIOD).unwrap();

    let err = publisher.start(PERIOD).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "CONFLICT");
    assert_eq!(publisher.state(), PublisherState::Running);

    publisher.stop().await;
}

#[tokio::test]
async fn zero_interval_is_rejected() {
    let (publisher, _clock) = manual_publisher();
    let err = publisher.start(Duration::ZERO).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert_eq!(publisher.state(), PublisherState::Idle);
}

#[tokio::test]
async fn stop_is_idempotent() {
    let (publisher, _clock) = manual_publisher();
    publisher.stop().await;
    assert_eq!(publisher.state(), PublisherState::Idle);

    publisher.start(PERIOD).unwrap();
    publisher.stop().await;
    publisher.stop().await;
    assert_eq!(publisher.state(), PublisherState::Idle);
}

#[tokio::test]
async fn no_tick_after_stop() {
    let (publisher, clock) = manual_publisher();
    publisher.start(PERIOD).unwrap();

    clock.advance(3);
    wait_for_ticks(&publisher, 3).await;
    publisher.stop().await;

    let frozen = publisher.current();
    clock.advance(5);
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    assert_eq!(publisher.current(), frozen);
    assert_eq!(publisher.store().ticks(), 3);
    assert_eq!(clock.pending(), 5);
}

#[tokio::test]
async fn restart_resumes_ticking() {
    let (publisher, clock) = manual_publisher();
    publisher.start(PERIOD).unwrap();
    clock.advance(1);
    wait_for_ticks(&publisher, 1).await;
    publisher.stop().await;

    publisher.start(PERIOD).unwrap();
    clock.advance(1);
    wait_for_ticks(&publisher, 2).await;
    publisher.stop().await;

    let snap = publisher.current();
    assert_eq!(snap.realtime_queries, 45 + 2 * 4);
    let seed = MetricsSnapshot::SEED;
    assert_eq!(
        (snap.active_agents, snap.total_users, snap.revenue, snap.queries_processed),
        (seed.active_agents, seed.total_users, seed.revenue, seed.queries_processed)
    );
}

#[tokio::test(start_paused = true)]
async fn interval_clock_ticks_once_per_period() {
    let store = Arc::new(MetricsStore::with_defaults(Box::new(StdRandom::seeded(3))));
    let publisher = Publisher::with_clock(Arc::clone(&store), Arc::new(IntervalClock));
    publisher.start(PERIOD).unwrap();

    // nothing fires before the first full period
    tokio::time::sleep(PERIOD - Duration::from_millis(1)).await;
    assert_eq!(store.ticks(), 0);

    tokio::time::sleep(PERIOD * 2 + Duration::from_millis(2)).await;
    assert_eq!(store.ticks(), 3);

    publisher.stop().await;
    tokio::time::sleep(PERIOD * 5).await;
    assert_eq!(store.ticks(), 3);
}

#[tokio::test]
async fn dropping_a_running_publisher_stops_ticks() {
    let store = Arc::new(MetricsStore::with_defaults(Box::new(MaxDraw)));
    let clock = ManualClock::new();
    {
        let publisher = Publisher::with_clock(Arc::clone(&store), Arc::new(clock.clone()));
        publisher.start(PERIOD).unwrap();
    }
    clock.advance(2);
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(store.ticks(), 0);
}
