use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// One periodic tick stream owned by the publisher task.
#[async_trait]
pub trait Ticker: Send {
    /// Resolve at the next tick.
    async fn wait(&mut self);
}

/// Creates tickers. Called from inside the publisher task, so implementations
/// may rely on a tokio runtime being present.
pub trait TickerFactory: Send + Sync {
    fn ticker(&self, period: Duration) -> Box<dyn Ticker>;
}

/// Wall-clock ticks via `tokio::time::interval`.
///
/// The first tick fires one full period after start. Missed ticks are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalClock;

struct IntervalTicker {
    interval: Interval,
}

impl TickerFactory for IntervalClock {
    fn ticker(&self, period: Duration) -> Box<dyn Ticker> {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Box::new(IntervalTicker { interval })
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn wait(&mut self) {
        self.interval.tick().await;
    }
}

/// Test clock: ticks happen only when `advance` releases them.
///
/// Released ticks are counted, so `advance(3)` yields exactly three ticks to
/// whichever ticker is waiting, regardless of the period passed to `ticker`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    permits: Arc<Semaphore>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(0)),
        }
    }

    pub fn advance(&self, ticks: usize) {
        self.permits.add_permits(ticks);
    }

    /// Released ticks not yet consumed by a ticker.
    pub fn pending(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

struct ManualTicker {
    permits: Arc<Semaphore>,
}

impl TickerFactory for ManualClock {
    fn ticker(&self, _period: Duration) -> Box<dyn Ticker> {
        Box::new(ManualTicker {
            permits: Arc::clone(&self.permits),
        })
    }
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn wait(&mut self) {
        match self.permits.acquire().await {
            Ok(permit) => permit.forget(),
            // closed semaphore: never tick again
            Err(_) => std::future::pending().await,
        }
    }
}
