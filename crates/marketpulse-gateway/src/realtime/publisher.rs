use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use marketpulse_core::error::{MarketError, Result};
use marketpulse_core::metrics::{MetricsSnapshot, MetricsStore};

use crate::realtime::clock::{IntervalClock, TickerFactory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublisherState {
    Idle,
    Running,
}

/// Periodic driver: ticks the store on a fixed cadence and pushes each new
/// snapshot to subscribers.
///
/// Idle -> Running on `start`, Running -> Idle on `stop`. Double start is
/// rejected with `MarketError::AlreadyRunning`; stop while idle is a no-op.
pub struct Publisher {
    store: Arc<MetricsStore>,
    clock: Arc<dyn TickerFactory>,
    updates: Arc<watch::Sender<MetricsSnapshot>>,
    running: Mutex<Option<RunningTask>>,
}

struct RunningTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Publisher {
    /// Publisher driven by wall-clock intervals.
    pub fn new(store: Arc<MetricsStore>) -> Self {
        Self::with_clock(store, Arc::new(IntervalClock))
    }

    pub fn with_clock(store: Arc<MetricsStore>, clock: Arc<dyn TickerFactory>) -> Self {
        let (updates, _) = watch::channel(store.read());
        Self {
            store,
            clock,
            updates: Arc::new(updates),
            running: Mutex::new(None),
        }
    }

    /// Spawn the tick task. Must be called from within a tokio runtime.
    pub fn start(&self, period: Duration) -> Result<()> {
        if period.is_zero() {
            return Err(MarketError::BadRequest("tick interval must be non-zero".into()));
        }

        let mut slot = self.lock_running();
        if slot.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            tracing::warn!("publisher start ignored: already running");
            return Err(MarketError::AlreadyRunning);
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_ticks(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            Arc::clone(&self.updates),
            period,
            shutdown_rx,
        ));
        *slot = Some(RunningTask { shutdown, handle });

        tracing::info!(interval_ms = period.as_millis() as u64, "publisher started");
        Ok(())
    }

    /// Halt ticking. Returns once the task has exited, so no tick starts after
    /// this resolves.
    pub async fn stop(&self) {
        let task = self.lock_running().take();
        let Some(task) = task else {
            return;
        };

        let _ = task.shutdown.send(true);
        if let Err(e) = task.handle.await {
            tracing::warn!(error = %e, "publisher task ended abnormally");
        }
        tracing::info!(ticks = self.store.ticks(), "publisher stopped");
    }

    pub fn state(&self) -> PublisherState {
        match self.lock_running().as_ref() {
            Some(t) if !t.handle.is_finished() => PublisherState::Running,
            _ => PublisherState::Idle,
        }
    }

    /// Latest snapshot, read straight from the store.
    pub fn current(&self) -> MetricsSnapshot {
        self.store.read()
    }

    /// Receiver that observes every post-tick snapshot (latest value only).
    pub fn subscribe(&self) -> watch::Receiver<MetricsSnapshot> {
        self.updates.subscribe()
    }

    pub fn store(&self) -> &Arc<MetricsStore> {
        &self.store
    }

    fn lock_running(&self) -> MutexGuard<'_, Option<RunningTask>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Publisher {
    fn drop(&mut self) {
        let slot = self.running.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.handle.abort();
        }
    }
}

async fn run_ticks(
    store: Arc<MetricsStore>,
    clock: Arc<dyn TickerFactory>,
    updates: Arc<watch::Sender<MetricsSnapshot>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = clock.ticker(period);

    loop {
        tokio::select! {
            biased;

            // stop signal (or publisher gone)
            _ = shutdown.changed() => break,

            _ = ticker.wait() => {
                let snap = store.tick();
                updates.send_replace(snap);
                tracing::debug!(
                    realtime_queries = snap.realtime_queries,
                    realtime_revenue = snap.realtime_revenue,
                    realtime_users = snap.realtime_users,
                    "snapshot published"
                );
            }
        }
    }
}
