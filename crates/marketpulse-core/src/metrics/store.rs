use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::metrics::{IncrementRule, MetricsSnapshot, RandomSource};

/// Owns one `MetricsSnapshot` and the single mutation rule applied to it.
///
/// Snapshot and random source share one lock: a tick takes the write side, so
/// readers always see the three realtime counters move together.
pub struct MetricsStore {
    rule: IncrementRule,
    state: RwLock<StoreState>,
}

struct StoreState {
    snapshot: MetricsSnapshot,
    rng: Box<dyn RandomSource>,
    ticks: u64,
}

impl MetricsStore {
    pub fn new(seed: MetricsSnapshot, rule: IncrementRule, rng: Box<dyn RandomSource>) -> Self {
        Self {
            rule,
            state: RwLock::new(StoreState {
                snapshot: seed,
                rng,
                ticks: 0,
            }),
        }
    }

    /// Default seed and increment rule.
    pub fn with_defaults(rng: Box<dyn RandomSource>) -> Self {
        Self::new(MetricsSnapshot::SEED, IncrementRule::default(), rng)
    }

    /// Copy of the current snapshot.
    pub fn read(&self) -> MetricsSnapshot {
        self.read_state().snapshot
    }

    /// Number of ticks applied since construction.
    pub fn ticks(&self) -> u64 {
        self.read_state().ticks
    }

    /// Apply one increment step to the realtime counters and return the result.
    pub fn tick(&self) -> MetricsSnapshot {
        let mut guard = self.write_state();
        let st = &mut *guard;

        let dq = st.rng.draw(self.rule.queries());
        let dr = st.rng.draw(self.rule.revenue());
        let du = st.rng.draw(self.rule.users());

        let snap = &mut st.snapshot;
        snap.realtime_queries = snap.realtime_queries.saturating_add(dq);
        snap.realtime_revenue = snap.realtime_revenue.saturating_add(dr);
        snap.realtime_users = snap.realtime_users.saturating_add(du);
        st.ticks += 1;

        tracing::trace!(tick = st.ticks, dq, dr, du, "metrics tick applied");
        st.snapshot
    }

    // Counter arithmetic cannot leave the state half-written, so a poisoned
    // lock is still safe to use.
    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for MetricsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.read_state();
        f.debug_struct("MetricsStore")
            .field("rule", &self.rule)
            .field("snapshot", &st.snapshot)
            .field("ticks", &st.ticks)
            .finish()
    }
}
