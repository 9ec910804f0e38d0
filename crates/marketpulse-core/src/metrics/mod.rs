//! Live metrics: snapshot model, increment rule, and the store that owns them.
//!
//! The store keeps two groups of counters apart:
//! - cumulative totals, fixed at construction;
//! - realtime counters, bumped by a bounded random draw on every tick.
//!
//! Ticks never touch the cumulative group and never derive one group from the
//! other. Randomness comes through the `RandomSource` seam so the increment
//! bounds can be exercised deterministically.

pub mod rng;
pub mod rule;
pub mod snapshot;
pub mod store;

pub use rng::{RandomSource, StdRandom};
pub use rule::IncrementRule;
pub use snapshot::MetricsSnapshot;
pub use store::MetricsStore;
