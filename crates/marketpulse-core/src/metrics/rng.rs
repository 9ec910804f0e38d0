use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integer draws used by `MetricsStore::tick`.
pub trait RandomSource: Send + Sync {
    /// Draw a value in `range` (both ends inclusive). `range` is never empty.
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64;
}

/// `StdRng`-backed source for production use.
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible sequence for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl RandomSource for StdRandom {
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64 {
        // gen_range panics on an empty range
        if range.is_empty() {
            return *range.start();
        }
        self.rng.gen_range(range)
    }
}
