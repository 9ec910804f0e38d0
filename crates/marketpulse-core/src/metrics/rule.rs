use std::ops::RangeInclusive;

use crate::error::{MarketError, Result};

/// Inclusive per-tick increment bounds for the realtime counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementRule {
    queries: RangeInclusive<u64>,
    revenue: RangeInclusive<u64>,
    users: RangeInclusive<u64>,
}

impl IncrementRule {
    /// Build a rule; every range must contain at least one value.
    pub fn new(
        queries: RangeInclusive<u64>,
        revenue: RangeInclusive<u64>,
        users: RangeInclusive<u64>,
    ) -> Result<Self> {
        for (name, r) in [("queries", &queries), ("revenue", &revenue), ("users", &users)] {
            if r.is_empty() {
                return Err(MarketError::BadRequest(format!(
                    "increment range for {name} is empty ({}..={})",
                    r.start(),
                    r.end()
                )));
            }
        }
        Ok(Self { queries, revenue, users })
    }

    pub fn queries(&self) -> RangeInclusive<u64> {
        self.queries.clone()
    }

    pub fn revenue(&self) -> RangeInclusive<u64> {
        self.revenue.clone()
    }

    pub fn users(&self) -> RangeInclusive<u64> {
        self.users.clone()
    }
}

impl Default for IncrementRule {
    /// queries 0..=4, revenue 0..=49, users 0..=1
    fn default() -> Self {
        Self {
            queries: 0..=4,
            revenue: 0..=49,
            users: 0..=1,
        }
    }
}
