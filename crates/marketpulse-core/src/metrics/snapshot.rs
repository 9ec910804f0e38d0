use serde::{Deserialize, Serialize};

/// All counter values at one instant.
///
/// Serialized with camelCase keys (`activeAgents`, `realtimeQueries`, ...),
/// which is the shape dashboard clients poll for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    // cumulative
    pub active_agents: u64,
    pub total_users: u64,
    pub revenue: u64,
    pub queries_processed: u64,

    // realtime
    pub realtime_queries: u64,
    pub realtime_revenue: u64,
    pub realtime_users: u64,
}

impl MetricsSnapshot {
    /// Seed values the dashboard starts from.
    pub const SEED: MetricsSnapshot = MetricsSnapshot {
        active_agents: 1247,
        total_users: 15432,
        revenue: 98547,
        queries_processed: 2847563,
        realtime_queries: 45,
        realtime_revenue: 1250,
        realtime_users: 12,
    };
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::SEED
    }
}
