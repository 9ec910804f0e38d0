use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
}

/// Per-kind stats, flattened into the record on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentStats {
    Support { queries_per_day: u64, accuracy: f64 },
    Moderation { content_per_day: u64, detection_rate: f64 },
    Pricing { products: u64, optimization: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: u32,
    pub name: String,
    pub status: AgentStatus,
    #[serde(flatten)]
    pub stats: AgentStats,
}

/// Fixed ordered sequence of agents with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    agents: Vec<AgentRecord>,
}

impl Catalog {
    pub fn new(agents: Vec<AgentRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(agents.len());
        for a in &agents {
            if !seen.insert(a.id) {
                return Err(MarketError::BadRequest(format!("duplicate agent id: {}", a.id)));
            }
        }
        Ok(Self { agents })
    }

    /// The three demo agents.
    pub fn builtin() -> Self {
        Self {
            agents: vec![
                AgentRecord {
                    id: 1,
                    name: "Customer Support Agent".into(),
                    status: AgentStatus::Active,
                    stats: AgentStats::Support {
                        queries_per_day: 1247,
                        accuracy: 96.8,
                    },
                },
                AgentRecord {
                    id: 2,
                    name: "Content Moderator".into(),
                    status: AgentStatus::Active,
                    stats: AgentStats::Moderation {
                        content_per_day: 15432,
                        detection_rate: 99.2,
                    },
                },
                AgentRecord {
                    id: 3,
                    name: "Price Optimizer".into(),
                    status: AgentStatus::Active,
                    stats: AgentStats::Pricing {
                        products: 98547,
                        optimization: 12.4,
                    },
                },
            ],
        }
    }

    pub fn agents(&self) -> &[AgentRecord] {
        &self.agents
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
