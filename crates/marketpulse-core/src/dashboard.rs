//! Static chart datasets for the dashboard.
//!
//! These are fixed demo values; nothing here is derived from the live
//! metrics store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub name: String,
    pub queries: u64,
    pub revenue: u64,
    pub users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTypeShare {
    pub name: String,
    pub value: u64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopAgent {
    pub name: String,
    pub queries: u64,
    pub rating: f64,
    /// Preformatted currency label, e.g. `$15,240`.
    pub revenue: String,
}

/// Percent change vs. the previous day for each headline card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiChanges {
    pub active_agents: f64,
    pub total_users: f64,
    pub revenue: f64,
    pub queries_processed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub performance: Vec<MonthlyPerformance>,
    pub agent_types: Vec<AgentTypeShare>,
    pub top_agents: Vec<TopAgent>,
    pub kpi_changes: KpiChanges,
}

impl DashboardData {
    pub fn builtin() -> Self {
        Self {
            performance: [
                ("Ene", 4000, 2400, 240),
                ("Feb", 3000, 1398, 221),
                ("Mar", 2000, 9800, 229),
                ("Abr", 2780, 3908, 200),
                ("May", 1890, 4800, 218),
                ("Jun", 2390, 3800, 250),
                ("Jul", 3490, 4300, 210),
            ]
            .into_iter()
            .map(|(name, queries, revenue, users)| MonthlyPerformance {
                name: name.to_string(),
                queries,
                revenue,
                users,
            })
            .collect(),
            agent_types: [
                ("Customer Support", 400, "#8884d8"),
                ("Content Creation", 300, "#82ca9d"),
                ("Data Analysis", 200, "#ffc658"),
                ("Sales Assistant", 278, "#ff7c7c"),
            ]
            .into_iter()
            .map(|(name, value, color)| AgentTypeShare {
                name: name.to_string(),
                value,
                color: color.to_string(),
            })
            .collect(),
            top_agents: [
                ("GPT-4 Assistant", 12450, 4.9, "$15,240"),
                ("Content Creator Pro", 8930, 4.8, "$12,100"),
                ("Data Analyzer AI", 7650, 4.7, "$9,850"),
                ("Sales Optimizer", 6420, 4.6, "$8,200"),
            ]
            .into_iter()
            .map(|(name, queries, rating, revenue)| TopAgent {
                name: name.to_string(),
                queries,
                rating,
                revenue: revenue.to_string(),
            })
            .collect(),
            kpi_changes: KpiChanges {
                active_agents: 12.5,
                total_users: 8.2,
                revenue: 15.8,
                queries_processed: 23.1,
            },
        }
    }
}

impl Default for DashboardData {
    fn default() -> Self {
        Self::builtin()
    }
}
