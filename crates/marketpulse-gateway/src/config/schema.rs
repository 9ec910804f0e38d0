use std::net::SocketAddr;

use serde::Deserialize;
use marketpulse_core::error::{MarketError, Result};
use marketpulse_core::metrics::{IncrementRule, MetricsSnapshot};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub publisher: PublisherSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MarketError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.publisher.validate()?;
        self.metrics.increments.to_rule()?;

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            publisher: PublisherSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MarketError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }

    /// Replace the port of `listen`, keeping the host.
    pub fn override_port(&mut self, port: u16) -> Result<()> {
        let mut addr = self.listen_addr()?;
        addr.set_port(port);
        self.listen = addr.to_string();
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3001".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublisherSection {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_autostart")]
    pub autostart: bool,

    /// Fixed seed for reproducible runs; entropy when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for PublisherSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            autostart: default_autostart(),
            rng_seed: None,
        }
    }
}

impl PublisherSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=3_600_000).contains(&self.tick_interval_ms) {
            return Err(MarketError::BadRequest(
                "publisher.tick_interval_ms must be between 10 and 3600000".into(),
            ));
        }
        Ok(())
    }
}

fn default_tick_interval_ms() -> u64 {
    2000
}
fn default_autostart() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default)]
    pub seed: SeedSection,

    #[serde(default)]
    pub increments: IncrementSection,
}

/// Initial counter values.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SeedSection {
    pub active_agents: u64,
    pub total_users: u64,
    pub revenue: u64,
    pub queries_processed: u64,
    pub realtime_queries: u64,
    pub realtime_revenue: u64,
    pub realtime_users: u64,
}

impl Default for SeedSection {
    fn default() -> Self {
        let s = MetricsSnapshot::SEED;
        Self {
            active_agents: s.active_agents,
            total_users: s.total_users,
            revenue: s.revenue,
            queries_processed: s.queries_processed,
            realtime_queries: s.realtime_queries,
            realtime_revenue: s.realtime_revenue,
            realtime_users: s.realtime_users,
        }
    }
}

impl SeedSection {
    pub fn to_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            active_agents: self.active_agents,
            total_users: self.total_users,
            revenue: self.revenue,
            queries_processed: self.queries_processed,
            realtime_queries: self.realtime_queries,
            realtime_revenue: self.realtime_revenue,
            realtime_users: self.realtime_users,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncrementSection {
    #[serde(default = "default_queries_bound")]
    pub queries: Bound,
    #[serde(default = "default_revenue_bound")]
    pub revenue: Bound,
    #[serde(default = "default_users_bound")]
    pub users: Bound,
}

impl Default for IncrementSection {
    fn default() -> Self {
        Self {
            queries: default_queries_bound(),
            revenue: default_revenue_bound(),
            users: default_users_bound(),
        }
    }
}

impl IncrementSection {
    pub fn to_rule(&self) -> Result<IncrementRule> {
        IncrementRule::new(
            self.queries.min..=self.queries.max,
            self.revenue.min..=self.revenue.max,
            self.users.min..=self.users.max,
        )
    }
}

/// Inclusive `[min, max]` per-tick increment.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bound {
    pub min: u64,
    pub max: u64,
}

fn default_queries_bound() -> Bound {
    Bound { min: 0, max: 4 }
}
fn default_revenue_bound() -> Bound {
    Bound { min: 0, max: 49 }
}
fn default_users_bound() -> Bound {
    Bound { min: 0, max: 1 }
}
