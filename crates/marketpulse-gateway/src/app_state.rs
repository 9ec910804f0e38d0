//! Shared application state for the marketpulse gateway.
//!
//! Owns the metrics store (through the publisher), the read-only catalog and
//! dashboard datasets, and request metrics. Startup errors are returned as
//! `Result` so `main` decides how to exit.

use std::sync::Arc;

use tokio::time::{Duration, Instant};

use marketpulse_core::catalog::Catalog;
use marketpulse_core::dashboard::DashboardData;
use marketpulse_core::error::Result;
use marketpulse_core::metrics::{MetricsStore, RandomSource, StdRandom};

use crate::config::GatewayConfig;
use crate::obs::HttpMetrics;
use crate::realtime::Publisher;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    publisher: Arc<Publisher>,
    metrics: Arc<HttpMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    catalog: Catalog,
    dashboard: DashboardData,
    started_at: Instant,
}

impl AppState {
    /// Build state from config with a wall-clock publisher.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let rng: Box<dyn RandomSource> = match cfg.publisher.rng_seed {
            Some(seed) => Box::new(StdRandom::seeded(seed)),
            None => Box::new(StdRandom::from_entropy()),
        };
        let store = Arc::new(MetricsStore::new(
            cfg.metrics.seed.to_snapshot(),
            cfg.metrics.increments.to_rule()?,
            rng,
        ));
        Ok(Self::with_publisher(cfg, Publisher::new(store)))
    }

    /// Build state around an existing publisher (custom clock or store).
    pub fn with_publisher(cfg: GatewayConfig, publisher: Publisher) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                catalog: Catalog::builtin(),
                dashboard: DashboardData::builtin(),
                started_at: Instant::now(),
            }),
            publisher: Arc::new(publisher),
            metrics: Arc::new(HttpMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn dashboard(&self) -> &DashboardData {
        &self.inner.dashboard
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    pub fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Start ticking at the configured interval.
    pub fn start_publisher(&self) -> Result<()> {
        let period = Duration::from_millis(self.cfg().publisher.tick_interval_ms);
        self.publisher.start(period)
    }
}
