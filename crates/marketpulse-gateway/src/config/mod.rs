//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use marketpulse_core::error::{MarketError, Result};

pub use schema::{
    Bound, GatewayConfig, IncrementSection, MetricsSection, PublisherSection, SeedSection,
    ServerSection,
};

/// Default config path, relative to the working directory.
pub const DEFAULT_PATH: &str = "marketpulse.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MarketError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| MarketError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path`, or built-in defaults when `path` is the default and missing.
/// An explicitly named file must exist.
pub fn load_or_default(path: Option<&str>) -> Result<GatewayConfig> {
    match path {
        Some(p) => load_from_file(p),
        None => match fs::read_to_string(DEFAULT_PATH) {
            Ok(s) => load_from_str(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = DEFAULT_PATH, "config file not found, using defaults");
                Ok(GatewayConfig::default())
            }
            Err(e) => Err(MarketError::Internal(format!("read config failed: {e}"))),
        },
    }
}

/// Apply a `PORT`-style override to `server.listen`.
pub fn apply_port_override(cfg: &mut GatewayConfig, port: Option<&str>) -> Result<()> {
    let Some(raw) = port else { return Ok(()) };
    let port: u16 = raw
        .trim()
        .parse()
        .map_err(|e| MarketError::BadRequest(format!("PORT must be a valid port number: {e}")))?;
    cfg.server.override_port(port)
}
