//! Operational HTTP endpoints.
//!
//! - `/`        : service banner
//! - `/health`  : liveness with uptime
//! - `/readyz`  : readiness (503 when draining)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::app_state::AppState;
use crate::realtime::PublisherState;

pub const API_VERSION: &str = "1.0.0";
const BANNER: &str = "AI Marketplace API funcionando!";

#[derive(Debug, Serialize)]
pub struct RootInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    /// Seconds since the gateway state was created.
    pub uptime: f64,
    pub timestamp: String,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn root() -> Json<RootInfo> {
    Json(RootInfo {
        message: BANNER,
        version: API_VERSION,
        timestamp: iso_now(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthInfo> {
    Json(HealthInfo {
        status: "OK",
        uptime: state.uptime().as_secs_f64(),
        timestamp: iso_now(),
    })
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let publisher = state.publisher();
    let body = state.metrics().render(
        &publisher.current(),
        publisher.store().ticks(),
        publisher.state() == PublisherState::Running,
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
