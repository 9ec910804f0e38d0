//! Lightweight in-process observability.
//!
//! Request counters and latency histograms are recorded by `track_requests`
//! (a route layer) and rendered by the `/metrics` handler next to the live
//! snapshot gauges.

pub mod metrics;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::app_state::AppState;

pub use metrics::{CounterVec, HistogramVec, HttpMetrics};

/// Count every routed request by method/route/status and time it by route.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let started = Instant::now();
    let res = next.run(req).await;
    let status = res.status().as_u16().to_string();

    let m = state.metrics();
    m.requests.inc(&[("method", &method), ("route", &route), ("status", &status)]);
    m.request_duration.observe(&[("route", &route)], started.elapsed());
    res
}
