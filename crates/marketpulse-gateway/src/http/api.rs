//! `/api/*` handlers.

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use marketpulse_core::catalog::{self, AgentRecord, SearchRequest, SearchResponse};
use marketpulse_core::dashboard::DashboardData;
use marketpulse_core::error::MarketError;
use marketpulse_core::metrics::MetricsSnapshot;

use crate::app_state::AppState;
use crate::http::error::ApiError;

pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentRecord>> {
    Json(state.catalog().agents().to_vec())
}

pub async fn metrics_snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.publisher().current())
}

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardData> {
    Json(state.dashboard().clone())
}

/// An empty body counts as a search without a query; anything else must be a
/// JSON object whose `query`, if present, is a string.
pub async fn search(State(state): State<AppState>, body: Bytes) -> Result<Json<SearchResponse>, ApiError> {
    let req = parse_search(&body).map_err(|e| {
        state.metrics().rejected_bodies.inc(&[("route", "/api/search")]);
        tracing::warn!(error = %e, "search request rejected");
        ApiError(e)
    })?;
    Ok(Json(catalog::search(req)))
}

fn parse_search(body: &[u8]) -> Result<SearchRequest, MarketError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SearchRequest::default());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| MarketError::BadRequest(format!("invalid search body: {e}")))?;
    // derived structs also accept sequences; only an object is a valid body
    if !value.is_object() {
        return Err(MarketError::BadRequest("search body must be a JSON object".into()));
    }
    serde_json::from_value(value)
        .map_err(|e| MarketError::BadRequest(format!("invalid search body: {e}")))
}
