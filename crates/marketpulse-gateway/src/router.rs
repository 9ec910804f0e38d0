//! Axum router wiring.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, http::api, obs, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::root))
        .route("/health", get(ops::health))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route("/api/agents", get(api::list_agents))
        .route("/api/search", post(api::search))
        .route("/api/metrics", get(api::metrics_snapshot))
        .route("/api/dashboard", get(api::dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), obs::track_requests))
        .with_state(state)
}
