//! Router-level tests driven through `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt;

use marketpulse_core::metrics::{MetricsStore, RandomSource};
use marketpulse_gateway::app_state::AppState;
use marketpulse_gateway::config::GatewayConfig;
use marketpulse_gateway::realtime::{ManualClock, Publisher};
use marketpulse_gateway::router::build_router;

struct MaxDraw;

impl RandomSource for MaxDraw {
    fn draw(&mut self, range: RangeInclusive<u64>) -> u64 {
        *range.end()
    }
}

fn test_state() -> (AppState, ManualClock) {
    let store = Arc::new(MetricsStore::with_defaults(Box::new(MaxDraw)));
    let clock = ManualClock::new();
    let publisher = Publisher::with_clock(store, Arc::new(clock.clone()));
    (AppState::with_publisher(GatewayConfig::default(), publisher), clock)
}

fn app() -> Router {
    build_router(test_state().0)
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_search(app: Router, body: &'static str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(app, req).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn root_banner() {
    let (status, v) = get_json(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["message"], "AI Marketplace API funcionando!");
    assert_eq!(v["version"], "1.0.0");
    assert!(v["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn health_reports_uptime() {
    let (status, v) = get_json(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "OK");
    assert!(v["uptime"].as_f64().unwrap() >= 0.0);
    assert!(v["timestamp"].is_string());
}

#[tokio::test]
async fn agents_listed_in_order() {
    let (status, v) = get_json(app(), "/api/agents").await;
    assert_eq!(status, StatusCode::OK);
    let list = v.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["name"], "Customer Support Agent");
    assert_eq!(list[1]["content_per_day"], 15432);
    assert_eq!(list[2]["optimization"], json!(12.4));

    let (_, again) = get_json(app(), "/api/agents").await;
    assert_eq!(v, again);
}

#[tokio::test]
async fn search_echoes_query_with_fixed_results() {
    let (status, v) = post_search(app(), r#"{"query":"laptop"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["query"], "laptop");
    assert_eq!(v["processing_time"], "0.15s");
    assert_eq!(
        v["results"][0],
        json!({ "title": "Laptop Gaming RTX 4080", "similarity": 96.8, "price": 1299, "rating": 5 })
    );
    assert_eq!(v["results"][1]["title"], "Workstation Pro Max");
}

#[tokio::test]
async fn search_accepts_missing_query() {
    let (status, v) = post_search(app(), r#"{"filters":{"price":"low"}}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(v.get("query").is_none());
    assert_eq!(v["results"].as_array().unwrap().len(), 2);

    let (status, _) = post_search(app(), "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn search_rejects_malformed_body() {
    let (status, v) = post_search(app(), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "BAD_REQUEST");

    let (status, _) = post_search(app(), r#"{"query": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_rejects_non_object_body() {
    for body in [r#"["laptop"]"#, "[]", "null", "42", r#""laptop""#] {
        let (status, v) = post_search(app(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body={body}");
        assert_eq!(v["error"], "BAD_REQUEST", "body={body}");
    }
}

#[tokio::test]
async fn search_null_query_is_omitted() {
    let (status, v) = post_search(app(), r#"{"query": null}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert!(v.get("query").is_none());
}

#[tokio::test]
async fn metrics_snapshot_follows_ticks() {
    let (state, clock) = test_state();
    let app = build_router(state.clone());

    let (status, v) = get_json(app.clone(), "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        v,
        json!({
            "activeAgents": 1247,
            "totalUsers": 15432,
            "revenue": 98547,
            "queriesProcessed": 2847563,
            "realtimeQueries": 45,
            "realtimeRevenue": 1250,
            "realtimeUsers": 12
        })
    );

    let mut rx = state.publisher().subscribe();
    state.publisher().start(Duration::from_millis(2000)).unwrap();
    clock.advance(1);
    rx.changed().await.unwrap();

    let (_, v) = get_json(app, "/api/metrics").await;
    assert_eq!(v["realtimeQueries"], 49);
    assert_eq!(v["realtimeRevenue"], 1299);
    assert_eq!(v["realtimeUsers"], 13);
    assert_eq!(v["queriesProcessed"], 2847563);

    state.publisher().stop().await;
}

#[tokio::test]
async fn dashboard_payload() {
    let (status, v) = get_json(app(), "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["performance"].as_array().unwrap().len(), 7);
    assert_eq!(v["agentTypes"][0]["color"], "#8884d8");
    assert_eq!(v["topAgents"][0]["name"], "GPT-4 Assistant");
    assert_eq!(v["kpiChanges"]["activeAgents"], json!(12.5));
}

#[tokio::test]
async fn readyz_flips_when_draining() {
    let (state, _clock) = test_state();
    let app = build_router(state.clone());

    let req = Request::builder().uri("/readyz").body(Body::empty()).unwrap();
    let (status, _) = send(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);

    state.metrics().set_draining();
    let req = Request::builder().uri("/readyz").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, b"draining");
}

#[tokio::test]
async fn prometheus_metrics_render_requests_and_snapshot() {
    let (state, _clock) = test_state();
    let app = build_router(state.clone());

    let _ = get_json(app.clone(), "/api/agents").await;
    let _ = post_search(app.clone(), "[").await;

    assert_eq!(
        state
            .metrics()
            .requests
            .get(&[("method", "GET"), ("route", "/api/agents"), ("status", "200")]),
        1
    );
    assert_eq!(state.metrics().rejected_bodies.get(&[("route", "/api/search")]), 1);
    assert_eq!(state.metrics().request_duration.count(&[("route", "/api/search")]), 1);

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("marketpulse_realtime_queries 45"));
    assert!(text.contains("marketpulse_active_agents 1247"));
    assert!(text.contains("marketpulse_publisher_running 0"));
    assert!(text.contains("marketpulse_draining 0"));
    assert!(text.contains(r#"marketpulse_http_requests_total{method="GET",route="/api/agents",status="200"} 1"#));
}
