mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{provider_for_match, shared, FakeProvider, MATCH_SLUG};
use insight_api::{create_routes, AppState};
use insight_services::{EnrichmentLimits, EnrichmentService};
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_app(provider: FakeProvider) -> Router {
    let enrichment = Arc::new(EnrichmentService::new(shared(provider)));
    create_routes().with_state(AppState::new(enrichment, EnrichmentLimits::default(), 50))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_ping_and_health() {
    let app = create_test_app(FakeProvider::default());
    let (status, body) = get(app.clone(), "/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_enriched_endpoint() {
    let app = create_test_app(provider_for_match(Some("bravo")));
    let (status, body) = get(app, &format!("/api/v1/matches/{MATCH_SLUG}/enriched")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["id"], 500);
    assert_eq!(body["form"]["team1"]["wins"], 1);
    assert_eq!(body["form"]["team1"]["losses"], 0);
    assert_eq!(body["h2h"]["team1_wins"], 1);
    assert_eq!(body["h2h"]["team2_wins"], 0);
    assert_eq!(body["h2h"]["sample_size"], 1);
    assert_eq!(body["map_winrate"]["team1"], json!({ "maps": { "mirage": 0.6 } }));
}

#[tokio::test]
async fn test_enriched_by_url() {
    let app = create_test_app(provider_for_match(None));
    let uri = format!("/api/v1/enriched?url=https://bo3.gg/matches/{MATCH_SLUG}&form_limit=5");
    let (status, body) = get(app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"]["slug"], MATCH_SLUG);
    assert_eq!(body["map_winrate"]["team2"], Value::Null);
    assert!(body["map_winrate"]["note"].as_str().unwrap().contains("team2"));
}

#[tokio::test]
async fn test_enriched_unknown_match_is_404() {
    let app = create_test_app(FakeProvider::default());
    let (status, body) = get(app, "/api/v1/matches/nope/enriched").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_enriched_missing_team_is_422() {
    let provider = FakeProvider::default().with_match("tbd", json!({ "slug": "tbd", "team1_id": 1 }));
    let (status, body) = get(create_test_app(provider), "/api/v1/matches/tbd/enriched").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("team2 id"));
}

#[tokio::test]
async fn test_history_failure_is_502() {
    let app = create_test_app(provider_for_match(Some("bravo")).with_failing_history(1));
    let (status, body) = get(app, &format!("/api/v1/matches/{MATCH_SLUG}/enriched")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_raw_match_endpoint() {
    let app = create_test_app(provider_for_match(Some("bravo")));
    let (status, body) = get(app, &format!("/api/v1/matches/{MATCH_SLUG}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["team1"]["name"], "Alpha");
    assert_eq!(body["data"]["bet_updates"]["provider"], "ggbet");
}

#[tokio::test]
async fn test_operations_listing() {
    let (status, body) = get(create_test_app(FakeProvider::default()), "/api/v1/operations").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|op| op["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["get_match_details", "get_team_matches", "get_team_stats", "enrich_match"]);
}

#[tokio::test]
async fn test_call_whitelisted_operation() {
    let app = create_test_app(provider_for_match(Some("bravo")));

    let (status, body) = post_json(app.clone(), "/api/v1/call/get_team_matches", json!({ "team_id": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], 10);

    let (status, body) = post_json(
        app,
        "/api/v1/call/enrich_match",
        json!({ "identifier": MATCH_SLUG, "h2h_limit": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["h2h"]["sample_size"], 1);
}

#[tokio::test]
async fn test_call_rejects_unknown_operation_and_bad_params() {
    let app = create_test_app(provider_for_match(Some("bravo")));

    let (status, body) = post_json(app.clone(), "/api/v1/call/__init__", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Unknown operation"));

    let (status, _) = post_json(app, "/api/v1/call/get_team_matches", json!({ "team_id": "one" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
