//! services/api/tests/api.rs
//!
//! End-to-end tests that drive the REST routes through the router, with a
//! zero-delay analysis adapter so nothing sleeps.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::Level;

use api_lib::adapters::{InMemoryContributionAdapter, MockAnalysisAdapter, StaticCatalogAdapter};
use api_lib::config::Config;
use api_lib::web::{router, state::AppState};
use virasat_core::ledger::{MintPolicy, PreservationLedger};

fn test_config(policy: MintPolicy) -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse::<SocketAddr>().unwrap(),
        log_level: Level::INFO,
        mint_policy: policy,
        analysis_delay: Duration::ZERO,
        cors_origin: "http://localhost:5173".to_string(),
    }
}

fn test_app(policy: MintPolicy) -> Router {
    let app_state = Arc::new(AppState {
        ledger: Arc::new(Mutex::new(PreservationLedger::with_policy(policy))),
        catalog: Arc::new(StaticCatalogAdapter::new()),
        analysis: Arc::new(MockAnalysisAdapter::new(Duration::ZERO)),
        contributions: Arc::new(InMemoryContributionAdapter::new()),
        config: Arc::new(test_config(policy)),
    });
    router(app_state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn post_json(path: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn verify_payload() -> Value {
    json!({
        "title": "Ancient Music Manuscript — Rajasthan",
        "extracted_text": "राग भैरवी — प्रातःकालीन राग",
        "language": "Hindi (Devanagari)",
        "tags": ["Classical Music", "Ragas"],
        "confidence": 94.2,
    })
}

#[tokio::test]
async fn listing_items_reports_preservation_status() {
    let app = test_app(MintPolicy::Permissive);

    let (status, body) = send(&app, get("/items")).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 8);
    assert!(items.iter().all(|i| i["verified"] == json!(false)));

    let (status, _) = send(
        &app,
        post_json("/items/baul-songs/mint", json!({"owner": "Anjali Sen"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, get("/items?q=baul")).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["minted"], json!(true));
    assert_eq!(items[0]["verified"], json!(false));
}

#[tokio::test]
async fn catalog_filters_apply_through_the_query_string() {
    let app = test_app(MintPolicy::Permissive);

    let (_, body) = send(&app, get("/items?language=Bengali&type=image")).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], json!("kalighat-pat"));

    let (_, body) = send(&app, get("/items?category=performing-arts")).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_items_are_404() {
    let app = test_app(MintPolicy::Permissive);
    let (status, _) = send(&app, get("/items/no-such-item")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn item_detail_carries_canned_ai_material() {
    let app = test_app(MintPolicy::Permissive);

    let (status, body) = send(&app, get("/items/baul-songs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["id"], json!("baul-songs"));
    assert_eq!(body["insights"].as_array().unwrap().len(), 4);
    assert!(body["transcript"].as_str().unwrap().contains("Kushtia"));
    assert_eq!(body["nft"], Value::Null);
}

#[tokio::test]
async fn categories_carry_item_counts() {
    let app = test_app(MintPolicy::Permissive);
    let (status, body) = send(&app, get("/categories")).await;
    assert_eq!(status, StatusCode::OK);
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 6);
    let total: u64 = categories
        .iter()
        .map(|c| c["item_count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 8);
}

#[tokio::test]
async fn analyzing_a_preset_returns_the_canned_extraction() {
    let app = test_app(MintPolicy::Permissive);

    let (status, body) = send(&app, post_json("/presets/manuscript/analyze", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pipeline"].as_array().unwrap().len(), 5);
    assert_eq!(body["extraction"]["confidence"], json!(94.2));
    assert_eq!(
        body["extraction"]["language"],
        json!("Hindi (Devanagari)")
    );

    let (status, _) = send(&app, post_json("/presets/palimpsest/analyze", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verify_then_provenance_round_trips_the_record() {
    let app = test_app(MintPolicy::Permissive);

    let (status, body) = send(
        &app,
        post_json("/items/manuscript/verify", verify_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_id"], json!("manuscript"));
    assert_eq!(body["confidence"], json!(94.2));

    let (status, body) = send(&app, get("/items/manuscript/provenance")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"]["confidence"], json!(94.2));
    assert_eq!(body["minted"], Value::Null);
}

#[tokio::test]
async fn minting_twice_issues_fresh_identifiers() {
    let app = test_app(MintPolicy::Permissive);

    let (status, first) = send(
        &app,
        post_json("/items/manuscript/mint", json!({"owner": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["owner"], json!("Alice"));
    assert_eq!(first["blockchain"], json!("Polygon (Demo)"));
    let tx_hash = first["tx_hash"].as_str().unwrap();
    assert_eq!(tx_hash.len(), 66);
    assert!(tx_hash.starts_with("0x"));
    assert!(first["nft_id"].as_str().unwrap().starts_with("VRS-"));

    let (_, second) = send(
        &app,
        post_json("/items/manuscript/mint", json!({"owner": "Bob"})),
    )
    .await;
    assert_ne!(first["nft_id"], second["nft_id"]);
    assert_ne!(first["tx_hash"], second["tx_hash"]);

    // Only the second record survives.
    let (_, provenance) = send(&app, get("/items/manuscript/provenance")).await;
    assert_eq!(provenance["minted"]["owner"], json!("Bob"));
}

#[tokio::test]
async fn require_verified_policy_gates_minting() {
    let app = test_app(MintPolicy::RequireVerified);

    let (status, _) = send(
        &app,
        post_json("/items/manuscript/mint", json!({"owner": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        post_json("/items/manuscript/verify", verify_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        post_json("/items/manuscript/mint", json!({"owner": "Alice"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn preset_listing_badges_processed_documents() {
    let app = test_app(MintPolicy::Permissive);

    send(
        &app,
        post_json("/items/manuscript/verify", verify_payload()),
    )
    .await;

    let (status, body) = send(&app, get("/presets")).await;
    assert_eq!(status, StatusCode::OK);
    let presets = body.as_array().unwrap();
    assert_eq!(presets.len(), 4);
    let manuscript = presets
        .iter()
        .find(|p| p["key"] == json!("manuscript"))
        .unwrap();
    assert_eq!(manuscript["verified"], json!(true));
    assert_eq!(manuscript["minted"], json!(false));
}

#[tokio::test]
async fn contributions_queue_up_and_validate() {
    let app = test_app(MintPolicy::Permissive);

    let payload = json!({
        "title": "Sohar Birth Songs",
        "description": "Celebratory songs sung at childbirth.",
        "category": "oral-traditions",
        "region": "Bihar, India",
        "language": "Bhojpuri",
        "media_type": "audio",
        "contributor": "Sunita Devi",
    });
    let (status, body) = send(&app, post_json("/contributions", payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().is_some());

    let (_, listing) = send(&app, get("/contributions")).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);

    let blank = json!({
        "title": "",
        "description": "x",
        "category": "", "region": "", "language": "",
        "media_type": "text", "contributor": "",
    });
    let (status, _) = send(&app, post_json("/contributions", blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
