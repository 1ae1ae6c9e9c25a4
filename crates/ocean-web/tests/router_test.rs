//! Router tests for paths that never reach the graph store.
//!
//! The client points at a closed port; neo4rs connects lazily so building
//! the router needs no database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use ocean_graph::{GraphClient, GraphConfig};
use ocean_web::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

async fn app() -> Router {
    let config = GraphConfig {
        uri: "bolt://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let client = GraphClient::connect_lazy(&config).await.unwrap();
    create_router(AppState::new(client))
}

async fn get(uri: &str) -> (StatusCode, String) {
    let response = app()
        .await
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    for uri in ["/api/knowledge-graph/search", "/api/knowledge-graph/search?q="] {
        let (status, body) = get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains('q'));
    }
}

#[tokio::test]
async fn search_with_bad_limit_is_bad_request() {
    let (status, body) = get_json("/api/knowledge-graph/search?q=%E6%B5%B7&limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_query_string_uses_json_envelope() {
    for uri in [
        "/api/knowledge-graph/search?q=a&q=b",
        "/api/knowledge-graph?type=Topic&type=Region",
        "/api/news/dashboard?sample=true&page=1&page=2",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let json: Value = serde_json::from_str(&body)
            .unwrap_or_else(|_| panic!("{uri} returned a non-JSON body: {body}"));
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("duplicate field"));
    }
}

#[tokio::test]
async fn unknown_label_is_bad_request() {
    let (status, body) = get_json("/api/knowledge-graph/nodes/Fish").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = get_json("/api/knowledge-graph?type=Fish").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_node_id_is_not_found() {
    let (status, body) = get_json("/api/knowledge-graph/node/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn sample_dashboard_needs_no_store() {
    let (status, body) = get_json("/api/news/dashboard?sample=true&pageSize=5&region=%E4%B8%AD%E5%9B%BD%E6%B8%A4%E6%B5%B7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["sample"], true);
    assert_eq!(body["summary"]["totalNews"], 8);
    assert_eq!(body["news"]["totalItems"], 1);
    assert_eq!(body["news"]["items"][0]["生态区域"], "中国渤海");
    assert!(!body["keywords"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn pages_and_assets_are_served() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/static/app.js"));

    let (status, body) = get("/knowledge-graph").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/static/knowledge-graph.js"));

    let (status, _) = get("/static/style.css").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get("/static/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
