use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use speckle_core::account::Session;
use speckle_core::stream::StreamsApiFactory;
use speckle_interaction::HttpStreamsApiFactory;
use std::collections::HashMap;
use std::time::Duration;

async fn list_streams(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer good-token");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "bad token" })),
        );
    }
    assert_eq!(query.get("omit").map(String::as_str), Some("objects,layers,baseProperties"));

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Found 3 streams",
            "resources": [
                { "streamId": "zeta", "name": "Last alphabetically" },
                { "streamId": "alpha", "name": "First alphabetically", "owner": "x" },
                { "streamId": "mid" }
            ]
        })),
    )
}

async fn failing_payload() -> Json<Value> {
    Json(json!({ "success": false, "message": "database offline" }))
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/api/v1/streams", get(list_streams))
        .route("/broken/streams", get(failing_payload));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn session(endpoint: String, token: &str) -> Session {
    Session {
        auth_token: token.to_string(),
        endpoint_url: endpoint,
        account_email: "ada@example.com".to_string(),
        server_name: "Local".to_string(),
    }
}

#[tokio::test]
async fn test_lists_streams_in_server_order() {
    let base = spawn_server().await;
    let factory = HttpStreamsApiFactory::new(Duration::from_secs(5));
    let api = factory
        .create(&session(format!("{base}/api/v1"), "good-token"))
        .unwrap();

    let streams = api.list_streams_lean().await.expect("listing should succeed");
    let ids: Vec<&str> = streams.iter().map(|s| s.stream_id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    assert_eq!(streams[0].name.as_deref(), Some("Last alphabetically"));
}

#[tokio::test]
async fn test_unauthorized_is_remote_fetch_error_with_status() {
    let base = spawn_server().await;
    let factory = HttpStreamsApiFactory::new(Duration::from_secs(5));
    let api = factory
        .create(&session(format!("{base}/api/v1"), "bad-token"))
        .unwrap();

    let err = api.list_streams_lean().await.unwrap_err();
    assert!(matches!(
        err,
        speckle_core::SpeckleError::RemoteFetch { status: Some(401), .. }
    ));
}

#[tokio::test]
async fn test_success_false_payload_is_error() {
    let base = spawn_server().await;
    let factory = HttpStreamsApiFactory::new(Duration::from_secs(5));
    let api = factory
        .create(&session(format!("{base}/broken"), "good-token"))
        .unwrap();

    let err = api.list_streams_lean().await.unwrap_err();
    assert!(err.is_remote_fetch());
    assert!(err.to_string().contains("database offline"));
}

#[tokio::test]
async fn test_rest_api_override_redirects_requests() {
    let base = spawn_server().await;
    let factory = HttpStreamsApiFactory::new(Duration::from_secs(5))
        .with_rest_api_override(Some(format!("{base}/api/v1")));
    let api = factory
        .create(&session("http://unreachable.invalid/api".to_string(), "good-token"))
        .unwrap();

    assert_eq!(api.list_streams_lean().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_connection_refused_is_remote_fetch_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let factory = HttpStreamsApiFactory::new(Duration::from_secs(5));
    let api = factory
        .create(&session(format!("http://{addr}/api/v1"), "good-token"))
        .unwrap();

    assert!(api.list_streams_lean().await.unwrap_err().is_remote_fetch());
}
