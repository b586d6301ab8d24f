#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use salmon_api::config::ServerConfig;
use salmon_api::router::build_app_router;
use salmon_api::state::AppState;
use salmon_core::grilse::MemoryProbabilityStore;
use salmon_core::reference::{ReferenceData, ReferenceItem};

/// Gate id present in [`test_reference`].
pub const GATE_ID: i64 = 1;
pub const SALMON: i64 = 1;
pub const FLY: i64 = 1;
pub const SPINNER: i64 = 2;
pub const RIVER_DEE: i64 = 1;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 64 * 1024,
    }
}

pub fn test_reference() -> ReferenceData {
    ReferenceData::new(
        vec![
            ReferenceItem::new(GATE_ID, "Dee (Chester weir)"),
            ReferenceItem::new(2, "Kent (Sedgwick)"),
        ],
        vec![
            ReferenceItem::new(SALMON, "Salmon"),
            ReferenceItem::new(2, "Sea Trout"),
        ],
        vec![
            ReferenceItem::new(FLY, "Fly"),
            ReferenceItem::new(SPINNER, "Spinner"),
        ],
        vec![ReferenceItem::new(RIVER_DEE, "River Dee")],
    )
}

/// Build the full application router over an in-memory store, so no
/// database is needed.
pub fn build_test_app(store: MemoryProbabilityStore) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        store: Arc::new(store),
        reference: Arc::new(test_reference()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_text(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "text/csv")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
