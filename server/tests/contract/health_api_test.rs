//! Contract Test: GET /health

use crate::support::{build_app, get};
use axum::http::StatusCode;

#[tokio::test]
async fn test_health() {
    let app = build_app().await.app;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = build_app().await.app;

    let (status, _) = get(&app, "/no-such-route").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
