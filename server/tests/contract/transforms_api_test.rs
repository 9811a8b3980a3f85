//! Contract Test: トランスフォーム報告API
//!
//! POST /transform, /translation, /rotation (/rotate), /scale

use crate::support::{build_app, send_json, send_raw};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_transform_accepts_full_report() {
    let app = build_app().await.app;

    let (status, body) = send_json(
        &app,
        "POST",
        "/transform",
        Some(json!({
            "item_name": "Cube",
            "quantity": 1,
            "position": [1.0, 2.0, 3.0],
            "rotation": [0.0, 0.0, 1.57],
            "scale": [1.0, 1.0, 1.0]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Transform received successfully!");
}

#[tokio::test]
async fn test_component_endpoints() {
    let app = build_app().await.app;

    let cases = [
        ("/translation", json!({"position": [0.0, 1.0, 0.0]}), "Translation"),
        ("/rotation", json!({"rotation": [0.0, 0.5, 0.0]}), "Rotation"),
        ("/rotate", json!({"rotation": [0.0, 0.5, 0.0]}), "Rotation"),
        ("/scale", json!({"scale": [2.0, 2.0, 2.0]}), "Scale"),
    ];
    for (uri, payload, label) in cases {
        let (status, body) = send_json(&app, "POST", uri, Some(payload)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["message"], format!("{} received successfully!", label));
    }
}

#[tokio::test]
async fn test_missing_component_is_bad_request() {
    let app = build_app().await.app;

    let (status, body) = send_json(
        &app,
        "POST",
        "/scale",
        Some(json!({"position": [1.0, 1.0, 1.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid input: No scale data received");

    let (status, _) = send_json(&app, "POST", "/transform", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_vector_is_bad_request() {
    let app = build_app().await.app;

    let (status, _) = send_json(
        &app,
        "POST",
        "/translation",
        Some(json!({"position": [1.0, 2.0]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_raw(&app, "POST", "/rotation", "[").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
