//! Contract Test: 監査ログAPI
//!
//! GET /get-update-logs, GET /get-delete-logs

use crate::support::{build_app, get, send_json, TestApp};
use axum::http::StatusCode;
use serde_json::json;

async fn seed_widget_lifecycle(app: &axum::Router) {
    send_json(
        app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": 5})),
    )
    .await;
    for qty in [5, 8] {
        send_json(
            app,
            "PUT",
            "/update-quantity",
            Some(json!({"name": "widget", "quantity": qty})),
        )
        .await;
    }
    send_json(
        app,
        "DELETE",
        "/remove-item",
        Some(json!({"name": "widget"})),
    )
    .await;
}

/// 追加→同値更新→更新→削除 のシナリオ
#[tokio::test]
async fn test_widget_lifecycle_logs() {
    let app = build_app().await.app;
    seed_widget_lifecycle(&app).await;

    let (status, body) = get(&app, "/get-update-logs").await;
    assert_eq!(status, StatusCode::OK);
    let updates = body["res"].as_array().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["item_name"], "widget");
    assert_eq!(updates[0]["old_quantity"], 5);
    assert_eq!(updates[0]["new_quantity"], 8);

    let (status, body) = get(&app, "/get-delete-logs").await;
    assert_eq!(status, StatusCode::OK);
    let deletes = body["res"].as_array().unwrap();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0]["quantity"], 8);
}

/// 履歴がない場合は200で "No records found"
#[tokio::test]
async fn test_empty_logs() {
    let app = build_app().await.app;

    for uri in ["/get-update-logs", "/get-delete-logs"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "No records found");
        assert_eq!(body["res"], json!([]));
    }
}

/// _from / _to での範囲指定
#[tokio::test]
async fn test_range_filters() {
    let TestApp { app, state } = build_app().await;
    for (name, at) in [
        ("a", "2024-01-01T12:00:00.000000Z"),
        ("b", "2024-01-10T12:00:00.000000Z"),
        ("c", "2024-01-20T12:00:00.000000Z"),
    ] {
        sqlx::query(
            "INSERT INTO item_log (item_name, old_quantity, new_quantity, updated_at) VALUES (?, 1, 2, ?)",
        )
        .bind(name)
        .bind(at)
        .execute(&state.db_pool)
        .await
        .unwrap();
    }

    let (_, body) = get(&app, "/get-update-logs?_from=2024-01-05").await;
    assert_eq!(body["res"].as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/get-update-logs?_to=2024-01-10%2012:00:00").await;
    let names: Vec<_> = body["res"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["item_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let (_, body) = get(
        &app,
        "/get-update-logs?from=2024-01-05T00:00:00Z&to=2024-01-15T00:00:00Z",
    )
    .await;
    assert_eq!(body["res"].as_array().unwrap().len(), 1);
    assert_eq!(body["res"][0]["item_name"], "b");

    // 逆転した範囲は空
    let (status, body) = get(&app, "/get-update-logs?_from=2024-02-01&_to=2024-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["res"], json!([]));

    // 空文字列は指定なし
    let (_, body) = get(&app, "/get-update-logs?_from=&_to=").await;
    assert_eq!(body["res"].as_array().unwrap().len(), 3);
}

/// 未エンコードの `+` オフセット（クエリでは空白になる）
#[tokio::test]
async fn test_unencoded_plus_offset_in_range() {
    let TestApp { app, state } = build_app().await;
    for (name, at) in [
        ("a", "2024-01-10T12:00:00.000000Z"),
        ("b", "2024-01-10T12:00:01.000000Z"),
    ] {
        sqlx::query(
            "INSERT INTO item_log (item_name, old_quantity, new_quantity, updated_at) VALUES (?, 1, 2, ?)",
        )
        .bind(name)
        .bind(at)
        .execute(&state.db_pool)
        .await
        .unwrap();
    }

    let (status, body) = get(&app, "/get-update-logs?_to=2024-01-10T14:00:00+02:00").await;
    assert_eq!(status, StatusCode::OK);
    let res = body["res"].as_array().unwrap();
    assert_eq!(res.len(), 1);
    assert_eq!(res[0]["item_name"], "a");

    let (status, body) = get(&app, "/get-update-logs?_to=2024-01-10T14:00:00%2B02:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["res"].as_array().unwrap().len(), 1);
}

/// 不正な日時は400
#[tokio::test]
async fn test_invalid_timestamp_is_bad_request() {
    let app = build_app().await.app;

    let (status, body) = get(&app, "/get-delete-logs?_from=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}
