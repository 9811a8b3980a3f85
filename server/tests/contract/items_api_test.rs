//! Contract Test: アイテムCRUD API
//!
//! GET /get-all-items, POST /add-item, PUT /update-quantity, DELETE /remove-item

use crate::support::{build_app, get, send_json, send_raw};
use axum::http::StatusCode;
use serde_json::json;

/// POST /add-item - 正常系: 201とIDを返す
#[tokio::test]
async fn test_add_item_returns_created_with_id() {
    let app = build_app().await.app;

    let (status, body) = send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], 201);
    assert_eq!(body["message"], "Item successfully added to database");
    assert_eq!(body["data"]["id"], 1);
}

/// GET /get-all-items - 追加順に返す
#[tokio::test]
async fn test_get_all_items_lists_in_insertion_order() {
    let app = build_app().await.app;
    for (name, qty) in [("widget", 5), ("gadget", 2)] {
        send_json(
            &app,
            "POST",
            "/add-item",
            Some(json!({"name": name, "quantity": qty})),
        )
        .await;
    }

    let (status, body) = get(&app, "/get-all-items").await;
    assert_eq!(status, StatusCode::OK);

    let items = body["res"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "widget");
    assert_eq!(items[0]["quantity"], 5);
    assert_eq!(items[1]["name"], "gadget");
    assert!(items[0]["created_at"].is_string());
}

/// GET /get-all-items - 空の場合も200
#[tokio::test]
async fn test_get_all_items_empty() {
    let app = build_app().await.app;

    let (status, body) = get(&app, "/get-all-items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No records found");
    assert_eq!(body["res"], json!([]));
}

/// POST /add-item - 重複は409、既存の数量は変わらない
#[tokio::test]
async fn test_add_duplicate_is_conflict() {
    let app = build_app().await.app;
    send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": 5})),
    )
    .await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (_, list) = get(&app, "/get-all-items").await;
    assert_eq!(list["res"][0]["quantity"], 5);
}

/// POST /add-item - 必須項目の欠落は400
#[tokio::test]
async fn test_add_item_missing_fields() {
    let app = build_app().await.app;

    let (status, _) = send_json(&app, "POST", "/add-item", Some(json!({"quantity": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, "POST", "/add-item", Some(json!({"name": "widget"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "", "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// POST /add-item - 型違い・負数・壊れたJSONは400
#[tokio::test]
async fn test_add_item_malformed_payloads() {
    let app = build_app().await.app;

    let (status, body) = send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": "five"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_raw(&app, "POST", "/add-item", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = get(&app, "/get-all-items").await;
    assert_eq!(list["res"], json!([]));
}

/// PUT /update-quantity - 正常系
#[tokio::test]
async fn test_update_quantity() {
    let app = build_app().await.app;
    send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": 5})),
    )
    .await;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/update-quantity",
        Some(json!({"name": "widget", "quantity": 8})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["old_quantity"], 5);
    assert_eq!(body["data"]["new_quantity"], 8);
    assert_eq!(body["data"]["logged"], true);

    let (_, list) = get(&app, "/get-all-items").await;
    assert_eq!(list["res"][0]["quantity"], 8);
}

/// PUT /update-quantity - 未登録アイテムは404
#[tokio::test]
async fn test_update_unknown_item_is_not_found() {
    let app = build_app().await.app;

    let (status, body) = send_json(
        &app,
        "PUT",
        "/update-quantity",
        Some(json!({"name": "ghost", "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

/// DELETE /remove-item - 正常系
#[tokio::test]
async fn test_remove_item() {
    let app = build_app().await.app;
    send_json(
        &app,
        "POST",
        "/add-item",
        Some(json!({"name": "widget", "quantity": 7})),
    )
    .await;

    let (status, body) = send_json(
        &app,
        "DELETE",
        "/remove-item",
        Some(json!({"name": "widget"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 7);

    let (_, list) = get(&app, "/get-all-items").await;
    assert_eq!(list["res"], json!([]));
}

/// DELETE /remove-item - 未登録は404、ボディなしは400
#[tokio::test]
async fn test_remove_item_errors() {
    let app = build_app().await.app;

    let (status, _) = send_json(
        &app,
        "DELETE",
        "/remove-item",
        Some(json!({"name": "ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&app, "DELETE", "/remove-item", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// 未定義のHTTPメソッドは405
#[tokio::test]
async fn test_wrong_method() {
    let app = build_app().await.app;

    let (status, _) = send_json(&app, "GET", "/add-item", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
