//! 契約テスト共通ユーティリティ

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use inventory_server::{api, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// テスト用のアプリケーション
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

/// インメモリDBでルーターを構築する
pub async fn build_app() -> TestApp {
    let db_pool = sqlx::SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(db_pool);
    let app = api::create_app(state.clone());
    TestApp { app, state }
}

/// JSONボディ付きリクエストを送信し、ステータスとJSONを返す
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

/// 生のボディ文字列を送信する（不正なJSONの検証用）
pub async fn send_raw(app: &Router, method: &str, uri: &str, raw: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// GETリクエスト
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send_json(app, "GET", uri, None).await
}
