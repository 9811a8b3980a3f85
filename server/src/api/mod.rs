//! REST APIハンドラー
//!
//! 在庫CRUD、監査ログ参照、トランスフォーム報告の受付

pub mod error;
pub mod items;
pub mod logs;
pub mod system;
pub mod transforms;

use crate::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/get-all-items", get(items::get_all_items))
        .route("/add-item", post(items::add_item))
        .route("/update-quantity", put(items::update_quantity))
        .route("/remove-item", delete(items::remove_item))
        .route("/get-update-logs", get(logs::get_update_logs))
        .route("/get-delete-logs", get(logs::get_delete_logs))
        .route("/transform", post(transforms::transform))
        .route("/translation", post(transforms::translation))
        .route("/rotation", post(transforms::rotation))
        .route("/rotate", post(transforms::rotation))
        .route("/scale", post(transforms::scale))
        .route("/health", get(system::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
