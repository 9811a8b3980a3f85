//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use inventory_common::error::{ErrorKind, InventoryError};
use inventory_common::protocol::StatusResponse;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub InventoryError);

impl AppError {
    /// エラー種別に対応するHTTPステータス
    pub fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::Duplicate => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        AppError(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(InventoryError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(InventoryError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        // ストレージエラーの詳細はログにのみ残し、クライアントには汎用メッセージを返す
        match self.0.kind() {
            ErrorKind::Storage => tracing::error!(error = %self.0, "Storage failure"),
            _ => tracing::warn!(status = status.as_u16(), error = %self.0, "Request rejected"),
        }

        let payload = StatusResponse::message(status.as_u16(), self.0.external_message());
        (status, Json(payload)).into_response()
    }
}
