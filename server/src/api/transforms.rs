//! 3Dオブジェクトのトランスフォーム報告受付
//!
//! DCCプラグインから送られる位置・回転・スケールを検証してログに記録する。
//! 報告は永続化しない。

use super::error::AppError;
use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use inventory_common::protocol::StatusResponse;
use inventory_common::types::{TransformKind, TransformReport};

async fn receive(
    kind: TransformKind,
    payload: Result<Json<TransformReport>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let Json(report) = payload?;
    report.validate(kind)?;

    tracing::info!(
        kind = %kind,
        item = report.item_name.as_deref().unwrap_or("-"),
        quantity = report.quantity,
        position = ?report.position,
        rotation = ?report.rotation,
        scale = ?report.scale,
        "Transform report received"
    );

    Ok(Json(StatusResponse::message(
        StatusCode::OK.as_u16(),
        format!("{} received successfully!", capitalize(kind.as_str())),
    )))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// POST /transform - 任意の成分を含む報告
pub async fn transform(
    payload: Result<Json<TransformReport>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    receive(TransformKind::Transform, payload).await
}

/// POST /translation - 位置
pub async fn translation(
    payload: Result<Json<TransformReport>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    receive(TransformKind::Translation, payload).await
}

/// POST /rotation (/rotate) - 回転
pub async fn rotation(
    payload: Result<Json<TransformReport>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    receive(TransformKind::Rotation, payload).await
}

/// POST /scale - スケール
pub async fn scale(
    payload: Result<Json<TransformReport>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    receive(TransformKind::Scale, payload).await
}
