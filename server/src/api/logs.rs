//! 監査ログAPI
//!
//! GET /get-update-logs, GET /get-delete-logs
//! クエリ `_from` / `_to`（別名 `from` / `to`）で時刻範囲を指定する。

use super::error::AppError;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use inventory_common::protocol::{ListResponse, LogQueryParams, NO_RECORDS_MESSAGE};
use inventory_common::types::{DeleteLogEntry, LogRange, UpdateLogEntry};

fn parse_range(params: Result<Query<LogQueryParams>, QueryRejection>) -> Result<LogRange, AppError> {
    let Query(params) = params?;
    Ok(LogRange::parse(params.from.as_deref(), params.to.as_deref())?)
}

fn list_message(count: usize) -> String {
    if count == 0 {
        NO_RECORDS_MESSAGE.to_string()
    } else {
        format!("{} records found", count)
    }
}

/// GET /get-update-logs - 数量更新履歴
pub async fn get_update_logs(
    State(state): State<AppState>,
    params: Result<Query<LogQueryParams>, QueryRejection>,
) -> Result<Json<ListResponse<UpdateLogEntry>>, AppError> {
    let range = parse_range(params)?;
    let entries = state.audit_log.update_logs(&range).await?;
    Ok(Json(ListResponse {
        message: list_message(entries.len()),
        res: entries,
    }))
}

/// GET /get-delete-logs - 削除履歴
pub async fn get_delete_logs(
    State(state): State<AppState>,
    params: Result<Query<LogQueryParams>, QueryRejection>,
) -> Result<Json<ListResponse<DeleteLogEntry>>, AppError> {
    let range = parse_range(params)?;
    let entries = state.audit_log.delete_logs(&range).await?;
    Ok(Json(ListResponse {
        message: list_message(entries.len()),
        res: entries,
    }))
}
