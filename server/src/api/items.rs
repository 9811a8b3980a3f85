//! 在庫アイテムAPI
//!
//! GET /get-all-items, POST /add-item, PUT /update-quantity, DELETE /remove-item

use super::error::AppError;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use inventory_common::error::InventoryError;
use inventory_common::protocol::{
    ItemRequest, ListResponse, RemoveItemRequest, StatusResponse, NO_RECORDS_MESSAGE,
};
use inventory_common::types::{Created, Deleted, Item, Updated};

fn required_name(name: Option<String>) -> Result<String, AppError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(InventoryError::InvalidInput("name is required".to_string()).into()),
    }
}

fn required_quantity(quantity: Option<i64>) -> Result<i64, AppError> {
    quantity.ok_or_else(|| InventoryError::InvalidInput("quantity is required".to_string()).into())
}

/// GET /get-all-items - 全アイテム一覧
pub async fn get_all_items(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Item>>, AppError> {
    let items = state.items.get_all_items().await?;
    let message = if items.is_empty() {
        NO_RECORDS_MESSAGE.to_string()
    } else {
        format!("{} items found", items.len())
    };
    Ok(Json(ListResponse {
        message,
        res: items,
    }))
}

/// POST /add-item - アイテム追加
pub async fn add_item(
    State(state): State<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse<Created>>), AppError> {
    let Json(request) = payload?;
    let name = required_name(request.name)?;
    let quantity = required_quantity(request.quantity)?;

    let created = state.items.add_item(&name, quantity).await?;
    tracing::info!(item = %name, id = created.id, "Item added");

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse::with_data(
            StatusCode::CREATED.as_u16(),
            "Item successfully added to database",
            created,
        )),
    ))
}

/// PUT /update-quantity - 数量更新
pub async fn update_quantity(
    State(state): State<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<Json<StatusResponse<Updated>>, AppError> {
    let Json(request) = payload?;
    let name = required_name(request.name)?;
    let quantity = required_quantity(request.quantity)?;

    let updated = state.items.update_quantity(&name, quantity).await?;

    Ok(Json(StatusResponse::with_data(
        StatusCode::OK.as_u16(),
        "Item quantity updated successfully",
        updated,
    )))
}

/// DELETE /remove-item - アイテム削除
pub async fn remove_item(
    State(state): State<AppState>,
    payload: Result<Json<RemoveItemRequest>, JsonRejection>,
) -> Result<Json<StatusResponse<Deleted>>, AppError> {
    let Json(request) = payload?;
    let name = required_name(request.name)?;

    let deleted = state.items.remove_item(&name).await?;
    tracing::info!(item = %name, quantity = deleted.quantity, "Item removed");

    Ok(Json(StatusResponse::with_data(
        StatusCode::OK.as_u16(),
        "Item deleted successfully",
        deleted,
    )))
}
