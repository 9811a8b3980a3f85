//! 在庫アイテムのCRUD操作
//!
//! 数量更新と削除は監査ログの追記と同じトランザクションで行う。
//! トランザクション内の文はすべて書き込み文なので、最初の文で
//! 書き込みロックを取得し、読み取りロックの昇格は発生しない。

use super::audit_log;
use super::{parse_db_timestamp, to_db_timestamp};
use chrono::Utc;
use inventory_common::error::{InventoryError, InventoryResult};
use inventory_common::types::{Created, Deleted, Item, Updated};
use sqlx::SqlitePool;
use tracing::debug;

/// 在庫アイテムストア
#[derive(Clone)]
pub struct ItemStore {
    pool: SqlitePool,
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    quantity: i64,
    created_at: String,
}

impl TryFrom<ItemRow> for Item {
    type Error = InventoryError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            created_at: parse_db_timestamp(&row.created_at, "created_at")?,
        })
    }
}

impl ItemStore {
    /// 新しいストアインスタンスを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// アイテムを追加
    ///
    /// # Arguments
    /// * `name` - アイテム名（空文字列不可）
    /// * `quantity` - 初期数量（0以上）
    ///
    /// # Returns
    /// * `Ok(Created)` - 採番されたID
    /// * `Err(InventoryError::Duplicate)` - 同名アイテムが既に存在（既存行は変更しない）
    /// * `Err(InventoryError::InvalidInput)` - 入力不正
    pub async fn add_item(&self, name: &str, quantity: i64) -> InventoryResult<Created> {
        validate_name(name)?;
        validate_quantity(quantity)?;

        let created_at = to_db_timestamp(Utc::now());
        let result = sqlx::query("INSERT INTO items (name, quantity, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(quantity)
            .bind(&created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    InventoryError::Duplicate(name.to_string())
                } else {
                    InventoryError::Storage(format!("Failed to add item: {}", e))
                }
            })?;

        let id = result.last_insert_rowid();
        debug!(item = name, id, quantity, "Item added");
        Ok(Created { id })
    }

    /// すべてのアイテムを取得（ID昇順）
    pub async fn get_all_items(&self) -> InventoryResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, quantity, created_at FROM items ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| InventoryError::Storage(format!("Failed to list items: {}", e)))?;

        rows.into_iter().map(Item::try_from).collect()
    }

    /// 名前でアイテムを検索
    pub async fn find_item(&self, name: &str) -> InventoryResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, quantity, created_at FROM items WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| InventoryError::Storage(format!("Failed to find item: {}", e)))?;

        row.map(Item::try_from).transpose()
    }

    /// 数量を更新
    ///
    /// 数量が変化する場合のみ更新履歴を1件追記する。
    /// 数量の書き込みと履歴の追記は両方成功するか、両方行われないかのどちらか。
    ///
    /// # Returns
    /// * `Ok(Updated)` - 更新結果（`logged` は履歴を書いたかどうか）
    /// * `Err(InventoryError::NotFound)` - 該当アイテムなし
    pub async fn update_quantity(&self, name: &str, new_quantity: i64) -> InventoryResult<Updated> {
        validate_name(name)?;
        validate_quantity(new_quantity)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to begin transaction: {}", e)))?;

        let updated_at = to_db_timestamp(Utc::now());
        let old_quantity =
            audit_log::record_update(&mut tx, name, new_quantity, &updated_at).await?;

        let result = sqlx::query("UPDATE items SET quantity = ? WHERE name = ?")
            .bind(new_quantity)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to update quantity: {}", e)))?;

        if result.rows_affected() == 0 {
            // txはドロップ時にロールバックされる
            return Err(InventoryError::NotFound(name.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to commit transaction: {}", e)))?;

        let updated = Updated {
            name: name.to_string(),
            old_quantity: old_quantity.unwrap_or(new_quantity),
            new_quantity,
            logged: old_quantity.is_some(),
        };
        debug!(
            item = name,
            old = updated.old_quantity,
            new = new_quantity,
            logged = updated.logged,
            "Item quantity updated"
        );
        Ok(updated)
    }

    /// アイテムを削除
    ///
    /// 削除直前の数量で削除履歴を1件追記する。
    ///
    /// # Returns
    /// * `Ok(Deleted)` - 削除結果
    /// * `Err(InventoryError::NotFound)` - 該当アイテムなし（履歴は書かない）
    pub async fn remove_item(&self, name: &str) -> InventoryResult<Deleted> {
        validate_name(name)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to begin transaction: {}", e)))?;

        let quantity: Option<i64> =
            sqlx::query_scalar("DELETE FROM items WHERE name = ? RETURNING quantity")
                .bind(name)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| InventoryError::Storage(format!("Failed to delete item: {}", e)))?;

        let Some(quantity) = quantity else {
            return Err(InventoryError::NotFound(name.to_string()));
        };

        let deleted_at = to_db_timestamp(Utc::now());
        audit_log::record_delete(&mut tx, name, quantity, &deleted_at).await?;

        tx.commit()
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to commit transaction: {}", e)))?;

        debug!(item = name, quantity, "Item removed");
        Ok(Deleted {
            name: name.to_string(),
            quantity,
        })
    }

    /// アイテム数を取得
    #[cfg(test)]
    pub(crate) async fn count(&self) -> InventoryResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to count items: {}", e)))
    }
}

fn validate_name(name: &str) -> InventoryResult<()> {
    if name.trim().is_empty() {
        return Err(InventoryError::InvalidInput(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> InventoryResult<()> {
    if quantity < 0 {
        return Err(InventoryError::InvalidInput(format!(
            "quantity must be a non-negative integer, got {}",
            quantity
        )));
    }
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
