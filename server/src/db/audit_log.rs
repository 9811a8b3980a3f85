//! 監査ログストレージ
//!
//! `item_log`（数量更新履歴）と `delete_log`（削除履歴）の読み出しと、
//! `ItemStore` のトランザクション内から呼ばれる書き込み。
//! 書き込み関数はcrate外に公開しない。

use super::{parse_db_timestamp, to_db_timestamp};
use inventory_common::error::{InventoryError, InventoryResult};
use inventory_common::types::{DeleteLogEntry, LogRange, UpdateLogEntry};
use sqlx::{SqliteConnection, SqlitePool};

/// 監査ログの読み出し
#[derive(Clone)]
pub struct AuditLogStorage {
    pool: SqlitePool,
}

/// sqlx::FromRow用の行構造体（更新履歴）
#[derive(Debug, sqlx::FromRow)]
struct UpdateLogRow {
    id: i64,
    item_name: String,
    old_quantity: i64,
    new_quantity: i64,
    updated_at: String,
}

/// sqlx::FromRow用の行構造体（削除履歴）
#[derive(Debug, sqlx::FromRow)]
struct DeleteLogRow {
    id: i64,
    item_name: String,
    quantity: i64,
    deleted_at: String,
}

impl TryFrom<UpdateLogRow> for UpdateLogEntry {
    type Error = InventoryError;

    fn try_from(row: UpdateLogRow) -> Result<Self, Self::Error> {
        Ok(UpdateLogEntry {
            id: row.id,
            item_name: row.item_name,
            old_quantity: row.old_quantity,
            new_quantity: row.new_quantity,
            updated_at: parse_db_timestamp(&row.updated_at, "updated_at")?,
        })
    }
}

impl TryFrom<DeleteLogRow> for DeleteLogEntry {
    type Error = InventoryError;

    fn try_from(row: DeleteLogRow) -> Result<Self, Self::Error> {
        Ok(DeleteLogEntry {
            id: row.id,
            item_name: row.item_name,
            quantity: row.quantity,
            deleted_at: parse_db_timestamp(&row.deleted_at, "deleted_at")?,
        })
    }
}

impl AuditLogStorage {
    /// 新しいAuditLogStorageを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 数量更新履歴を検索（範囲は両端を含む、ID昇順）
    pub async fn update_logs(&self, range: &LogRange) -> InventoryResult<Vec<UpdateLogEntry>> {
        let (where_clause, bind_values) = build_where_clause("updated_at", range);
        let sql = format!(
            "SELECT id, item_name, old_quantity, new_quantity, updated_at \
             FROM item_log {} ORDER BY id ASC",
            where_clause
        );

        let mut query = sqlx::query_as::<_, UpdateLogRow>(&sql);
        for val in &bind_values {
            query = query.bind(val.as_str());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to query update logs: {}", e)))?;

        rows.into_iter().map(UpdateLogEntry::try_from).collect()
    }

    /// 削除履歴を検索（範囲は両端を含む、ID昇順）
    pub async fn delete_logs(&self, range: &LogRange) -> InventoryResult<Vec<DeleteLogEntry>> {
        let (where_clause, bind_values) = build_where_clause("deleted_at", range);
        let sql = format!(
            "SELECT id, item_name, quantity, deleted_at FROM delete_log {} ORDER BY id ASC",
            where_clause
        );

        let mut query = sqlx::query_as::<_, DeleteLogRow>(&sql);
        for val in &bind_values {
            query = query.bind(val.as_str());
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to query delete logs: {}", e)))?;

        rows.into_iter().map(DeleteLogEntry::try_from).collect()
    }

    /// 条件に一致する更新履歴の件数
    #[cfg(test)]
    pub(crate) async fn count_update_logs(&self, range: &LogRange) -> InventoryResult<i64> {
        self.count("item_log", "updated_at", range).await
    }

    /// 条件に一致する削除履歴の件数
    #[cfg(test)]
    pub(crate) async fn count_delete_logs(&self, range: &LogRange) -> InventoryResult<i64> {
        self.count("delete_log", "deleted_at", range).await
    }

    #[cfg(test)]
    async fn count(&self, table: &str, column: &str, range: &LogRange) -> InventoryResult<i64> {
        let (where_clause, bind_values) = build_where_clause(column, range);
        let sql = format!("SELECT COUNT(*) FROM {} {}", table, where_clause);

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for val in &bind_values {
            query = query.bind(val.as_str());
        }

        query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| InventoryError::Storage(format!("Failed to count {}: {}", table, e)))
    }
}

/// 数量が変化する場合のみ更新履歴を追記する
///
/// `items` の更新より先に、同じトランザクション内で呼ぶこと。
/// 変更前の数量を返す。アイテムが存在しない、または数量が同じ場合は `None`。
pub(crate) async fn record_update(
    conn: &mut SqliteConnection,
    item_name: &str,
    new_quantity: i64,
    updated_at: &str,
) -> InventoryResult<Option<i64>> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO item_log (item_name, old_quantity, new_quantity, updated_at)
         SELECT name, quantity, ?, ? FROM items WHERE name = ? AND quantity != ?
         RETURNING old_quantity",
    )
    .bind(new_quantity)
    .bind(updated_at)
    .bind(item_name)
    .bind(new_quantity)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| InventoryError::Storage(format!("Failed to write update log: {}", e)))
}

/// 削除履歴を追記する
pub(crate) async fn record_delete(
    conn: &mut SqliteConnection,
    item_name: &str,
    quantity: i64,
    deleted_at: &str,
) -> InventoryResult<()> {
    sqlx::query("INSERT INTO delete_log (item_name, quantity, deleted_at) VALUES (?, ?, ?)")
        .bind(item_name)
        .bind(quantity)
        .bind(deleted_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| InventoryError::Storage(format!("Failed to write delete log: {}", e)))?;

    Ok(())
}

/// 時刻範囲からWHERE句とバインド値を組み立てる
fn build_where_clause(column: &str, range: &LogRange) -> (String, Vec<String>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(from) = range.from {
        conditions.push(format!("{} >= ?", column));
        bind_values.push(to_db_timestamp(from));
    }

    if let Some(to) = range.to {
        conditions.push(format!("{} <= ?", column));
        bind_values.push(to_db_timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}
