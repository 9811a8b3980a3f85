//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベースマイグレーション
pub mod migrations;

/// 在庫アイテムストア
pub mod items;

/// 監査ログストレージ（更新履歴・削除履歴）
pub mod audit_log;

use chrono::{DateTime, SecondsFormat, Utc};
use inventory_common::error::{InventoryError, InventoryResult};

/// DB保存用のタイムスタンプ文字列に変換
///
/// 桁数固定（マイクロ秒, `Z` 終端）のRFC 3339にすることで、
/// 文字列比較の順序と時系列の順序を一致させる。
pub(crate) fn to_db_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// DBのタイムスタンプ文字列をパース
pub(crate) fn parse_db_timestamp(raw: &str, column: &str) -> InventoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| InventoryError::Storage(format!("Failed to parse {}: {}", column, e)))
}
