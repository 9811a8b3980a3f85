//! Inventory Server
//!
//! SQLiteベースの在庫管理サーバー（アイテムCRUDと監査ログ）

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// axumサーバー起動・シャットダウン
pub mod server;

use db::audit_log::AuditLogStorage;
use db::items::ItemStore;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// 在庫アイテムストア
    pub items: ItemStore,
    /// 監査ログストレージ
    pub audit_log: AuditLogStorage,
}

impl AppState {
    /// 接続プールからアプリケーション状態を組み立てる
    pub fn new(db_pool: sqlx::SqlitePool) -> Self {
        Self {
            items: ItemStore::new(db_pool.clone()),
            audit_log: AuditLogStorage::new(db_pool.clone()),
            db_pool,
        }
    }
}
