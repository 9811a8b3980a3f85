//! Inventory Common Library
//!
//! サーバーとクライアントで共有する型定義・プロトコル・設定・エラー

#![warn(missing_docs)]

/// ドメイン型定義（Item, 監査ログエントリ等）
pub mod types;

/// HTTP通信プロトコル（リクエスト/レスポンスDTO）
pub mod protocol;

/// 設定管理
pub mod config;

/// エラー型定義
pub mod error;
