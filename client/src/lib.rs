//! Inventory Client
//!
//! 在庫サーバーのHTTPクライアントとCLI

#![warn(missing_docs)]

/// HTTPクライアント
pub mod client;

/// CLIインターフェース
pub mod cli;

/// クライアント設定の解決
pub mod config;

pub use client::{ClientError, ClientResult, InventoryClient, ReturnOutcome};
