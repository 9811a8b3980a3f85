//! クライアント設定の解決
//!
//! `INVENTORY_URL`（`INVENTORY_BASE_URL`）が優先。未設定の場合は旧来の
//! `FLASK_URL` + `PORT` の組み合わせを非推奨警告付きで受け付ける。

use inventory_common::config::ClientConfig;
use inventory_common::error::CommonResult;
use std::path::Path;

/// 設定ファイルと環境変数からクライアント設定を読み込む
pub fn load_client_config(path: Option<&Path>) -> CommonResult<ClientConfig> {
    let mut config = ClientConfig::load(path)?;
    if let Some(url) = legacy_base_url() {
        config.base_url = url;
    }
    Ok(config)
}

fn legacy_base_url() -> Option<String> {
    if std::env::var("INVENTORY_URL").is_ok() || std::env::var("INVENTORY_BASE_URL").is_ok() {
        return None;
    }
    let host = std::env::var("FLASK_URL").ok()?;
    tracing::warn!("Environment variable 'FLASK_URL' is deprecated, use 'INVENTORY_URL' instead");

    let host = host.trim_end_matches('/');
    Some(match std::env::var("PORT") {
        Ok(port) if !port.is_empty() => format!("{}:{}", host, port),
        _ => host.to_string(),
    })
}
