//! 設定管理
//!
//! ServerConfig, ClientConfig等の設定構造体
//!
//! 読み込み優先順位（後勝ち）:
//! 1. 各フィールドのデフォルト値
//! 2. 設定ファイル（TOML、任意）
//! 3. `INVENTORY_` プレフィックスの環境変数

use crate::error::CommonResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 環境変数プレフィックス
pub const ENV_PREFIX: &str = "INVENTORY";

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// ホストアドレス (デフォルト: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// データベースURL (デフォルト: "sqlite://inventory.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://inventory.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
        }
    }
}

impl ServerConfig {
    /// 設定ファイルと環境変数から読み込む
    pub fn load(path: Option<&Path>) -> CommonResult<Self> {
        load_layered(path, &[])
    }

    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// クライアント設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// サーバーのベースURL (デフォルト: "http://127.0.0.1:8000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// リクエストタイムアウト（秒）(デフォルト: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// 設定ファイルと環境変数から読み込む
    ///
    /// `INVENTORY_URL` は `INVENTORY_BASE_URL` より優先する。
    pub fn load(path: Option<&Path>) -> CommonResult<Self> {
        let mut overrides = Vec::new();
        if let Ok(url) = std::env::var(format!("{}_URL", ENV_PREFIX)) {
            overrides.push(("base_url", url));
        }
        load_layered(path, &overrides)
    }
}

fn load_layered<T: serde::de::DeserializeOwned>(
    path: Option<&Path>,
    overrides: &[(&str, String)],
) -> CommonResult<T> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));
    for (key, value) in overrides {
        builder = builder.set_override(*key, value.as_str())?;
    }
    Ok(builder.build()?.try_deserialize()?)
}
