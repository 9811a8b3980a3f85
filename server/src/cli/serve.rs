//! serve サブコマンド
//!
//! 在庫サーバーを起動します。

use crate::config::load_server_config;
use crate::db::migrations::initialize_database;
use crate::AppState;
use clap::Args;
use inventory_common::config::ServerConfig;
use std::path::PathBuf;
use tracing::info;

/// serve サブコマンドの引数
///
/// 指定しなかった項目は設定ファイルと環境変数から決まる。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(short, long, env = "INVENTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bind address
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Database URL (e.g. sqlite://inventory.db)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// 設定を解決する（CLI引数が最優先）
    pub fn resolve(&self) -> anyhow::Result<ServerConfig> {
        let mut config = load_server_config(self.config.as_deref())?;
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database_url) = &self.database_url {
            config.database_url = database_url.clone();
        }
        Ok(config)
    }
}

/// サーバーを起動し、終了まで待機する
pub async fn execute(args: &ServeArgs) -> anyhow::Result<()> {
    let config = args.resolve()?;
    info!(
        database_url = %config.database_url,
        "Starting inventory server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db_pool = initialize_database(&config.database_url).await?;
    let state = AppState::new(db_pool);

    crate::server::run(state, &config.bind_addr()).await
}
