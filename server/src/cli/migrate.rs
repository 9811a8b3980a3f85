//! migrate サブコマンド
//!
//! データベースを作成してマイグレーションを適用し、終了します。

use crate::config::load_server_config;
use crate::db::migrations::initialize_database;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// migrate サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct MigrateArgs {
    /// TOML configuration file
    #[arg(short, long, env = "INVENTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database URL (e.g. sqlite://inventory.db)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// マイグレーションを実行する
pub async fn execute(args: &MigrateArgs) -> anyhow::Result<()> {
    let database_url = match &args.database_url {
        Some(url) => url.clone(),
        None => load_server_config(args.config.as_deref())?.database_url,
    };

    let pool = initialize_database(&database_url).await?;
    pool.close().await;

    info!("Database is up to date: {}", database_url);
    Ok(())
}
