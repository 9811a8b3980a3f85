//! ロギング初期化
//!
//! * `INVENTORY_LOG_LEVEL`（なければ `RUST_LOG`、既定 `info`）でフィルタ
//! * `INVENTORY_LOG_FORMAT=json` でJSON出力
//! * `INVENTORY_LOG_DIR` を指定すると日次ローテーションのファイルにも出力

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "inventory-server.log";

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人間向けテキスト
    Text,
    /// 1行1JSON
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

fn env_filter() -> EnvFilter {
    let directives = std::env::var("INVENTORY_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// グローバルsubscriberを設定する
///
/// ファイル出力が有効な場合は `WorkerGuard` を返す。プロセス終了まで保持すること。
pub fn init() -> anyhow::Result<Option<WorkerGuard>> {
    let format = LogFormat::from_env_value(std::env::var("INVENTORY_LOG_FORMAT").ok().as_deref());
    let log_dir = std::env::var("INVENTORY_LOG_DIR").ok().filter(|d| !d.is_empty());

    let stdout_layer = match format {
        LogFormat::Json => fmt::layer().json().with_target(false).boxed(),
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(guard)
}
