//! axumサーバー起動・シャットダウンハンドリング

use crate::AppState;
use anyhow::Context;
use std::future::Future;
use tracing::{info, warn};

/// axumサーバーを起動し、Ctrl+C / SIGTERM まで待機する
pub async fn run(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", bind_addr))?;

    serve(state, listener, shutdown_signal()).await
}

/// バインド済みのリスナーでサーバーを起動する
///
/// `shutdown` が完了すると処理中のリクエストを捌き終えてから終了する。
pub async fn serve<F>(
    state: AppState,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db_pool = state.db_pool.clone();
    let app = crate::api::create_app(state);

    let local_addr = listener.local_addr().context("Failed to read local address")?;
    info!("Inventory server listening on {}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
