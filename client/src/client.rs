//! 在庫サーバーHTTPクライアント
//!
//! サーバーの各ルートを型付きメソッドとして公開する。

use inventory_common::config::ClientConfig;
use inventory_common::protocol::{
    HealthResponse, ItemRequest, ListResponse, RemoveItemRequest, StatusResponse,
};
use inventory_common::types::{
    Created, DeleteLogEntry, Deleted, Item, LogRange, TransformKind, TransformReport, Updated,
    UpdateLogEntry,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// クライアントエラー
#[derive(Debug, Error)]
pub enum ClientError {
    /// 接続・送受信の失敗
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// サーバーがエラーステータスを返した
    #[error("Server returned {status}: {message}")]
    Api {
        /// HTTPステータス
        status: StatusCode,
        /// サーバーのメッセージ
        message: String,
    },

    /// クライアント設定の不備
    #[error("Configuration error: {0}")]
    Config(String),

    /// 送信前に検出した不正な操作
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// サーバーが返したステータス（API エラーの場合のみ）
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias (Client)
pub type ClientResult<T> = Result<T, ClientError>;

/// 返品操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// 数量を1減らした
    Updated(Updated),
    /// 最後の1個だったため削除した
    Removed(Deleted),
}

/// 在庫サーバークライアント
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http_client: Client,
    base_url: String,
}

impl InventoryClient {
    /// ベースURLを指定して作成（タイムアウト30秒）
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// 設定から作成
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// ベースURL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 全アイテム一覧
    pub async fn list_items(&self) -> ClientResult<Vec<Item>> {
        let response: ListResponse<Item> =
            send(self.http_client.get(self.url("get-all-items"))).await?;
        Ok(response.res)
    }

    /// 名前でアイテムを検索
    pub async fn find_item(&self, name: &str) -> ClientResult<Option<Item>> {
        let items = self.list_items().await?;
        Ok(items.into_iter().find(|item| item.name == name))
    }

    /// アイテムを追加
    pub async fn add_item(&self, name: &str, quantity: i64) -> ClientResult<Created> {
        let request = self
            .http_client
            .post(self.url("add-item"))
            .json(&ItemRequest::new(name, quantity));
        send_with_data(request).await
    }

    /// 数量を更新
    pub async fn update_quantity(&self, name: &str, quantity: i64) -> ClientResult<Updated> {
        let request = self
            .http_client
            .put(self.url("update-quantity"))
            .json(&ItemRequest::new(name, quantity));
        send_with_data(request).await
    }

    /// アイテムを削除
    pub async fn remove_item(&self, name: &str) -> ClientResult<Deleted> {
        let request = self
            .http_client
            .delete(self.url("remove-item"))
            .json(&RemoveItemRequest::new(name));
        send_with_data(request).await
    }

    /// 購入（数量+1）
    pub async fn buy_item(&self, name: &str) -> ClientResult<Updated> {
        let item = self.require_item(name).await?;
        let quantity = item.quantity.checked_add(1).ok_or_else(|| {
            ClientError::InvalidInput(format!("quantity of '{}' is already at the maximum", name))
        })?;
        self.update_quantity(name, quantity).await
    }

    /// 返品（数量-1、残り1個以下なら削除）
    pub async fn return_item(&self, name: &str) -> ClientResult<ReturnOutcome> {
        let item = self.require_item(name).await?;
        if item.quantity <= 1 {
            return self.remove_item(name).await.map(ReturnOutcome::Removed);
        }
        self.update_quantity(name, item.quantity - 1)
            .await
            .map(ReturnOutcome::Updated)
    }

    async fn require_item(&self, name: &str) -> ClientResult<Item> {
        self.find_item(name).await?.ok_or_else(|| ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: format!("Item not found: {}", name),
        })
    }

    /// 数量更新履歴
    pub async fn update_logs(&self, range: &LogRange) -> ClientResult<Vec<UpdateLogEntry>> {
        let request = self
            .http_client
            .get(self.url("get-update-logs"))
            .query(&range_query(range));
        let response: ListResponse<UpdateLogEntry> = send(request).await?;
        Ok(response.res)
    }

    /// 削除履歴
    pub async fn delete_logs(&self, range: &LogRange) -> ClientResult<Vec<DeleteLogEntry>> {
        let request = self
            .http_client
            .get(self.url("get-delete-logs"))
            .query(&range_query(range));
        let response: ListResponse<DeleteLogEntry> = send(request).await?;
        Ok(response.res)
    }

    /// トランスフォーム報告を送信し、サーバーのメッセージを返す
    pub async fn send_transform(
        &self,
        kind: TransformKind,
        report: &TransformReport,
    ) -> ClientResult<String> {
        let request = self.http_client.post(self.url(kind.as_str())).json(report);
        let response: StatusResponse = send(request).await?;
        Ok(response.message)
    }

    /// ヘルスチェック
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        send(self.http_client.get(self.url("health"))).await
    }
}

fn range_query(range: &LogRange) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(from) = range.from {
        query.push(("_from", from.to_rfc3339()));
    }
    if let Some(to) = range.to {
        query.push(("_to", to.to_rfc3339()));
    }
    query
}

async fn send_with_data<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
    let response: StatusResponse<T> = send(request).await?;
    response.data.ok_or_else(|| ClientError::Api {
        status: StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK),
        message: format!("response has no data: {}", response.message),
    })
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
    let response = request.send().await?;
    let status = response.status();
    debug!(status = status.as_u16(), url = %response.url(), "Inventory API response");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status,
            message: error_message(status, &body),
        });
    }

    Ok(response.json().await?)
}

/// エラーボディからメッセージを取り出す（JSONでなければ本文かステータス名）
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<StatusResponse<serde_json::Value>>(body) {
        return parsed.message;
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
