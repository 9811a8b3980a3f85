//! 通信プロトコル定義
//!
//! クライアント↔サーバー間のHTTP JSONメッセージ

use serde::{Deserialize, Serialize};

/// アイテム追加・数量更新リクエスト
///
/// 必須項目の欠落はサーバー側で `InvalidInput` として扱うため、
/// 全フィールドを `Option` で受ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// アイテム名
    #[serde(default)]
    pub name: Option<String>,
    /// 数量
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl ItemRequest {
    /// 名前と数量を指定して作成
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: Some(name.into()),
            quantity: Some(quantity),
        }
    }
}

/// アイテム削除リクエスト
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItemRequest {
    /// アイテム名
    #[serde(default)]
    pub name: Option<String>,
}

impl RemoveItemRequest {
    /// 名前を指定して作成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// 監査ログ検索のクエリパラメータ
///
/// 旧クライアント互換のため `_from` / `_to` も受け付ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQueryParams {
    /// 開始日時
    #[serde(
        default,
        rename = "_from",
        alias = "from",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<String>,
    /// 終了日時
    #[serde(
        default,
        rename = "_to",
        alias = "to",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<String>,
}

/// 書き込み系・エラー時の共通レスポンス `{status, message, data?}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse<T = ()> {
    /// HTTPステータスコード
    pub status: u16,
    /// メッセージ
    pub message: String,
    /// 付加データ（作成ID、更新結果など）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl StatusResponse<()> {
    /// データなしのレスポンス
    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> StatusResponse<T> {
    /// データ付きのレスポンス
    pub fn with_data(status: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 一覧取得系レスポンス `{message, res}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// メッセージ（0件の場合は "No records found"）
    pub message: String,
    /// 結果行
    pub res: Vec<T>,
}

/// 0件時のメッセージ
pub const NO_RECORDS_MESSAGE: &str = "No records found";

/// ヘルスチェックレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 状態（常に "ok"）
    pub status: String,
    /// サーバーバージョン
    pub version: String,
}
