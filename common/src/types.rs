//! 共通型定義
//!
//! 在庫アイテム、監査ログエントリ、書き込み結果、トランスフォーム報告

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// 在庫アイテム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 自動採番ID
    pub id: i64,
    /// アイテム名（一意）
    pub name: String,
    /// 数量（0以上）
    pub quantity: i64,
    /// 登録日時
    pub created_at: DateTime<Utc>,
}

/// 数量更新ログ
///
/// `item_name` は外部キーではないため、アイテム削除後も残る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLogEntry {
    /// ログID
    pub id: i64,
    /// 対象アイテム名
    pub item_name: String,
    /// 変更前の数量
    pub old_quantity: i64,
    /// 変更後の数量
    pub new_quantity: i64,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

/// 削除ログ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteLogEntry {
    /// ログID
    pub id: i64,
    /// 削除されたアイテム名
    pub item_name: String,
    /// 削除直前の数量
    pub quantity: i64,
    /// 削除日時
    pub deleted_at: DateTime<Utc>,
}

/// アイテム追加結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    /// 採番されたID
    pub id: i64,
}

/// 数量更新結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Updated {
    /// 対象アイテム名
    pub name: String,
    /// 変更前の数量
    pub old_quantity: i64,
    /// 変更後の数量
    pub new_quantity: i64,
    /// 更新ログが書き込まれたか（同値更新ではfalse）
    pub logged: bool,
}

/// アイテム削除結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    /// 削除されたアイテム名
    pub name: String,
    /// 削除直前の数量
    pub quantity: i64,
}

/// 監査ログ検索範囲（両端を含む）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRange {
    /// 開始日時（この時刻以降）
    pub from: Option<DateTime<Utc>>,
    /// 終了日時（この時刻以前）
    pub to: Option<DateTime<Utc>>,
}

impl LogRange {
    /// 範囲指定なし（全件）
    pub fn all() -> Self {
        Self::default()
    }

    /// 両端を指定した範囲
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// 開始日時のみ
    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// 終了日時のみ
    pub fn until(to: DateTime<Utc>) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    /// 範囲内の時刻かどうか
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at <= to)
    }

    /// クエリ文字列の値から範囲を組み立てる
    ///
    /// 空文字列は「指定なし」として扱う。
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, InventoryError> {
        Ok(Self {
            from: parse_optional_timestamp(from)?,
            to: parse_optional_timestamp(to)?,
        })
    }
}

fn parse_optional_timestamp(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, InventoryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value).map(Some),
    }
}

/// タイムスタンプ文字列をUTC日時に変換
///
/// 受け付ける形式:
/// * RFC 3339（`2024-05-01T10:00:00Z`）。`+` が空白に化けたオフセットも可
/// * `YYYY-MM-DD HH:MM:SS`（UTCとみなす）
/// * `YYYY-MM-DD`（その日の0時UTC）
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, InventoryError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    // 未エンコードのクエリでは `+02:00` の `+` が空白として届く
    if let Some((date_time, offset)) = value.rsplit_once(' ') {
        if date_time.contains('T') {
            if let Ok(dt) = DateTime::parse_from_rfc3339(&format!("{}+{}", date_time, offset)) {
                return Ok(dt.with_timezone(&Utc));
            }
        }
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(naive) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(naive.and_utc());
    }
    Err(InventoryError::InvalidInput(format!(
        "Invalid timestamp '{}': expected RFC 3339, 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DD'",
        value
    )))
}

/// 3Dオブジェクトのトランスフォーム報告の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// 位置・回転・スケールのいずれか
    Transform,
    /// 位置のみ
    Translation,
    /// 回転のみ
    Rotation,
    /// スケールのみ
    Scale,
}

impl TransformKind {
    /// ルートパス（先頭スラッシュなし）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Translation => "translation",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        }
    }

    /// 文字列から変換
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "transform" => Some(Self::Transform),
            "translation" | "position" => Some(Self::Translation),
            "rotation" | "rotate" => Some(Self::Rotation),
            "scale" => Some(Self::Scale),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 3Dプラグインから送られるトランスフォーム報告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformReport {
    /// 対応するアイテム名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    /// オブジェクトに反映された数量
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// 位置 (x, y, z)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 3]>,
    /// 回転（オイラー角, ラジアン）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 3]>,
    /// スケール
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
}

impl TransformReport {
    /// 報告の種類に必要な成分が揃っているか検証
    pub fn validate(&self, kind: TransformKind) -> Result<(), InventoryError> {
        let present = match kind {
            TransformKind::Transform => {
                self.position.is_some() || self.rotation.is_some() || self.scale.is_some()
            }
            TransformKind::Translation => self.position.is_some(),
            TransformKind::Rotation => self.rotation.is_some(),
            TransformKind::Scale => self.scale.is_some(),
        };
        if !present {
            return Err(InventoryError::InvalidInput(format!(
                "No {} data received",
                kind
            )));
        }
        Ok(())
    }
}
