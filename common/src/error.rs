//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `InventoryError` はストア操作の結果を4種類に分類する。
//! HTTP層はこの分類だけでレスポンスコードを決定できる。

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for CommonError {
    fn from(err: config::ConfigError) -> Self {
        CommonError::Config(err.to_string())
    }
}

/// Inventory store error type
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Malformed or missing required fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Name collision on add
    #[error("Item already exists: {0}")]
    Duplicate(String),

    /// Update/delete on an unknown name
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Underlying storage engine failure
    #[error("Database error: {0}")]
    Storage(String),
}

/// Error category, stable across message changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`InventoryError::InvalidInput`]
    InvalidInput,
    /// See [`InventoryError::Duplicate`]
    Duplicate,
    /// See [`InventoryError::NotFound`]
    NotFound,
    /// See [`InventoryError::Storage`]
    Storage,
}

impl InventoryError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Returns a message that is safe to send to external clients.
    ///
    /// Storage failures are reported generically; their full text belongs in
    /// server logs only. The other kinds keep their detail so the caller can
    /// correct the request.
    pub fn external_message(&self) -> String {
        match self {
            Self::Storage(_) => "Database error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (Inventory)
pub type InventoryResult<T> = Result<T, InventoryError>;
