//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to deprecated variable names with warning logs, and the server-side
//! configuration loader built on top of [`ServerConfig::load`].

use inventory_common::config::ServerConfig;
use inventory_common::error::CommonResult;
use std::path::Path;

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Arguments
/// * `new_name` - The new environment variable name (preferred)
/// * `old_name` - The deprecated environment variable name (fallback)
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - Neither variable is set
///
/// # Example
/// ```
/// use inventory_server::config::get_env_with_fallback;
///
/// let host = get_env_with_fallback("INVENTORY_HOST", "FLASK_HOST");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Values that fail to parse are ignored with a warning.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
) -> Option<T> {
    let raw = get_env_with_fallback(new_name, old_name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparsable value '{}' for '{}'", raw, new_name);
            None
        }
    }
}

/// サーバー設定を読み込む
///
/// デフォルト値 → 設定ファイル → `INVENTORY_*` 環境変数 の順に重ね、
/// 旧名の `FLASK_HOST` / `FLASK_PORT` も非推奨警告付きで受け付ける。
pub fn load_server_config(path: Option<&Path>) -> CommonResult<ServerConfig> {
    let mut config = ServerConfig::load(path)?;
    apply_legacy_env(&mut config);
    Ok(config)
}

/// 旧環境変数名を反映する（新しい名前が設定されていればそちらが優先）
fn apply_legacy_env(config: &mut ServerConfig) {
    if let Some(host) = get_env_with_fallback("INVENTORY_HOST", "FLASK_HOST") {
        config.host = host;
    }
    if let Some(port) = get_env_with_fallback_parse("INVENTORY_PORT", "FLASK_PORT") {
        config.port = port;
    }
}
