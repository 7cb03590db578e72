//! 設定管理
//!
//! 環境変数からプロセス起動時に1回だけ構築する設定オブジェクト。
//! 必須キーの欠落や不正URLは起動時に検出する（ターゲットループ内では失敗させない）。
//!
//! 認識するキー:
//! - `HEALTHCHECK_TARGETS` — ターゲット名のカンマ区切りリスト（必須、空文字列可）
//! - `<NAME>_URL` — 各ターゲットのURL（名前を大文字化したキー、必須）
//! - `HEALTHCHECK_METRICS_URL` — メトリクスバックエンドのエンドポイント（必須）
//! - `HEALTHCHECK_NAMESPACE` — ネームスペース（デフォルト: "URLHealthCheck"）
//! - `HEALTHCHECK_TIMEOUT_SECS` — プローブタイムアウト秒（デフォルト: 10）

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::probe::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::types::Target;

/// ターゲット名リストの環境変数キー
pub const ENV_TARGETS: &str = "HEALTHCHECK_TARGETS";
/// メトリクスエンドポイントの環境変数キー
pub const ENV_METRICS_URL: &str = "HEALTHCHECK_METRICS_URL";
/// ネームスペースの環境変数キー
pub const ENV_NAMESPACE: &str = "HEALTHCHECK_NAMESPACE";
/// タイムアウト秒の環境変数キー
pub const ENV_TIMEOUT_SECS: &str = "HEALTHCHECK_TIMEOUT_SECS";

/// デフォルトのメトリクスネームスペース
pub const DEFAULT_NAMESPACE: &str = "URLHealthCheck";

/// Get an environment variable with a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable, parsing to a specific type
///
/// Returns the default if the variable is not set or fails to parse.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// プローブランナー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeConfig {
    /// チェック対象（設定順を保持）
    pub targets: Vec<Target>,
    /// メトリクスバックエンドのインジェスションURL
    pub metrics_url: String,
    /// メトリクスのネームスペース
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// プローブタイムアウト（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_PROBE_TIMEOUT_SECS
}

impl ProbeConfig {
    /// 環境変数から設定を構築する
    ///
    /// 必須キーの欠落・不正URL・名前の重複はここでエラーになる（fail fast）。
    pub fn from_env() -> Result<Self, ConfigError> {
        let names = std::env::var(ENV_TARGETS)
            .map_err(|_| ConfigError::MissingEnv(ENV_TARGETS.to_string()))?;

        let mut targets = Vec::new();
        if !names.trim().is_empty() {
            for raw in names.split(',') {
                let name = raw.trim();
                if name.is_empty() {
                    return Err(ConfigError::EmptyTargetName);
                }
                if targets.iter().any(|t: &Target| t.name == name) {
                    return Err(ConfigError::DuplicateTarget(name.to_string()));
                }

                let url_key = format!("{}_URL", name.to_uppercase());
                let url = std::env::var(&url_key)
                    .map_err(|_| ConfigError::MissingEnv(url_key.clone()))?;
                validate_url(name, &url)?;

                targets.push(Target::new(name, url));
            }
        }

        let metrics_url = std::env::var(ENV_METRICS_URL)
            .map_err(|_| ConfigError::MissingEnv(ENV_METRICS_URL.to_string()))?;
        validate_url("metrics backend", &metrics_url)?;

        Ok(Self {
            targets,
            metrics_url,
            namespace: get_env_or(ENV_NAMESPACE, DEFAULT_NAMESPACE),
            timeout_secs: get_env_parse(ENV_TIMEOUT_SECS, DEFAULT_PROBE_TIMEOUT_SECS),
        })
    }
}

/// URLが構文的に正しいhttp(s) URLか検証する
fn validate_url(name: &str, url: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        name: name.to_string(),
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            name: name.to_string(),
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
