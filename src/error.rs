//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// 設定読み込みエラー
///
/// 起動時の設定検証で発生する。実行中のプローブ失敗はエラーではなく
/// `ProbeOutcome`として扱われる。
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    /// Target URL failed to parse or has a non-HTTP scheme
    #[error("Invalid URL for target '{name}': {url} ({reason})")]
    InvalidUrl {
        /// ターゲット名
        name: String,
        /// 不正なURL
        url: String,
        /// パース失敗理由
        reason: String,
    },

    /// Two targets share the same name
    #[error("Duplicate target name: {0}")]
    DuplicateTarget(String),

    /// Target list contains an empty name
    #[error("Empty target name in target list")]
    EmptyTargetName,
}

/// メトリクス送信エラー
#[derive(Debug, Error)]
pub enum PublishError {
    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the batch
    #[error("Metrics backend returned status {0}")]
    Backend(u16),
}
