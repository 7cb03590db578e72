//! ロギング初期化
//!
//! tracing-subscriberによる構造化ログの初期化。
//! `RUST_LOG`でフィルタを上書きできる（デフォルト: info）。

use tracing_subscriber::EnvFilter;

/// ロギングを初期化する
///
/// 二重初期化（テスト等）の場合はエラーを返す。
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()?;

    Ok(())
}
