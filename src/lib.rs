//! URL Healthcheck Runner
//!
//! スケジュール起動でURL群をヘルスチェックし、結果をメトリクスとして送信する

#![warn(missing_docs)]

/// CLI定義
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型定義
pub mod error;

/// ロギング初期化ユーティリティ
pub mod logging;

/// メトリクスレコードと送信クライアント
pub mod metrics;

/// ヘルスプローブ（HTTP GETによる死活判定）
pub mod probe;

/// プローブ実行ランナー
pub mod runner;

/// 共通型定義
pub mod types;
