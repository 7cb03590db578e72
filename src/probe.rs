//! ヘルスプローブ
//!
//! ターゲットへ1回のHTTP GETを発行し、結果を`ProbeOutcome`に分類する。
//! プローブは常に完了する（失敗もメトリクス値0として観測する）。

use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, warn};

use crate::types::{ProbeOutcome, ProbeResult, Target};

/// デフォルトのプローブタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// ヘルスプローバー
///
/// タイムアウト付きHTTPクライアントを1回だけ構築し、全ターゲットで使い回す。
#[derive(Clone)]
pub struct HealthProber {
    /// HTTPクライアント
    client: Client,
}

impl HealthProber {
    /// 指定タイムアウトでプローバーを作成
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// 単一ターゲットのプローブ
    ///
    /// リトライはしない。どの失敗もこの関数の中で`ProbeOutcome`に畳み込まれ、
    /// 呼び出し側へは伝播しない。
    pub async fn probe(&self, target: &Target) -> ProbeResult {
        let checked_at = Utc::now();
        let start = Instant::now();

        let outcome = match self.client.get(&target.url).send().await {
            Ok(response) if response.status().as_u16() == 200 => ProbeOutcome::Healthy,
            Ok(response) => {
                let code = response.status().as_u16();
                warn!(
                    target_name = %target.name,
                    code = code,
                    "Unexpected status code"
                );
                ProbeOutcome::UnexpectedStatus { code }
            }
            Err(e) => match e.status() {
                Some(status) => {
                    let code = status.as_u16();
                    warn!(
                        target_name = %target.name,
                        code = code,
                        "HTTP error"
                    );
                    ProbeOutcome::TransportError {
                        code: Some(code),
                        reason: e.to_string(),
                    }
                }
                None if e.is_timeout() || e.is_connect() || e.is_request() => {
                    warn!(
                        target_name = %target.name,
                        error = %e,
                        "Connection error"
                    );
                    ProbeOutcome::TransportError {
                        code: None,
                        reason: e.to_string(),
                    }
                }
                None => {
                    warn!(
                        target_name = %target.name,
                        error = %e,
                        "Unexpected error"
                    );
                    ProbeOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        };

        let latency_ms = start.elapsed().as_millis() as u32;

        if outcome.is_healthy() {
            debug!(
                target_name = %target.name,
                latency_ms = latency_ms,
                "Probe succeeded"
            );
        }

        ProbeResult {
            target: target.clone(),
            outcome,
            latency_ms,
            checked_at,
        }
    }
}

impl Default for HealthProber {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS))
    }
}
