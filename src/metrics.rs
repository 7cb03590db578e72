//! メトリクスレコードと送信クライアント
//!
//! プローブ結果から導出したメトリクスを、バックエンドのput-metric-data
//! 互換JSONとして1回のバッチ呼び出しで送信する。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PublishError;
use crate::types::ProbeResult;

/// メトリクスのディメンション（Name/Valueペア）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    /// ディメンション名
    pub name: String,
    /// ディメンション値
    pub value: String,
}

/// 単一メトリクスレコード
///
/// ワイヤ形式はバックエンドのput-metric-data互換
/// （`MetricName` / `Dimensions` / `Unit` / `Value`）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct MetricRecord {
    /// メトリクス名（"<ターゲット名>StatusCode"）
    pub metric_name: String,
    /// ディメンション一覧（対象URLのみ）
    pub dimensions: Vec<Dimension>,
    /// 単位
    pub unit: String,
    /// メトリクス値（0または1）
    pub value: u8,
}

impl MetricRecord {
    /// プローブ結果からレコードを導出する
    pub fn from_result(result: &ProbeResult) -> Self {
        Self {
            metric_name: format!("{}StatusCode", result.target.name),
            dimensions: vec![Dimension {
                name: "URL".to_string(),
                value: result.target.url.clone(),
            }],
            unit: "Count".to_string(),
            value: result.outcome.status_value(),
        }
    }
}

/// バッチ送信ペイロード
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct MetricBatch {
    /// メトリクスのネームスペース
    pub namespace: String,
    /// レコード一覧（ターゲット設定順）
    pub metric_data: Vec<MetricRecord>,
}

/// メトリクスバックエンドへの送信能力
///
/// ランナーには実装を注入する。テストでは記録用ダブルに差し替えられる。
#[async_trait]
pub trait MetricsPublisher: Send + Sync {
    /// 全レコードを1回のバッチ呼び出しで送信する
    async fn put_metric_data(
        &self,
        namespace: &str,
        data: &[MetricRecord],
    ) -> Result<(), PublishError>;
}

/// HTTPメトリクスバックエンドクライアント
///
/// 設定されたインジェスションエンドポイントへバッチJSONをPOSTする。
#[derive(Clone)]
pub struct HttpMetricsPublisher {
    client: Client,
    endpoint: String,
}

impl HttpMetricsPublisher {
    /// 新しいクライアントを作成
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl MetricsPublisher for HttpMetricsPublisher {
    async fn put_metric_data(
        &self,
        namespace: &str,
        data: &[MetricRecord],
    ) -> Result<(), PublishError> {
        let batch = MetricBatch {
            namespace: namespace.to_string(),
            metric_data: data.to_vec(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&batch)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Backend(status.as_u16()));
        }

        debug!(
            namespace = namespace,
            records = data.len(),
            "Metric batch accepted by backend"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProbeOutcome, Target};
    use chrono::Utc;

    fn result_for(name: &str, url: &str, outcome: ProbeOutcome) -> ProbeResult {
        ProbeResult {
            target: Target::new(name, url),
            outcome,
            latency_ms: 12,
            checked_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_from_healthy_result() {
        let record =
            MetricRecord::from_result(&result_for("Fargate", "http://ok.test", ProbeOutcome::Healthy));

        assert_eq!(record.metric_name, "FargateStatusCode");
        assert_eq!(record.unit, "Count");
        assert_eq!(record.value, 1);
        assert_eq!(record.dimensions.len(), 1);
        assert_eq!(record.dimensions[0].name, "URL");
        assert_eq!(record.dimensions[0].value, "http://ok.test");
    }

    #[test]
    fn test_record_from_unhealthy_result() {
        let record = MetricRecord::from_result(&result_for(
            "EC2",
            "http://down.test",
            ProbeOutcome::UnexpectedStatus { code: 503 },
        ));

        assert_eq!(record.metric_name, "EC2StatusCode");
        assert_eq!(record.value, 0);
    }

    #[test]
    fn test_record_wire_format() {
        let record =
            MetricRecord::from_result(&result_for("A", "http://ok.test", ProbeOutcome::Healthy));
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"MetricName\":\"AStatusCode\""));
        assert!(json.contains("\"Dimensions\":[{\"Name\":\"URL\",\"Value\":\"http://ok.test\"}]"));
        assert!(json.contains("\"Unit\":\"Count\""));
        assert!(json.contains("\"Value\":1"));
    }

    #[test]
    fn test_batch_wire_format() {
        let batch = MetricBatch {
            namespace: "URLHealthCheck".to_string(),
            metric_data: vec![MetricRecord::from_result(&result_for(
                "A",
                "http://ok.test",
                ProbeOutcome::Healthy,
            ))],
        };
        let json = serde_json::to_string(&batch).unwrap();

        assert!(json.contains("\"Namespace\":\"URLHealthCheck\""));
        assert!(json.contains("\"MetricData\":["));
    }
}
