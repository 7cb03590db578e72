//! プローブ実行ランナー
//!
//! 1回の起動で全ターゲットを順番にプローブし、結果をメトリクスバッチとして
//! 送信する。個々のプローブ失敗も送信失敗も起動自体は失敗させない
//! （ベストエフォートのテレメトリ方針）。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::metrics::{MetricBatch, MetricRecord, MetricsPublisher};
use crate::probe::HealthProber;
use crate::types::Target;

/// 正常完了時のメッセージ
const COMPLETION_MESSAGE: &str = "Metrics published successfully.";

/// ランナーの完了レスポンス
///
/// プローブ結果や送信可否に関わらず、正常完了では常に同一内容を返す。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResponse {
    /// HTTPステータス相当のコード（常に200）
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSONエンコード済みの確認メッセージ
    pub body: String,
}

impl RunResponse {
    /// 固定の成功レスポンスを作成
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: Value::String(COMPLETION_MESSAGE.to_string()).to_string(),
        }
    }
}

/// ヘルスプローブランナー
///
/// ターゲット列・プローバー・メトリクス送信能力を注入して構築する。
pub struct HealthProbeRunner<P: MetricsPublisher> {
    targets: Vec<Target>,
    prober: HealthProber,
    publisher: P,
    namespace: String,
}

impl<P: MetricsPublisher> HealthProbeRunner<P> {
    /// 新しいランナーを作成
    pub fn new(
        targets: Vec<Target>,
        prober: HealthProber,
        publisher: P,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            targets,
            prober,
            publisher,
            namespace: namespace.into(),
        }
    }

    /// 1回分の実行
    ///
    /// トリガーイベントは外部スケジューラから渡される不透明な値で、内容は使わない。
    /// ターゲットごとに1レコードを設定順で生成し、空でなければ1回のバッチ
    /// 呼び出しで送信する。送信失敗はログに残すだけで、戻り値は変わらない。
    pub async fn run(&self, _event: Value) -> RunResponse {
        let mut metric_data = Vec::with_capacity(self.targets.len());

        for target in &self.targets {
            let result = self.prober.probe(target).await;
            metric_data.push(MetricRecord::from_result(&result));
        }

        if metric_data.is_empty() {
            debug!("No targets configured, skipping metric submission");
        } else {
            match self
                .publisher
                .put_metric_data(&self.namespace, &metric_data)
                .await
            {
                Ok(()) => {
                    let batch = MetricBatch {
                        namespace: self.namespace.clone(),
                        metric_data: metric_data.clone(),
                    };
                    info!(
                        payload = %serde_json::to_string(&batch).unwrap_or_default(),
                        "Successfully sent metrics"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to send metrics to backend");
                }
            }
        }

        RunResponse::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// 送信内容を記録するテストダブル
    #[derive(Default)]
    struct RecordingPublisher {
        calls: Mutex<Vec<(String, Vec<MetricRecord>)>>,
        fail: bool,
    }

    #[async_trait]
    impl MetricsPublisher for RecordingPublisher {
        async fn put_metric_data(
            &self,
            namespace: &str,
            data: &[MetricRecord],
        ) -> Result<(), PublishError> {
            self.calls
                .lock()
                .unwrap()
                .push((namespace.to_string(), data.to_vec()));
            if self.fail {
                return Err(PublishError::Backend(500));
            }
            Ok(())
        }
    }

    #[test]
    fn test_success_response_shape() {
        let response = RunResponse::success();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "\"Metrics published successfully.\"");

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"statusCode":200,"body":"\"Metrics published successfully.\""}"#
        );
    }

    #[tokio::test]
    async fn test_empty_target_list_skips_submission() {
        let publisher = RecordingPublisher::default();
        let runner = HealthProbeRunner::new(
            Vec::new(),
            HealthProber::default(),
            publisher,
            "URLHealthCheck",
        );

        let response = runner.run(Value::Null).await;

        assert_eq!(response, RunResponse::success());
        assert!(runner.publisher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_record_per_target_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let targets = vec![
            Target::new("A", format!("{}/a", server.uri())),
            Target::new("B", format!("{}/b", server.uri())),
        ];
        let runner = HealthProbeRunner::new(
            targets,
            HealthProber::default(),
            RecordingPublisher::default(),
            "URLHealthCheck",
        );

        let response = runner.run(Value::Null).await;
        assert_eq!(response, RunResponse::success());

        let calls = runner.publisher.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (namespace, records) = &calls[0];
        assert_eq!(namespace, "URLHealthCheck");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].metric_name, "AStatusCode");
        assert_eq!(records[0].value, 1);
        assert_eq!(records[1].metric_name, "BStatusCode");
        assert_eq!(records[1].value, 0);
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_change_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let publisher = RecordingPublisher {
            fail: true,
            ..Default::default()
        };
        let runner = HealthProbeRunner::new(
            vec![Target::new("A", server.uri())],
            HealthProber::default(),
            publisher,
            "URLHealthCheck",
        );

        let response = runner.run(Value::Null).await;

        assert_eq!(response, RunResponse::success());
        assert_eq!(runner.publisher.calls.lock().unwrap().len(), 1);
    }
}
