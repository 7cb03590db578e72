//! 共通型定義
//!
//! Target, ProbeOutcome, ProbeResult等のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ヘルスチェック対象
///
/// 名前はメトリクス名の一部になるため、設定内で一意でなければならない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Target {
    /// ターゲット名（例: "Fargate"）
    pub name: String,
    /// チェック対象URL（http/https）
    pub url: String,
}

impl Target {
    /// 新しいターゲットを作成
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// 単一プローブの結果分類
///
/// プローブは必ずこのいずれか1つに分類される。Healthy以外はすべて
/// メトリクス値0として扱われ、バッチ処理を中断しない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// HTTP 200応答
    Healthy,
    /// 応答は受信したがステータスコードが200以外
    UnexpectedStatus {
        /// 受信したステータスコード
        code: u16,
    },
    /// リクエスト自体が失敗
    TransportError {
        /// HTTPステータスを伴うエラーの場合のみ Some
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<u16>,
        /// エラー理由
        reason: String,
    },
    /// 上記に分類できない失敗
    Failed {
        /// エラー理由
        reason: String,
    },
}

impl ProbeOutcome {
    /// メトリクス値への変換（Healthy=1、それ以外=0）
    pub fn status_value(&self) -> u8 {
        match self {
            ProbeOutcome::Healthy => 1,
            _ => 0,
        }
    }

    /// 正常応答かどうか
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy)
    }
}

/// 単一ターゲットのプローブ結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeResult {
    /// プローブしたターゲット
    pub target: Target,
    /// 結果分類
    pub outcome: ProbeOutcome,
    /// 所要時間（ミリ秒）
    pub latency_ms: u32,
    /// プローブ実施時刻
    pub checked_at: DateTime<Utc>,
}
