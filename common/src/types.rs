//! マラ（ジョブ状態一覧）の型定義
//!
//! - StatusRecord: statuses の1要素（jobId / name）
//! - Malla: リクエストで受け取った jsonMalla の分類
//! - ProcessRequest / ProcessResponse: POST /procesar の入出力

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// statuses の1要素
///
/// フィールドの欠落（パース失敗）と空文字は区別する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StatusRecord {
    pub fn new(job_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            job_id: Some(job_id.into()),
            name: Some(name.into()),
        }
    }

    /// 構造化データの1要素をそのまま読み取る（正規化はしない）
    ///
    /// - name: null/欠落以外は保持（数値・真偽値はJSON表記の文字列）
    /// - jobId: 文字列のときのみ保持
    /// - オブジェクト以外の要素は両フィールドとも None
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let name = match obj.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        let job_id = obj
            .get("jobId")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self { job_id, name }
    }
}

/// statuses 一覧（出現順を保持）
pub type StatusCollection = Vec<StatusRecord>;

/// jsonMalla の分類
#[derive(Debug, Clone, PartialEq)]
pub enum Malla {
    /// 欠落または null
    Absent,
    /// `statuses=[{...}]` 形式の生文字列
    Raw(String),
    /// 構造化データ（オブジェクト等）
    Structured(Value),
}

impl Malla {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Malla::Absent,
            Some(Value::String(s)) => Malla::Raw(s.clone()),
            Some(other) => Malla::Structured(other.clone()),
        }
    }

    /// 生文字列の場合のみ中身を返す
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Malla::Raw(s) => Some(s),
            _ => None,
        }
    }
}

/// POST /procesar のリクエストボディ
///
/// nombreJob は型チェックを後段で行うため Value のまま受け取る。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessRequest {
    pub nombre_job: Option<Value>,
    pub json_malla: Option<Value>,
}

impl ProcessRequest {
    pub fn new(nombre_job: impl Into<String>, json_malla: Option<Value>) -> Self {
        Self {
            nombre_job: Some(Value::String(nombre_job.into())),
            json_malla,
        }
    }
}

/// POST /procesar のレスポンスボディ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub job_ids: Vec<String>,
}
