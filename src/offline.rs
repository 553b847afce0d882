//! CLIからのオフライン照合
//!
//! サーバを介さずにファイル/文字列のマラを照合する。

use crate::cli::MatchArgs;
use crate::error::{MallaJobsError, Result};
use malla_common::{MatchOptions, ProcessRequest, ProcessResponse};
use serde_json::Value;
use std::path::Path;

/// CLI引数で照合オプションを上書き
pub fn apply_match_args(mut options: MatchOptions, args: &MatchArgs) -> MatchOptions {
    if args.strict {
        options.require_statuses = true;
    }
    if let Some(normalization) = args.normalization {
        options.normalization = normalization;
    }
    options
}

/// マラを読み込む
///
/// ファイルはJSONとして読めればそのまま、読めなければ生文字列として扱う。
pub fn load_malla(input: Option<&Path>, raw: Option<&str>) -> Result<Value> {
    if let Some(text) = raw {
        return Ok(Value::String(text.to_string()));
    }

    let path = input.ok_or(MallaJobsError::MissingInput)?;
    if !path.exists() {
        return Err(MallaJobsError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str::<Value>(&content).unwrap_or(Value::String(content)))
}

/// 照合を実行
pub fn run_match(filter: &str, malla: Value, options: &MatchOptions) -> Result<ProcessResponse> {
    let request = ProcessRequest::new(filter, Some(malla));
    Ok(malla_common::process(&request, options)?)
}
