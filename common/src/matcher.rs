//! ジョブ照合
//!
//! statuses の先頭要素（見出し行）を除外し、名前がフィルタに含まれる
//! レコードの jobId を出現順に返す。

use crate::error::Result;
use crate::filter::NameFilter;
use crate::options::MatchOptions;
use crate::parser::{collect_statuses, recover_pairs};
use crate::types::{Malla, ProcessRequest, ProcessResponse, StatusRecord};
use log::debug;

/// statuses とフィルタから jobId を抽出
///
/// - 先頭要素は内容に関わらず除外
/// - name を持ち、正規化後にフィルタへ含まれるもの
/// - jobId が空でない文字列のもの
/// - 重複は除去しない
pub fn resolve(statuses: &[StatusRecord], filter: &NameFilter) -> Vec<String> {
    statuses
        .iter()
        .skip(1)
        .filter(|s| s.name.as_deref().is_some_and(|name| filter.contains(name)))
        .filter_map(|s| s.job_id.as_deref())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// POST /procesar の処理本体
///
/// 1. nombreJob をフィルタに変換（不正なら MissingFilter）
/// 2. jsonMalla から statuses を取得
/// 3. 照合
/// 4. 結果が空で jsonMalla が文字列なら、入力全体のペア走査で1回だけ再照合
pub fn process(request: &ProcessRequest, options: &MatchOptions) -> Result<ProcessResponse> {
    let filter = NameFilter::parse(request.nombre_job.as_ref(), options.normalization)?;
    let malla = Malla::from_value(request.json_malla.as_ref());
    let statuses = collect_statuses(&malla, options)?;

    let mut job_ids = resolve(&statuses, &filter);

    if job_ids.is_empty() {
        if let Some(raw) = malla.as_raw() {
            let recovered = recover_pairs(raw);
            debug!("照合結果が空のため再走査: {}件", recovered.len());
            job_ids = resolve(&recovered, &filter);
        }
    }

    debug!(
        "照合完了: statuses={}件, フィルタ={}件, jobIds={}件",
        statuses.len(),
        filter.len(),
        job_ids.len()
    );

    Ok(ProcessResponse { job_ids })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::options::Normalization;
    use serde_json::json;

    fn filter(names: &str) -> NameFilter {
        NameFilter::parse(Some(&json!(names)), Normalization::default()).unwrap()
    }

    #[test]
    fn test_resolve_skips_first() {
        let statuses = vec![
            StatusRecord::new("j0", "build"),
            StatusRecord::new("j1", "build"),
        ];
        assert_eq!(resolve(&statuses, &filter("build")), vec!["j1"]);
    }

    #[test]
    fn test_resolve_requires_name_and_non_empty_id() {
        let statuses = vec![
            StatusRecord::default(),
            StatusRecord { job_id: Some("j1".into()), name: None },
            StatusRecord { job_id: None, name: Some("build".into()) },
            StatusRecord::new("", "build"),
            StatusRecord::new("j4", "BUILD"),
        ];
        assert_eq!(resolve(&statuses, &filter("build")), vec!["j4"]);
    }

    #[test]
    fn test_resolve_keeps_order_and_duplicates() {
        let statuses = vec![
            StatusRecord::new("h", "header"),
            StatusRecord::new("j2", "deploy"),
            StatusRecord::new("j1", "build"),
            StatusRecord::new("j2", "deploy"),
        ];
        assert_eq!(resolve(&statuses, &filter("build,deploy")), vec!["j2", "j1", "j2"]);
    }

    #[test]
    fn test_resolve_empty() {
        assert!(resolve(&[], &filter("build")).is_empty());
    }

    #[test]
    fn test_process_structured() {
        let request = ProcessRequest::new(
            "build",
            Some(json!({"statuses": [{"name": "h"}, {"name": "\"Build\"", "jobId": "j1"}]})),
        );
        let response = process(&request, &MatchOptions::default()).unwrap();
        assert_eq!(response.job_ids, vec!["j1"]);
    }

    #[test]
    fn test_process_exact_normalization() {
        let request = ProcessRequest::new(
            "build",
            Some(json!({"statuses": [{"name": "h"}, {"name": "Build", "jobId": "j1"}]})),
        );
        let options = MatchOptions {
            normalization: Normalization::Exact,
            ..Default::default()
        };
        assert!(process(&request, &options).unwrap().job_ids.is_empty());
    }

    #[test]
    fn test_process_retry_when_records_lack_fields() {
        // {} 分割ではフィールドが取れないが、全体走査のペアで拾える
        let raw = "statuses=[{title=header},{ref=a1,label=build}] jobId=h name=header jobId=a1 name=build";
        let request = ProcessRequest::new("build", Some(json!(raw)));
        let response = process(&request, &MatchOptions::default()).unwrap();
        assert_eq!(response.job_ids, vec!["a1"]);
    }

    #[test]
    fn test_process_missing_filter() {
        let request = ProcessRequest {
            nombre_job: None,
            json_malla: None,
        };
        assert!(matches!(
            process(&request, &MatchOptions::default()),
            Err(Error::MissingFilter)
        ));
    }

    #[test]
    fn test_process_filter_checked_before_statuses() {
        let request = ProcessRequest {
            nombre_job: Some(json!("  ")),
            json_malla: None,
        };
        assert!(matches!(
            process(&request, &MatchOptions::strict()),
            Err(Error::MissingFilter)
        ));
    }
}
