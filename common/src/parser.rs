//! マラ文字列パーサー
//!
//! 上流が正しいJSONを保証しないため、`statuses=[{jobId=..,name=..},..]`
//! 形式の疑似シリアライズ文字列から statuses を復元する。
//!
//! 復元の優先順位（前の戦略が空のときのみ次を試す）:
//! 1. `statuses=[...]` 内の `{...}` レコード分割
//! 2. `statuses=[...]` 内の `jobId=..name=..` ペア走査
//! 3. 入力全体の `jobId=..name=..` ペア走査
//!
//! どの関数もエラーを返さない。復元できなければ空の一覧になる。

use crate::error::{Error, Result};
use crate::options::MatchOptions;
use crate::types::{Malla, StatusCollection, StatusRecord};
use log::debug;
use regex::Regex;
use serde_json::Value;

const STATUSES_MARKER: &str = "statuses=[";
const JOB_ID_KEY: &str = "jobId=";
const NAME_KEY: &str = "name=";

lazy_static::lazy_static! {
    // レコード内のフィールド（キーはレコード先頭・`{`・`,`・空白の直後、値は , か } まで）
    static ref JOB_ID_FIELD_RE: Regex = Regex::new(r"(?:^|[{,\s])jobId=([^,}]+)").unwrap();
    static ref NAME_FIELD_RE: Regex = Regex::new(r"(?:^|[{,\s])name=([^,}]+)").unwrap();
    // ペア走査用（jobIdは空白でも終端）
    static ref PAIR_JOB_ID_RE: Regex = Regex::new(r"jobId=([^,}\s]+)").unwrap();
}

/// レコードから取り出すフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    JobId,
    Name,
}

impl RecordField {
    fn pattern(self) -> &'static Regex {
        match self {
            RecordField::JobId => &JOB_ID_FIELD_RE,
            RecordField::Name => &NAME_FIELD_RE,
        }
    }
}

/// 復元戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// `statuses=[...]` 内を `{...}` 単位に分割
    BracketRecords,
    /// `statuses=[...]` 内のペア走査
    BracketPairs,
    /// 入力全体のペア走査（最終手段）
    GlobalPairs,
}

impl RecoveryStrategy {
    /// `statuses=[` を前提とする戦略
    pub const LOOSE: [RecoveryStrategy; 2] =
        [RecoveryStrategy::BracketRecords, RecoveryStrategy::BracketPairs];

    /// 全戦略（優先順）
    pub const CHAIN: [RecoveryStrategy; 3] = [
        RecoveryStrategy::BracketRecords,
        RecoveryStrategy::BracketPairs,
        RecoveryStrategy::GlobalPairs,
    ];

    /// この戦略で復元を試みる
    pub fn recover(self, input: &str) -> StatusCollection {
        match self {
            RecoveryStrategy::BracketRecords => extract_statuses_block(input)
                .map(|inner| split_records(inner).into_iter().map(parse_record).collect())
                .unwrap_or_default(),
            RecoveryStrategy::BracketPairs => extract_statuses_block(input)
                .map(recover_pairs)
                .unwrap_or_default(),
            RecoveryStrategy::GlobalPairs => recover_pairs(input),
        }
    }
}

/// 戦略を順に試し、最初に空でなかった結果を返す
fn run_chain(
    strategies: &[RecoveryStrategy],
    input: &str,
) -> (Option<RecoveryStrategy>, StatusCollection) {
    for &strategy in strategies {
        let statuses = strategy.recover(input);
        if !statuses.is_empty() {
            return (Some(strategy), statuses);
        }
    }
    (None, Vec::new())
}

/// `statuses=[...]` 部分のみを対象に復元する
///
/// # Examples
/// ```
/// use malla_common::parse_loose;
///
/// let statuses = parse_loose("x statuses=[{jobId=j1,name=build},{jobId=j2,name=deploy}] y");
/// assert_eq!(statuses.len(), 2);
/// assert_eq!(statuses[1].job_id.as_deref(), Some("j2"));
/// ```
pub fn parse_loose(input: &str) -> StatusCollection {
    run_chain(&RecoveryStrategy::LOOSE, input).1
}

/// 入力全体の走査まで含めて復元する
///
/// # Returns
/// * 採用された戦略（全て空なら None）と statuses
pub fn recover_raw(input: &str) -> (Option<RecoveryStrategy>, StatusCollection) {
    run_chain(&RecoveryStrategy::CHAIN, input)
}

/// `statuses=[` の直後から、対応する `]` の直前までを切り出す
///
/// `{}` の深さが0のときの `]` のみを終端とみなすため、
/// レコード値に含まれる `[` `]` では打ち切られない。
pub fn extract_statuses_block(input: &str) -> Option<&str> {
    let start = input.find(STATUSES_MARKER)? + STATUSES_MARKER.len();
    let mut depth = 0usize;

    for (offset, byte) in input.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            b']' if depth == 0 => return Some(&input[start..start + offset]),
            _ => {}
        }
    }
    None
}

/// トップレベルの `{...}` 単位に分割する
///
/// レコード間のカンマ・空白は読み飛ばす。閉じていない末尾は捨てる。
pub fn split_records(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    records.push(&inner[start..=i]);
                    while i + 1 < bytes.len()
                        && (bytes[i + 1] == b',' || bytes[i + 1].is_ascii_whitespace())
                    {
                        i += 1;
                    }
                    start = i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    records
}

/// レコード文字列からフィールド値を取り出す（前後の空白は除去）
pub fn extract_field(record: &str, field: RecordField) -> Option<String> {
    field
        .pattern()
        .captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn parse_record(record: &str) -> StatusRecord {
    StatusRecord {
        job_id: extract_field(record, RecordField::JobId),
        name: extract_field(record, RecordField::Name),
    }
}

/// テキスト中の `jobId=..` とそれに続く `name=..` の組を出現順に拾う
///
/// name の値は `,` `}` 改行、または次の `jobId=` の手前まで。
/// name を伴わない `jobId=` が現れた時点で走査を終える。
///
/// キー位置を先に一括で求め、値の走査範囲が重ならないようにしているので
/// 入力長に対して線形。
pub fn recover_pairs(text: &str) -> StatusCollection {
    let job_ids: Vec<_> = PAIR_JOB_ID_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .collect();
    let markers: Vec<usize> = text.match_indices(JOB_ID_KEY).map(|(i, _)| i).collect();
    let names: Vec<usize> = text
        .match_indices(NAME_KEY)
        .map(|(i, _)| i)
        .filter(|&i| has_name_value(text, i + NAME_KEY.len()))
        .collect();

    let mut records = Vec::new();
    let mut next_name = 0;
    let mut next_marker = 0;
    let mut pos = 0;

    for job_id in job_ids {
        // 前の組の jobId と name の間にあった jobId は読み飛ばす
        if job_id.start() < pos {
            continue;
        }

        while names.get(next_name).is_some_and(|&at| at < job_id.end()) {
            next_name += 1;
        }
        let Some(&name_at) = names.get(next_name) else {
            break;
        };
        next_name += 1;

        let value_start = name_at + NAME_KEY.len();
        while markers.get(next_marker).is_some_and(|&at| at < value_start) {
            next_marker += 1;
        }
        let limit = markers.get(next_marker).copied().unwrap_or(text.len());
        let value_end = text[value_start..limit]
            .find([',', '}', '\n'])
            .map_or(limit, |i| value_start + i);

        records.push(StatusRecord::new(
            job_id.as_str().trim(),
            text[value_start..value_end].trim(),
        ));
        pos = value_end;
    }

    records
}

/// `name=` の直後に値が1文字以上あるか
fn has_name_value(text: &str, value_start: usize) -> bool {
    matches!(text.as_bytes().get(value_start), Some(&b) if !matches!(b, b',' | b'}' | b'\n'))
}

/// jsonMalla から statuses を取得する
///
/// - 構造化データ: `statuses` 配列をそのまま使う
/// - 文字列: 復元戦略を順に適用
/// - 欠落/null・配列でない statuses: 寛容モードでは空、厳格モードではエラー
pub fn collect_statuses(malla: &Malla, options: &MatchOptions) -> Result<StatusCollection> {
    match malla {
        Malla::Structured(value) => match value.get("statuses").and_then(Value::as_array) {
            Some(items) => Ok(items.iter().map(StatusRecord::from_value).collect()),
            None if options.require_statuses => Err(Error::MalformedStatuses),
            None => Ok(Vec::new()),
        },
        Malla::Raw(text) => {
            let (strategy, statuses) = recover_raw(text);
            match strategy {
                Some(strategy) => {
                    debug!("statusesを復元: {:?} ({}件)", strategy, statuses.len())
                }
                None => debug!("statusesを復元できません（入力 {} bytes）", text.len()),
            }
            Ok(statuses)
        }
        Malla::Absent if options.require_statuses => Err(Error::MalformedStatuses),
        Malla::Absent => Ok(Vec::new()),
    }
}
