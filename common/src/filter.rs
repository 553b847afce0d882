//! ジョブ名フィルタ
//!
//! nombreJob（カンマ区切り）を正規化済みの名前集合に変換する。

use crate::error::{Error, Result};
use crate::options::Normalization;
use serde_json::Value;
use std::collections::HashSet;

/// 名前を正規化する
///
/// # Examples
/// ```
/// use malla_common::{normalize_name, Normalization};
///
/// assert_eq!(normalize_name(" \"Build\" ", Normalization::TrimQuoteCasefold), "build");
/// assert_eq!(normalize_name(" Build ", Normalization::Trim), "Build");
/// ```
pub fn normalize_name(raw: &str, normalization: Normalization) -> String {
    match normalization {
        Normalization::Exact => raw.to_string(),
        Normalization::Trim => raw.trim().to_string(),
        Normalization::TrimQuoteCasefold => {
            let trimmed = raw.trim();
            let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
            let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
            trimmed.to_lowercase()
        }
    }
}

/// 正規化済みのジョブ名集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter {
    names: HashSet<String>,
    normalization: Normalization,
}

impl NameFilter {
    /// nombreJob の値からフィルタを生成
    ///
    /// # Returns
    /// * `Err(Error::MissingFilter)` - 欠落・文字列以外・空白のみ
    pub fn parse(raw: Option<&Value>, normalization: Normalization) -> Result<Self> {
        let text = match raw {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => return Err(Error::MissingFilter),
        };
        Ok(Self::from_names(text.split(','), normalization))
    }

    /// 名前の列から生成（空要素は除外）
    pub fn from_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
        normalization: Normalization,
    ) -> Self {
        let names = names
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| normalize_name(s, normalization))
            .collect();
        Self { names, normalization }
    }

    /// 候補名を同じ規則で正規化して照合
    pub fn contains(&self, candidate: &str) -> bool {
        self.names.contains(&normalize_name(candidate, self.normalization))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
