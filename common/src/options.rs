//! 照合オプション
//!
//! 名前比較の正規化レベルと、statuses 欠落時の扱い（寛容/厳格）を切り替える。

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 名前比較の正規化レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// 完全一致
    #[serde(rename = "exact")]
    Exact,
    /// 前後の空白のみ除去
    #[serde(rename = "trim")]
    Trim,
    /// 空白除去 + 両端の二重引用符除去 + 小文字化
    #[default]
    #[serde(rename = "trim+quote+casefold")]
    TrimQuoteCasefold,
}

impl FromStr for Normalization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(Normalization::Exact),
            "trim" => Ok(Normalization::Trim),
            "trim+quote+casefold" | "casefold" => Ok(Normalization::TrimQuoteCasefold),
            other => Err(Error::Config(format!("unknown normalization: {}", other))),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Normalization::Exact => write!(f, "exact"),
            Normalization::Trim => write!(f, "trim"),
            Normalization::TrimQuoteCasefold => write!(f, "trim+quote+casefold"),
        }
    }
}

/// 照合オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchOptions {
    /// 名前比較の正規化レベル
    pub normalization: Normalization,
    /// true: jsonMalla.statuses の欠落を400として扱う
    pub require_statuses: bool,
}

impl MatchOptions {
    /// 厳格モード（statuses必須）
    pub fn strict() -> Self {
        Self {
            require_statuses: true,
            ..Default::default()
        }
    }
}
