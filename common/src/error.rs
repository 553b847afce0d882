//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// nombreJob が無い・文字列でない・空白のみ
    #[error("nombreJob es requerido y debe ser string")]
    MissingFilter,

    /// 厳格モードで jsonMalla.statuses が配列として存在しない
    #[error("jsonMalla.statuses es requerido y debe ser un arreglo")]
    MalformedStatuses,

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
