use thiserror::Error;

#[derive(Error, Debug)]
pub enum MallaJobsError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力が指定されていません。`--input FILE` または `--raw TEXT` を指定してください")]
    MissingInput,

    #[error("サーバ起動エラー: {0}")]
    Server(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] malla_common::Error),
}

pub type Result<T> = std::result::Result<T, MallaJobsError>;
