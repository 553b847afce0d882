//! malla-jobs
//!
//! マラ（ジョブ状態一覧）からジョブIDを抽出するHTTP API とCLI。
//! パーサーと照合の本体は `malla-common` にある。

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod offline;
pub mod server;
