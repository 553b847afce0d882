//! Malla Common Library
//!
//! ジョブ状態一覧（マラ）の寛容パーサーとジョブ照合。
//! HTTPサーバとCLIで共有される。

pub mod types;
pub mod options;
pub mod error;
pub mod filter;
pub mod parser;
pub mod matcher;

pub use types::{Malla, ProcessRequest, ProcessResponse, StatusCollection, StatusRecord};
pub use options::{MatchOptions, Normalization};
pub use error::{Error, Result};
pub use filter::{normalize_name, NameFilter};
pub use parser::{collect_statuses, parse_loose, recover_pairs, recover_raw, RecoveryStrategy};
pub use matcher::{process, resolve};
