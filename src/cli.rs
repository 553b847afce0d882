use clap::{Parser, Subcommand};
use malla_common::Normalization;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "malla-jobs")]
#[command(about = "マラ（ジョブ状態一覧）からジョブIDを抽出するAPI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/malla-jobs/config.json）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// 照合オプションの上書き
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MatchArgs {
    /// statuses の欠落を400として扱う
    #[arg(long)]
    pub strict: bool,

    /// 名前の正規化 (exact/trim/trim+quote+casefold)
    #[arg(long)]
    pub normalization: Option<Normalization>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HTTPサーバを起動
    Serve {
        /// 待ち受けホスト
        #[arg(long)]
        host: Option<String>,

        /// 待ち受けポート（環境変数 PORT より優先）
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        options: MatchArgs,
    },

    /// ファイル/文字列のマラをその場で照合してJSONを出力
    Match {
        /// ジョブ名（カンマ区切り）
        #[arg(short, long)]
        filter: String,

        /// マラファイル（JSONとして読めなければ生文字列として扱う）
        #[arg(short, long, conflicts_with = "raw")]
        input: Option<PathBuf>,

        /// `statuses=[...]` 形式の文字列
        #[arg(long)]
        raw: Option<String>,

        #[command(flatten)]
        options: MatchArgs,
    },

    /// 有効な設定を表示
    Config {
        /// 設定内容を表示
        #[arg(long)]
        show: bool,

        /// 有効な設定を設定ファイルへ保存
        #[arg(long)]
        save: bool,
    },
}
