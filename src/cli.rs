use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "book-scan")]
#[command(about = "本の表紙を撮影して書誌情報を検索するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 表紙画像を1回スキャンして結果を表示
    Scan {
        /// 表紙画像のパス
        #[arg(required = true)]
        image: PathBuf,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話的にスキャンを繰り返す
    Screen,

    /// テキスト検出のみ実行
    Detect {
        /// 表紙画像のパス
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 書誌検索のみ実行
    Search {
        /// 検索語
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// スキャン前に表示する書籍リスト
    Books,

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
