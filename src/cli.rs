use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wiper_lookup_common::CanonicalField;

#[derive(Parser)]
#[command(name = "wiper-lookup")]
#[command(about = "雨刷尺寸・接头类型查询工具", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データファイル（パスまたはglob、複数指定可。設定ファイルの候補を置き換える）
    #[arg(long = "data", global = true)]
    pub data: Vec<String>,

    /// シート名（省略時は先頭シート）
    #[arg(long, global = true)]
    pub sheet: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 车系名で検索
    Search {
        /// 検索語（例: 高尔夫、大众高尔夫）
        #[arg(required = true)]
        term: String,

        /// 品牌で絞り込み（完全一致）
        #[arg(short, long)]
        brand: Option<String>,

        /// 接头类型で絞り込み（完全一致）
        #[arg(short, long)]
        connector: Option<String>,

        /// 表示件数（省略時は設定値）
        #[arg(short, long)]
        limit: Option<usize>,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// ブランド名を除去しない
        #[arg(long)]
        no_strip_brand: bool,
    },

    /// 対話式で検索
    Interactive,

    /// データセットの概要を表示
    Info,

    /// フィールドの値一覧を表示
    Values {
        /// フィールド名（brand / connector_type / 品牌 など）
        #[arg(required = true)]
        field: CanonicalField,
    },

    /// スプレッドシートを取り込む（検証後にデータファイルの場所へコピー）
    Import {
        /// 取り込むファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 現在のデータセットをExcelに保存
    Save {
        /// 出力ファイル/ディレクトリ
        #[arg(required = true)]
        output: PathBuf,
    },

    /// 検索ログを表示
    Log {
        /// 最近の検索を何件表示するか
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// よく検索される語を何件表示するか
        #[arg(long)]
        top: Option<usize>,
    },

    /// 設定を表示/編集
    Config {
        /// データファイルの候補を追加
        #[arg(long)]
        add_source: Option<String>,

        /// シート名を設定
        #[arg(long)]
        sheet: Option<String>,

        /// 検索ログの保存先を設定
        #[arg(long)]
        log_path: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
