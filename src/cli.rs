use clap::{Parser, Subcommand};
use cost_report_common::Currency;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cost-report")]
#[command(about = "成本分析ワークシート解析・中英レポート生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ワークシート1枚からレポートを生成
    Report {
        /// ワークブックのパス（xlsx/xlsm/xls/ods/csv）
        #[arg(required = true)]
        file: PathBuf,

        /// 品番（省略時は対話入力）
        #[arg(short, long)]
        part_no: Option<String>,

        /// 通貨 (ntd/usd/eur/aud/gbp、省略時は選択)
        #[arg(short, long)]
        currency: Option<Currency>,

        /// 為替レート（省略時は通貨の既定値）
        #[arg(short, long)]
        rate: Option<f64>,

        /// シート名（省略時は先頭シート）
        #[arg(long)]
        sheet: Option<String>,

        /// 出力形式 (html/excel/json/all)
        #[arg(short, long, default_value = "html")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 自動翻訳を使わない
        #[arg(long)]
        no_translate: bool,

        /// HTMLのダウンロードリンク（data URL）を表示
        #[arg(long)]
        print_link: bool,
    },

    /// フォルダ内のワークブックを一括変換
    Batch {
        /// ワークブックのあるフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// 通貨 (ntd/usd/eur/aud/gbp、必須)
        #[arg(short, long)]
        currency: Currency,

        /// 為替レート（省略時は通貨の既定値）
        #[arg(short, long)]
        rate: Option<f64>,

        /// 出力形式 (html/excel/json/all)
        #[arg(short, long, default_value = "html")]
        format: ExportFormat,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 自動翻訳を使わない
        #[arg(long)]
        no_translate: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 翻訳APIのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 翻訳APIのタイムアウト（秒）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 通貨の既定レートを設定（例: USD=32.1）
        #[arg(long)]
        set_rate: Option<String>,

        /// 先頭の見出し行数
        #[arg(long)]
        set_header_rows: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ExportFormat {
    #[default]
    Html,
    Excel,
    Json,
    All,
}

impl ExportFormat {
    /// 出力する拡張子の一覧
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            ExportFormat::Html => &["html"],
            ExportFormat::Excel => &["xlsx"],
            ExportFormat::Json => &["json"],
            ExportFormat::All => &["html", "xlsx", "json"],
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use html, excel, json, or all", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Html => write!(f, "html"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}
