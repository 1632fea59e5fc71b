use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostReportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("未対応のファイル形式です: {0}（xlsx/xlsm/xls/ods/csv に対応）")]
    UnsupportedFormat(String),

    #[error("ワークブック読み込みエラー: {0}")]
    WorkbookOpen(String),

    #[error("ワークシートが見つかりません: {0}")]
    EmptyWorkbook(String),

    #[error("入力内容に誤りがあります: {}", .0.join(" / "))]
    InvalidSettings(Vec<String>),

    #[error("CSV読み込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("翻訳APIエラー: {0}")]
    Translation(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] cost_report_common::Error),
}

pub type Result<T> = std::result::Result<T, CostReportError>;
