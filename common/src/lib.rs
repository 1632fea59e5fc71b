//! Cost Report Common Library
//!
//! 原価分析ワークシートの抽出ロジック（CLIから利用）
//!
//! - grid / locator / resolver: ラベル駆動の数値抽出
//! - process_name / translate: 工程名の正規化と自動翻訳キャッシュ
//! - process_table: 工程一覧の抽出
//! - report / render: レポートデータとHTML出力

pub mod grid;
pub mod locator;
pub mod resolver;
pub mod translate;
pub mod process_name;
pub mod process_table;
pub mod report;
pub mod render;
pub mod error;
pub mod export;

pub use grid::{Cell, Grid, parse_number, parse_number_str};
pub use locator::{LabelMatch, find_label, find_label_columns, LABEL_SCAN_WIDTH};
pub use resolver::{Side, resolve_value};
pub use translate::{AutoTranslator, NoopTranslator, TranslationCache, Translator};
pub use process_name::{ProcessName, ProcessNameNormalizer, clean_name};
pub use process_table::{ProcessEntry, RowOutcome, scan_process_table};
pub use report::{Currency, ReportData, SideFigures, build_report, cost_item_label, sheet_part_no};
pub use render::{HtmlOptions, render_html};
pub use error::{Error, Result};
